//! # CLI Layer
//!
//! One UI client for rolodex. This is the only code that:
//! - parses shell arguments (clap, see `setup.rs`)
//! - installs the logging sinks
//! - writes to stdout/stderr
//!
//! Each `handle_*` calls one [`RolodexApi`] method, prints the returned
//! [`CmdResult`], and saves when the result reports a change.

use super::print::{
    print_birthdays, print_config, print_contact_lines, print_contacts_full, print_duplicates,
    print_issues, print_messages, print_paths, print_stats, print_tags,
};
use super::setup::{AddArgs, BackupCommands, Cli, Commands, EditArgs, ListArgs, TagCommands};
use clap::Parser;
use rolodex::api::{configure, ConfigAction, ListFilter, RolodexApi};
use rolodex::commands::CmdResult;
use rolodex::config::RolodexConfig;
use rolodex::error::{RolodexError, Result};
use rolodex::init::{default_data_dir, initialize};
use rolodex::logging;
use rolodex::model::ContactId;
use rolodex::store::fs::FileStorage;
use std::path::Path;

struct AppContext {
    api: RolodexApi<FileStorage>,
}

impl AppContext {
    /// Prints the messages and saves if the collection changed.
    fn finish(&mut self, result: &CmdResult) -> Result<()> {
        print_messages(&result.messages);
        if result.modified {
            self.api.save()?;
        }
        Ok(())
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = match cli.dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let config = RolodexConfig::load(&data_dir)?;
    let log_path = config.log_path(&data_dir);
    if let Err(e) = logging::init(Some(log_path.as_path()), cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    // Config edits must work even when the contact file does not decode.
    let command = match cli.command {
        Some(Commands::Config { key, value }) => return handle_config(&data_dir, key, value),
        command => command,
    };

    let mut ctx = AppContext {
        api: initialize(&data_dir, &config)?,
    };

    match command {
        Some(Commands::Add(args)) => handle_add(&mut ctx, args),
        Some(Commands::List(args)) => handle_list(&mut ctx, args),
        Some(Commands::Show { id }) => handle_show(&mut ctx, &id),
        Some(Commands::Search { term, by }) => {
            let result = ctx.api.search(by.into(), &term)?;
            print_contact_lines(&result.listed_contacts);
            ctx.finish(&result)
        }
        Some(Commands::Edit(args)) => handle_edit(&mut ctx, args),
        Some(Commands::Delete { phone, id }) => handle_delete(&mut ctx, phone, id),
        Some(Commands::Sort { key }) => {
            let result = ctx.api.sort(key.into())?;
            print_contact_lines(&result.listed_contacts);
            ctx.finish(&result)
        }
        Some(Commands::Stats) => {
            let result = ctx.api.stats()?;
            if let Some(stats) = &result.stats {
                print_stats(stats);
            }
            ctx.finish(&result)
        }
        Some(Commands::Tag(cmd)) => handle_tag(&mut ctx, cmd),
        Some(Commands::Favorite { phone }) => {
            let result = ctx.api.toggle_favorite(&phone)?;
            ctx.finish(&result)
        }
        Some(Commands::Export { path }) => {
            let result = ctx.api.export_csv(path.as_deref())?;
            ctx.finish(&result)
        }
        Some(Commands::Duplicates) => {
            let result = ctx.api.duplicates()?;
            print_duplicates(&result.duplicates);
            ctx.finish(&result)
        }
        Some(Commands::Birthdays { days }) => {
            let result = ctx.api.birthdays(days)?;
            print_birthdays(&result.birthdays);
            ctx.finish(&result)
        }
        Some(Commands::Validate) => {
            let result = ctx.api.validate()?;
            print_issues(&result.issues);
            ctx.finish(&result)
        }
        Some(Commands::Backup(cmd)) => handle_backup(&mut ctx, cmd),
        Some(Commands::Config { key, value }) => handle_config(ctx.api.data_dir(), key, value),
        None => handle_list(&mut ctx, ListArgs::default()),
    }
}

fn handle_add(ctx: &mut AppContext, args: AddArgs) -> Result<()> {
    let result = ctx.api.add_contact(args.into_new_contact())?;
    ctx.finish(&result)
}

fn handle_list(ctx: &mut AppContext, args: ListArgs) -> Result<()> {
    let filter = match (args.favorites, args.recent) {
        (true, _) => ListFilter::Favorites,
        (false, Some(n)) => ListFilter::Recent(n),
        (false, None) => ListFilter::All,
    };
    let result = ctx.api.list_contacts(filter)?;
    if args.compact {
        print_contact_lines(&result.listed_contacts);
    } else {
        print_contacts_full(&result.listed_contacts);
    }
    ctx.finish(&result)
}

fn handle_show(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.show_contact(parse_id(id)?)?;
    print_contacts_full(&result.listed_contacts);
    ctx.finish(&result)
}

fn handle_edit(ctx: &mut AppContext, args: EditArgs) -> Result<()> {
    let (phone, update) = args.into_update();
    let result = ctx.api.edit_contact(&phone, &update)?;
    ctx.finish(&result)
}

fn handle_delete(ctx: &mut AppContext, phone: Option<String>, id: Option<String>) -> Result<()> {
    let result = match (phone, id) {
        (_, Some(id)) => ctx.api.delete_by_id(parse_id(&id)?)?,
        (Some(phone), None) => ctx.api.delete_by_phone(&phone)?,
        (None, None) => return Err(RolodexError::Api("Give a phone number or --id".into())),
    };
    ctx.finish(&result)
}

fn handle_tag(ctx: &mut AppContext, cmd: TagCommands) -> Result<()> {
    let result = match cmd {
        TagCommands::Add { tag, phones } => ctx.api.tag_contacts(&phones, &tag)?,
        TagCommands::Remove { tag, phone } => ctx.api.untag_contact(&phone, &tag)?,
        TagCommands::List => {
            let result = ctx.api.list_tags()?;
            print_tags(&result.tags);
            result
        }
    };
    ctx.finish(&result)
}

fn handle_backup(ctx: &mut AppContext, cmd: BackupCommands) -> Result<()> {
    let result = match cmd {
        BackupCommands::Create => ctx.api.backup_create()?,
        BackupCommands::List => {
            let result = ctx.api.backup_list()?;
            print_paths(&result.paths);
            result
        }
        BackupCommands::Restore { backup } => ctx.api.backup_restore(&backup)?,
    };
    ctx.finish(&result)
}

fn handle_config(data_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = configure(data_dir, action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn parse_id(raw: &str) -> Result<ContactId> {
    raw.parse::<ContactId>().map_err(RolodexError::Api)
}
