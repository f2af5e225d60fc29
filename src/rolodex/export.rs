use crate::error::{RolodexError, Result};
use crate::model::{Contact, Field};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const CSV_HEADER: &str =
    "ID,Name,Phone,Email,Address,Company,JobTitle,Birthday,Website,SocialMedia,Notes,Favorite,Tags";
const TAG_SEPARATOR: &str = ";";

pub fn export_csv(path: &Path, contacts: &[Contact]) -> Result<()> {
    let file = File::create(path).map_err(RolodexError::Io)?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, contacts)?;
    writer.flush().map_err(RolodexError::Io)?;
    Ok(())
}

pub fn write_csv<W: Write>(mut writer: W, contacts: &[Contact]) -> Result<()> {
    writeln!(writer, "{}", CSV_HEADER).map_err(RolodexError::Io)?;
    for contact in contacts {
        writeln!(writer, "{}", csv_row(contact)).map_err(RolodexError::Io)?;
    }
    Ok(())
}

fn csv_row(contact: &Contact) -> String {
    let mut cells = Vec::with_capacity(13);
    cells.push(contact.id().to_string());
    for field in Field::TEXT {
        cells.push(quote(contact.text(field).unwrap_or_default()));
    }
    cells.push(if contact.is_favorite() { "Yes" } else { "No" }.to_string());
    cells.push(quote(&contact.tags().join(TAG_SEPARATOR)));
    cells.join(",")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContactId, NewContact};

    fn render(contacts: &[Contact]) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, contacts).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_only_when_empty() {
        assert_eq!(render(&[]), format!("{}\n", CSV_HEADER));
    }

    #[test]
    fn row_layout() {
        let mut ann = Contact::new(
            ContactId(4),
            NewContact::new("Ann Lee", "555-0100")
                .with_email("a@b.com")
                .with_tag("vip")
                .with_tag("golf"),
        );
        ann.set_favorite(true);

        let out = render(&[ann]);
        let row = out.lines().nth(1).unwrap();
        assert_eq!(
            row,
            r#"4,"Ann Lee","555-0100","a@b.com","","","","","","","",Yes,"vip;golf""#
        );
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let mut fields = NewContact::new("Bo", "555-0101");
        fields.notes = r#"says "hi""#.to_string();
        let out = render(&[Contact::new(ContactId(1), fields)]);
        assert!(out.contains(r#""says ""hi""""#));
        assert!(out.contains(",No,"));
    }

    #[test]
    fn writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.csv");
        export_csv(&path, &[Contact::new(ContactId(1), NewContact::new("Cy", "555-0102"))]).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
