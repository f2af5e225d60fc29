//! # Rolodex Architecture
//!
//! Rolodex is a **personal contact database** kept in a single obfuscated file.
//! The library owns the contact collection and everything derived from it; the
//! `rolodex` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, installs logging       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade returning CmdResult                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Contact Store (manager.rs)                                 │
//! │  - Validation, uniqueness, indexes, searches, tags          │
//! │  - Persistence pipeline: codec → obfuscation → storage      │
//! │  - Auto-backup hook after every mutation                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ContactStorage trait                                     │
//! │  - FileStorage (production), MemoryStorage (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//!
//! Every contact has a numeric [`model::ContactId`] assigned by the store and
//! never reused, and a phone number that is unique across the collection.
//! Edits, deletes, tags and favorites address contacts by phone; `show` and
//! `delete --id` use the id.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Diagnostics are `tracing` events; [`logging`] is what the CLI
//! uses to route them.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`manager`]: The contact store
//! - [`model`]: `Contact`, `NewContact`, `ContactUpdate`, `Field`
//! - [`validate`]: Field format rules behind the `Validator` trait
//! - [`index`]: Phone, id and tag lookup maps
//! - [`codec`] and [`obfuscate`]: The on-disk payload format
//! - [`store`]: Storage abstraction and implementations
//! - [`backup`]: Timestamped copies of the contact file
//! - [`birthdays`], [`stats`], [`export`]: Derived views
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod backup;
pub mod birthdays;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod index;
pub mod init;
pub mod logging;
pub mod manager;
pub mod model;
pub mod obfuscate;
pub mod stats;
pub mod store;
pub mod validate;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
