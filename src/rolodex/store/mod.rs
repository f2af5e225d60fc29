//! # Storage Layer
//!
//! The contact collection is persisted as one opaque payload: the store
//! encodes and obfuscates it, and a [`ContactStorage`] backend only moves the
//! bytes. Every save rewrites the whole payload; there is no partial write.
//!
//! ## Implementations
//!
//! - [`fs::FileStorage`]: production storage in a single file.
//!   - Writes go to a hidden temporary file in the same directory which is
//!     then renamed over the target, so readers never see half a file.
//!   - A missing file reads as "no payload", not an error.
//!
//! - [`memory::MemoryStorage`]: in-memory storage for tests.
//!   - No persistence, no backup source.
//!
//! Backends are not locked against other processes.

use crate::error::Result;
use std::path::Path;

pub mod fs;
pub mod memory;

/// Raw persistence of the encoded contact payload.
pub trait ContactStorage {
    /// Read the stored payload. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the stored payload. MUST be atomic from a reader's view.
    fn save(&mut self, payload: &[u8]) -> Result<()>;

    /// On-disk location of the payload, if there is one. Used as the backup
    /// source.
    fn path(&self) -> Option<&Path>;
}
