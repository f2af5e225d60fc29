use super::ContactStorage;
use crate::error::{RolodexError, Result};
use std::path::Path;

/// Payload held in memory. `fail_saves` simulates an unwritable disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    payload: Option<Vec<u8>>,
    fail_saves: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: Vec<u8>) -> Self {
        Self {
            payload: Some(payload),
            fail_saves: false,
        }
    }

    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }
}

impl ContactStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.payload.clone())
    }

    fn save(&mut self, payload: &[u8]) -> Result<()> {
        if self.fail_saves {
            return Err(RolodexError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "memory storage is read-only",
            )));
        }
        self.payload = Some(payload.to_vec());
        Ok(())
    }

    fn path(&self) -> Option<&Path> {
        None
    }
}
