//! XOR obfuscation of the contact file.
//!
//! This keeps the file from being casually readable. It is not encryption:
//! anyone with the key (or a few known plaintext bytes) recovers the data.

use crate::error::{RolodexError, Result};

pub const DEFAULT_KEY: &str = "default_key_123";

#[derive(Debug, Clone)]
pub struct XorObfuscator {
    key: Vec<u8>,
}

impl XorObfuscator {
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(RolodexError::Config(
                "obfuscation key must not be empty".to_string(),
            ));
        }
        Ok(Self { key: key.to_vec() })
    }

    pub fn encrypt(&self, data: &[u8]) -> Vec<u8> {
        self.apply(data)
    }

    pub fn decrypt(&self, data: &[u8]) -> Vec<u8> {
        self.apply(data)
    }

    fn apply(&self, data: &[u8]) -> Vec<u8> {
        data.iter()
            .zip(self.key.iter().cycle())
            .map(|(b, k)| b ^ k)
            .collect()
    }
}

impl Default for XorObfuscator {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY.as_bytes().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_empty_key() {
        assert!(XorObfuscator::new("").is_err());
    }

    #[test]
    fn output_differs_from_input() {
        let xor = XorObfuscator::default();
        let data = b"Ann Lee\n555-0100\n";
        let scrambled = xor.encrypt(data);
        assert_eq!(scrambled.len(), data.len());
        assert_ne!(scrambled.as_slice(), data.as_slice());
    }

    #[test]
    fn key_repeats_over_long_payloads() {
        let xor = XorObfuscator::new([0xffu8]).unwrap();
        assert_eq!(xor.encrypt(&[0x00, 0x0f, 0xff]), vec![0xff, 0xf0, 0x00]);
    }

    #[test]
    fn empty_payload_stays_empty() {
        assert!(XorObfuscator::default().encrypt(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn proptest_decrypt_inverts_encrypt(
            data in proptest::collection::vec(any::<u8>(), 0..512),
            key in proptest::collection::vec(any::<u8>(), 1..32),
        ) {
            let xor = XorObfuscator::new(&key).unwrap();
            prop_assert_eq!(xor.decrypt(&xor.encrypt(&data)), data);
        }
    }
}
