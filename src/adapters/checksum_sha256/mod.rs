// SHA-256 checksum adapter - Whole-file content digests

use std::path::Path;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::domain::errors::*;
use crate::ports::*;

const READ_BUFFER_SIZE: usize = 128 * 1024;

/// SHA-256 checksum adapter
pub struct Sha256ChecksumAdapter;

impl Sha256ChecksumAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Sha256ChecksumAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChecksumPort for Sha256ChecksumAdapter {
    async fn digest(&self, file_path: &Path) -> Result<String, DomainError> {
        let mut file = File::open(file_path)
            .await
            .map_err(|e| DomainError::io(file_path, e))?;
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; READ_BUFFER_SIZE];

        loop {
            let n = file
                .read(&mut buffer)
                .await
                .map_err(|e| DomainError::io(file_path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }

        Ok(hex::encode(hasher.finalize()))
    }
}
