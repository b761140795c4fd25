use crate::errors::{KotobaError, Result};
use crate::utils::FromU32;

/// Blob of NUL-terminated feature strings addressed by byte offset.
#[derive(Default)]
pub struct WordFeatures {
    blob: Vec<u8>,
}

impl WordFeatures {
    pub fn new(blob: Vec<u8>) -> Self {
        Self { blob }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.blob.len()
    }

    /// Gets the bytes from `offset` up to the next NUL byte (or the end of the blob).
    pub fn get(&self, offset: u32) -> Result<&[u8]> {
        let start = usize::from_u32(offset);
        let Some(tail) = self.blob.get(start..) else {
            return Err(KotobaError::out_of_range(
                "offset",
                format!("feature index is out of bounds ({start} > {})", self.blob.len()),
            ));
        };
        let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        Ok(&tail[..end])
    }
}

/// Splits a feature string into comma-separated fields, trimming each.
pub fn split_fields(feature: &str) -> Vec<String> {
    feature.split(',').map(|f| f.trim().to_string()).collect()
}
