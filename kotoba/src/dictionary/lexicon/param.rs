use crate::errors::{KotobaError, Result};
use crate::utils::ByteCursor;

/// Number of bytes occupied by one token record.
pub const TOKEN_RECORD_LEN: usize = 16;

/// One dictionary entry.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct TokenRecord {
    pub left_id: u16,
    pub right_id: u16,
    pub pos_id: u16,
    pub weight: i16,
    pub feature_offset: u32,
    pub compound: u32,
}

impl TokenRecord {
    #[inline(always)]
    pub const fn new(left_id: u16, right_id: u16, weight: i16) -> Self {
        Self {
            left_id,
            right_id,
            pos_id: 0,
            weight,
            feature_offset: 0,
            compound: 0,
        }
    }

    pub(crate) fn read(cur: &mut ByteCursor) -> Result<Self> {
        Ok(Self {
            left_id: cur.read_u16()?,
            right_id: cur.read_u16()?,
            pos_id: cur.read_u16()?,
            weight: cur.read_i16()?,
            feature_offset: cur.read_u32()?,
            compound: cur.read_u32()?,
        })
    }
}

pub struct TokenRecords {
    records: Vec<TokenRecord>,
}

impl TokenRecords {
    /// Reads `num_records` records, validating ids against the declared matrix sizes
    /// and feature offsets against the blob size.
    pub(crate) fn read(
        cur: &mut ByteCursor,
        num_records: usize,
        left_size: u32,
        right_size: u32,
        features_size: u32,
    ) -> Result<Self> {
        let mut records = Vec::with_capacity(num_records);
        for token_id in 0..num_records {
            let record = TokenRecord::read(cur)?;
            if u32::from(record.left_id) > left_size || u32::from(record.right_id) > right_size {
                return Err(KotobaError::out_of_range(
                    "tokens",
                    format!(
                        "token {token_id} has invalid connection ids (left {} > {left_size} or right {} > {right_size})",
                        record.left_id, record.right_id,
                    ),
                ));
            }
            if record.feature_offset >= features_size {
                return Err(KotobaError::out_of_range(
                    "tokens",
                    format!(
                        "token {token_id} feature offset is out of range {} >= {features_size}",
                        record.feature_offset,
                    ),
                ));
            }
            records.push(record);
        }
        Ok(Self { records })
    }

    #[inline(always)]
    pub fn get(&self, token_id: usize) -> TokenRecord {
        self.records[token_id]
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = &TokenRecord> {
        self.records.iter()
    }
}
