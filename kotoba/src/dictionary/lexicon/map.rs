pub mod trie;

use std::ops::Range;

use crate::dictionary::lexicon::map::trie::{DoubleArrayUnit, Trie};
use crate::errors::{KotobaError, Result};
use crate::utils::FromU32;

/// Contiguous group of tokens sharing one surface form.
///
/// Decoded from the value of an accepting trie unit:
/// the upper 24 bits hold the offset into the token table and
/// the lower 8 bits hold the number of tokens.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TokenGroup {
    pub offset: u32,
    pub count: u32,
}

impl TokenGroup {
    #[inline(always)]
    pub const fn from_value(value: u32) -> Self {
        Self {
            offset: value >> 8,
            count: value & 0xff,
        }
    }

    #[inline(always)]
    pub fn range(&self) -> Range<usize> {
        let start = usize::from_u32(self.offset);
        start..start + usize::from_u32(self.count)
    }
}

/// Map from surface bytes to token ids.
pub struct WordMap {
    trie: Trie,
}

impl WordMap {
    /// Creates the map, checking that every token group lies within `num_tokens`.
    pub fn new(units: Vec<DoubleArrayUnit>, num_tokens: usize) -> Result<Self> {
        let trie = Trie::new(units);
        for (index, value) in trie.leaves() {
            let group = TokenGroup::from_value(value);
            if group.range().end > num_tokens {
                return Err(KotobaError::out_of_range(
                    "double_array",
                    format!(
                        "unit {index} refers to tokens {:?}, but only {num_tokens} tokens exist",
                        group.range(),
                    ),
                ));
            }
        }
        Ok(Self { trie })
    }

    #[inline(always)]
    pub fn num_units(&self) -> usize {
        self.trie.num_units()
    }

    /// Returns `(token_id, end_byte)` for every token whose surface is a prefix of `input`.
    ///
    /// Tokens of shorter surfaces come first.
    #[inline(always)]
    pub fn common_prefix_iterator<'a>(
        &'a self,
        input: &'a [u8],
    ) -> impl Iterator<Item = (u32, usize)> + 'a {
        self.trie.common_prefix_iterator(input).flat_map(|m| {
            let group = TokenGroup::from_value(m.value);
            (group.offset..group.offset + group.count).map(move |token_id| (token_id, m.end_byte))
        })
    }
}
