mod feature;
pub(crate) mod map;
mod param;

use crate::dictionary::header::{self, DictionaryHeader, HEADER_LEN};
use crate::dictionary::lexicon::feature::WordFeatures;
use crate::dictionary::lexicon::map::WordMap;
use crate::dictionary::lexicon::map::trie::DoubleArrayUnit;
use crate::dictionary::lexicon::param::{TOKEN_RECORD_LEN, TokenRecords};
use crate::errors::{KotobaError, Result};
use crate::utils::{ByteCursor, FromU32};

pub use crate::dictionary::lexicon::feature::split_fields;
pub use crate::dictionary::lexicon::map::TokenGroup;
pub use crate::dictionary::lexicon::param::TokenRecord;

const UNIT_LEN: usize = 8;

/// Lexicon of a binary system dictionary (`sys.dic`).
pub struct SystemLexicon {
    header: DictionaryHeader,
    charset: String,
    map: WordMap,
    params: TokenRecords,
    features: WordFeatures,
}

impl SystemLexicon {
    /// Parses a system dictionary.
    ///
    /// # Errors
    ///
    /// - [`KotobaError::InvalidFormat`] if the magic number or the version mismatches,
    ///   a region is truncated or misaligned, or unparsed bytes remain.
    /// - [`KotobaError::OutOfRange`] if a token refers to connection ids beyond the
    ///   declared sizes, a feature offset beyond the blob, or a trie leaf refers to
    ///   tokens beyond the token table.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cur = ByteCursor::new(bytes);
        let header = DictionaryHeader::read(&mut cur, bytes.len())?;
        debug_assert_eq!(cur.position(), HEADER_LEN);
        let charset = header::read_charset(&mut cur)?;

        let da_size = usize::from_u32(header.double_array_size);
        let tokens_size = usize::from_u32(header.tokens_size);
        if da_size % UNIT_LEN != 0 {
            return Err(KotobaError::invalid_format(
                "double_array_size",
                format!("{da_size} is not a multiple of {UNIT_LEN}"),
            ));
        }
        if tokens_size % TOKEN_RECORD_LEN != 0 {
            return Err(KotobaError::invalid_format(
                "tokens_size",
                format!("{tokens_size} is not a multiple of {TOKEN_RECORD_LEN}"),
            ));
        }

        let num_units = da_size / UNIT_LEN;
        let mut da_cur = ByteCursor::new(cur.take(da_size)?);
        let mut units = Vec::with_capacity(num_units);
        for _ in 0..num_units {
            let base = da_cur.read_i32()?;
            let check = da_cur.read_u32()?;
            units.push(DoubleArrayUnit::new(base, check));
        }

        let num_tokens = tokens_size / TOKEN_RECORD_LEN;
        let mut token_cur = ByteCursor::new(cur.take(tokens_size)?);
        let params = TokenRecords::read(
            &mut token_cur,
            num_tokens,
            header.left_size,
            header.right_size,
            header.features_size,
        )?;

        let features = WordFeatures::new(
            cur.take(usize::from_u32(header.features_size))?.to_vec(),
        );

        if cur.remaining() != 0 {
            return Err(KotobaError::invalid_format(
                "bytes",
                format!(
                    "dictionary is invalid (extraneous bytes at end of file) {} != {}",
                    cur.position(),
                    bytes.len(),
                ),
            ));
        }

        let map = WordMap::new(units, params.len())?;

        log::debug!(
            "[kotoba] loaded system lexicon: charset={charset}, units={num_units}, tokens={num_tokens}, features={} bytes",
            features.len(),
        );

        Ok(Self {
            header,
            charset,
            map,
            params,
            features,
        })
    }

    #[inline(always)]
    pub const fn header(&self) -> &DictionaryHeader {
        &self.header
    }

    #[inline(always)]
    pub fn charset(&self) -> &str {
        &self.charset
    }

    #[inline(always)]
    pub fn num_tokens(&self) -> usize {
        self.params.len()
    }

    #[inline(always)]
    pub fn num_units(&self) -> usize {
        self.map.num_units()
    }

    /// Iterates over every token whose surface is a prefix of `input`,
    /// shorter surfaces first.
    #[inline(always)]
    pub fn common_prefix_iterator<'a>(
        &'a self,
        input: &'a [u8],
    ) -> impl Iterator<Item = LexMatch> + 'a {
        self.map
            .common_prefix_iterator(input)
            .map(move |(token_id, end_byte)| {
                LexMatch::new(token_id, self.params.get(usize::from_u32(token_id)), end_byte)
            })
    }

    /// Gets the token record.
    ///
    /// # Panics
    ///
    /// Panics if `token_id` is not smaller than [`Self::num_tokens()`].
    #[inline(always)]
    pub fn token(&self, token_id: u32) -> TokenRecord {
        self.params.get(usize::from_u32(token_id))
    }

    #[inline(always)]
    pub fn tokens(&self) -> impl Iterator<Item = &TokenRecord> {
        self.params.iter()
    }

    /// Gets the raw feature bytes starting at `offset`.
    #[inline(always)]
    pub fn feature(&self, offset: u32) -> Result<&[u8]> {
        self.features.get(offset)
    }
}

/// A token whose surface matched a prefix of the input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LexMatch {
    pub token_id: u32,
    pub record: TokenRecord,
    pub end_byte: usize,
}

impl LexMatch {
    #[inline(always)]
    pub const fn new(token_id: u32, record: TokenRecord, end_byte: usize) -> Self {
        Self {
            token_id,
            record,
            end_byte,
        }
    }
}
