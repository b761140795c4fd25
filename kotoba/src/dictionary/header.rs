use crate::common::{CHARSET_LEN, DICTIONARY_MAGIC, DICTIONARY_VERSION};
use crate::errors::{KotobaError, Result};
use crate::utils::ByteCursor;

/// Number of bytes occupied by the ten header fields.
pub(crate) const HEADER_LEN: usize = 10 * 4;

/// Header of a binary system dictionary.
///
/// The three region sizes are given in bytes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DictionaryHeader {
    /// Raw magic field (`DICTIONARY_MAGIC ^ file length`).
    pub magic: u32,
    /// Layout version.
    pub version: u32,
    /// Dictionary type (0 for system dictionaries).
    pub dict_type: u32,
    /// Number of lexical entries.
    pub lexicon_size: u32,
    /// Number of left connection ids.
    pub left_size: u32,
    /// Number of right connection ids.
    pub right_size: u32,
    /// Size of the double-array region in bytes.
    pub double_array_size: u32,
    /// Size of the token region in bytes.
    pub tokens_size: u32,
    /// Size of the feature blob in bytes.
    pub features_size: u32,
    /// Unused.
    pub reserved: u32,
}

impl DictionaryHeader {
    /// Reads the header, validating the magic number before any other field.
    pub(crate) fn read(cur: &mut ByteCursor, total_len: usize) -> Result<Self> {
        let magic = cur.read_u32()?;
        let expected = u32::try_from(total_len).ok();
        if expected != Some(magic ^ DICTIONARY_MAGIC) {
            return Err(KotobaError::invalid_format(
                "magic",
                format!(
                    "dictionary is invalid ({magic:#010x} ^ {DICTIONARY_MAGIC:#010x} != {total_len})"
                ),
            ));
        }

        let version = cur.read_u32()?;
        if version != DICTIONARY_VERSION {
            return Err(KotobaError::invalid_format(
                "version",
                format!("incompatible dictionary version {version}, expected {DICTIONARY_VERSION}"),
            ));
        }

        Ok(Self {
            magic,
            version,
            dict_type: cur.read_u32()?,
            lexicon_size: cur.read_u32()?,
            left_size: cur.read_u32()?,
            right_size: cur.read_u32()?,
            double_array_size: cur.read_u32()?,
            tokens_size: cur.read_u32()?,
            features_size: cur.read_u32()?,
            reserved: cur.read_u32()?,
        })
    }
}

/// Decodes the NUL-padded charset tag.
pub(crate) fn read_charset(cur: &mut ByteCursor) -> Result<String> {
    let raw = cur.take(CHARSET_LEN)?;
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    Ok(String::from_utf8_lossy(&raw[..end]).into_owned())
}
