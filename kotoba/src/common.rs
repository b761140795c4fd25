//! Common settings in Kotoba.

/// Magic constant of a MeCab system dictionary.
///
/// The first header field stores this value XOR-ed with the file length.
pub const DICTIONARY_MAGIC: u32 = 0xef71_8f77;

/// The only supported version of the binary dictionary layout.
pub const DICTIONARY_VERSION: u32 = 102;

/// Length of the charset tag following the header.
pub const CHARSET_LEN: usize = 32;

/// The fixed connection id of BOS/EOS.
pub const BOS_EOS_CONNECTION_ID: u16 = 0;
