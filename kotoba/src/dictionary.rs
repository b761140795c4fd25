//! Dictionary for tokenization.
pub(crate) mod connector;
pub(crate) mod fetch;
pub(crate) mod header;
pub(crate) mod lexicon;

use std::io::Read;
use std::path::Path;

use crate::errors::{KotobaError, Result};

pub use crate::dictionary::connector::{ConnectionMatrix, ConnectorCost, ConnectorView};
pub use crate::dictionary::header::DictionaryHeader;
pub use crate::dictionary::lexicon::{LexMatch, SystemLexicon, TokenGroup, TokenRecord};

/// A read-only dictionary for tokenization.
///
/// It bundles the system lexicon (`sys.dic`) with the connection matrix (`matrix.bin`).
/// Once built, it never changes and can be shared among any number of threads.
pub struct Dictionary {
    lexicon: SystemLexicon,
    connector: ConnectionMatrix,
}

impl Dictionary {
    /// Creates a dictionary from a parsed lexicon and matrix.
    ///
    /// # Errors
    ///
    /// [`KotobaError::OutOfRange`] is returned when a token refers to a connection id
    /// that the matrix does not cover.
    pub fn new(lexicon: SystemLexicon, connector: ConnectionMatrix) -> Result<Self> {
        let num_left = connector.num_left();
        let num_right = connector.num_right();
        if let Some((token_id, token)) = lexicon.tokens().enumerate().find(|(_, t)| {
            usize::from(t.left_id) > num_left || usize::from(t.right_id) > num_right
        }) {
            log::warn!(
                "[kotoba] token {token_id} (left {}, right {}) exceeds the {num_left}x{num_right} matrix",
                token.left_id,
                token.right_id,
            );
            return Err(KotobaError::out_of_range(
                "connector",
                format!(
                    "token {token_id} has connection ids ({}, {}) beyond the matrix {num_left}x{num_right}",
                    token.left_id, token.right_id,
                ),
            ));
        }
        Ok(Self { lexicon, connector })
    }

    /// Creates a dictionary from the raw bytes of `sys.dic` and `matrix.bin`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use kotoba::Dictionary;
    ///
    /// let sysdic = std::fs::read("unidic/sys.dic")?;
    /// let matrix = std::fs::read("unidic/matrix.bin")?;
    /// let dict = Dictionary::from_bytes(&sysdic, &matrix)?;
    /// println!("{} tokens", dict.lexicon().num_tokens());
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Any format, range, or size violation in either input aborts the load.
    /// No partially loaded dictionary is ever returned.
    pub fn from_bytes(sysdic: &[u8], matrix: &[u8]) -> Result<Self> {
        let lexicon = SystemLexicon::from_bytes(sysdic)?;
        let connector = ConnectionMatrix::from_bytes(matrix)?;
        Self::new(lexicon, connector)
    }

    /// Creates a dictionary from readers of `sys.dic` and `matrix.bin`.
    ///
    /// Both readers are consumed to their ends.
    pub fn from_readers<R, S>(mut sysdic_rdr: R, mut matrix_rdr: S) -> Result<Self>
    where
        R: Read,
        S: Read,
    {
        let mut sysdic = Vec::new();
        sysdic_rdr.read_to_end(&mut sysdic)?;
        let mut matrix = Vec::new();
        matrix_rdr.read_to_end(&mut matrix)?;
        Self::from_bytes(&sysdic, &matrix)
    }

    /// Creates a dictionary from file paths.
    ///
    /// Files ending in `.gz` are gunzipped and files ending in `.zst` are
    /// decompressed with Zstandard; other files are memory-mapped while parsing.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use kotoba::{Dictionary, errors::Result};
    /// # fn main() -> Result<()> {
    /// let dict = Dictionary::from_paths("unidic/sys.dic.gz", "unidic/matrix.bin.gz")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_paths<P, Q>(sysdic_path: P, matrix_path: Q) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let sysdic = fetch::read_blob(sysdic_path)?;
        let matrix = fetch::read_blob(matrix_path)?;
        Self::from_bytes(&sysdic, &matrix)
    }

    /// Gets the reference to the system lexicon.
    #[inline(always)]
    pub const fn lexicon(&self) -> &SystemLexicon {
        &self.lexicon
    }

    /// Gets the reference to the connection matrix.
    #[inline(always)]
    pub const fn connector(&self) -> &ConnectionMatrix {
        &self.connector
    }

    /// Gets the header of the system dictionary.
    #[inline(always)]
    pub const fn header(&self) -> &DictionaryHeader {
        self.lexicon.header()
    }

    /// Gets the charset tag of the system dictionary.
    #[inline(always)]
    pub fn charset(&self) -> &str {
        self.lexicon.charset()
    }
}
