//! Viterbi-based tokenizer.
pub mod lattice;

use std::ops::Range;
use std::sync::Arc;

use crate::Dictionary;
use crate::errors::Result;
use crate::token::{FeatureLayout, Morpheme};
use crate::tokenizer::lattice::Lattice;

const IDEOGRAPHIC_SPACE: &[u8] = "\u{3000}".as_bytes();

/// Tokenizer.
///
/// Cloning is cheap; clones share the same dictionary.
#[derive(Clone)]
pub struct Tokenizer {
    dict: Arc<Dictionary>,
    layout: FeatureLayout,
    ignore_space: bool,
}

impl Tokenizer {
    /// Creates a new tokenizer.
    ///
    /// The dictionary is moved into the tokenizer. If you need to share the dictionary
    /// among multiple tokenizers, use [`Tokenizer::from_shared_dictionary`].
    pub fn new(dict: Dictionary) -> Self {
        Self::from_shared_dictionary(Arc::new(dict))
    }

    /// Creates a new Tokenizer from a shared Dictionary.
    pub fn from_shared_dictionary(dict: Arc<Dictionary>) -> Self {
        Self {
            dict,
            layout: FeatureLayout::default(),
            ignore_space: false,
        }
    }

    /// Specifies which feature fields hold the part of speech and the dictionary form.
    pub fn feature_layout(mut self, layout: FeatureLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Ignores spaces in inputs.
    ///
    /// When enabled, ASCII white spaces and U+3000 split the input into
    /// segments that are tokenized independently, and spaces never appear in
    /// the result. Otherwise a space is tokenized like any other byte and
    /// fails the parse unless the dictionary contains it.
    pub fn ignore_space(mut self, yes: bool) -> Self {
        self.ignore_space = yes;
        self
    }

    /// Gets the reference to the dictionary.
    #[inline(always)]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Builds the lattice of `input` and finds its best path.
    ///
    /// # Errors
    ///
    /// [`KotobaError::NoParse`](crate::errors::KotobaError::NoParse) is returned
    /// when no chain of dictionary words covers the input.
    pub fn lattice(&self, input: &[u8]) -> Result<Lattice> {
        Lattice::build(self.dict.lexicon(), self.dict.connector(), input)
    }

    /// Tokenizes a sentence.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use kotoba::{Dictionary, Tokenizer};
    ///
    /// let dict = Dictionary::from_paths("unidic/sys.dic.gz", "unidic/matrix.bin.gz")?;
    /// let tokenizer = Tokenizer::new(dict);
    /// for m in tokenizer.parse("猫が好きです")? {
    ///     println!("{}\t{:?}\t{:?}", m.surface(), m.pos(), m.dictionary_form());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// [`KotobaError::NoParse`](crate::errors::KotobaError::NoParse) is returned
    /// when no chain of dictionary words covers the input. The tokenizer stays usable.
    pub fn parse(&self, text: &str) -> Result<Vec<Morpheme>> {
        self.parse_bytes(text.as_bytes())
    }

    /// Tokenizes raw UTF-8 bytes.
    ///
    /// Surfaces and features that are not valid UTF-8 are decoded lossily.
    pub fn parse_bytes(&self, input: &[u8]) -> Result<Vec<Morpheme>> {
        if !self.ignore_space {
            return self.parse_segment(input, 0);
        }
        let mut morphemes = vec![];
        for segment in split_spaces(input) {
            let offset = segment.start;
            morphemes.extend(self.parse_segment(&input[segment], offset)?);
        }
        Ok(morphemes)
    }

    fn parse_segment(&self, input: &[u8], offset: usize) -> Result<Vec<Morpheme>> {
        let lexicon = self.dict.lexicon();
        let lattice = self.lattice(input)?;
        lattice
            .backtrace()
            .into_iter()
            .map(|entry| -> Result<Morpheme> {
                let record = lexicon.token(entry.token_id);
                let feature = lexicon.feature(record.feature_offset)?;
                let range = entry.range_byte();
                Ok(Morpheme::new(
                    String::from_utf8_lossy(&input[range.clone()]).into_owned(),
                    range.start + offset..range.end + offset,
                    String::from_utf8_lossy(feature).into_owned(),
                    self.layout,
                    record,
                    entry.total_cost,
                ))
            })
            .collect()
    }
}

/// Splits `input` into maximal runs that contain no space.
fn split_spaces(input: &[u8]) -> Vec<Range<usize>> {
    let mut segments = vec![];
    let mut start = 0;
    let mut i = 0;
    while i < input.len() {
        let space_len = if input[i].is_ascii_whitespace() {
            1
        } else if input[i..].starts_with(IDEOGRAPHIC_SPACE) {
            IDEOGRAPHIC_SPACE.len()
        } else {
            0
        };
        if space_len == 0 {
            i += 1;
            continue;
        }
        if start < i {
            segments.push(start..i);
        }
        i += space_len;
        start = i;
    }
    if start < input.len() {
        segments.push(start..input.len());
    }
    segments
}
