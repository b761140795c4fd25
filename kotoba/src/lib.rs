//! # Kotoba
//!
//! Kotoba is a morphological analyzer for Japanese text that reads
//! MeCab-compatible binary dictionaries (`sys.dic` and `matrix.bin`) and
//! finds the minimum-cost segmentation with the Viterbi algorithm.
//!
//! ## Examples
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use kotoba::{Dictionary, Tokenizer, group_phrases};
//!
//! let dict = Dictionary::from_paths("unidic/sys.dic", "unidic/matrix.bin")?;
//! let tokenizer = Tokenizer::new(dict);
//!
//! let morphemes = tokenizer.parse("食べさせられた猫")?;
//! for m in &morphemes {
//!     println!("{}\t{}", m.surface(), m.feature());
//! }
//! for phrase in group_phrases(&morphemes) {
//!     let text: String = morphemes[phrase].iter().map(|m| m.surface()).collect();
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("`target_pointer_width` must be 32 or 64");

pub mod common;
pub mod dictionary;
pub mod errors;
pub mod phrase;
pub mod token;
pub mod tokenizer;
mod utils;

#[cfg(test)]
mod test_utils;

pub use dictionary::Dictionary;
pub use phrase::group_phrases;
pub use token::{FeatureLayout, Morpheme, PosClass};
pub use tokenizer::Tokenizer;

/// Version number of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
