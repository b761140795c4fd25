//! Grouping of morphemes into display phrases.
use std::ops::Range;

use crate::token::Morpheme;

/// Groups morphemes into phrases, returning index ranges into `morphemes`.
///
/// Each morpheme that [attaches](Morpheme::attaches) joins the phrase of the
/// preceding morpheme; any other morpheme opens a new phrase. An attaching
/// morpheme at the head of the input opens its own phrase.
pub fn group_phrases(morphemes: &[Morpheme]) -> Vec<Range<usize>> {
    let mut phrases: Vec<Range<usize>> = vec![];
    for (i, m) in morphemes.iter().enumerate() {
        match phrases.last_mut() {
            Some(last) if m.attaches() => last.end = i + 1,
            _ => phrases.push(i..i + 1),
        }
    }
    phrases
}
