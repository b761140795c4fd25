//! Container of resultant morphemes.
use std::ops::Range;

use crate::dictionary::TokenRecord;
use crate::dictionary::lexicon::split_fields;

/// Positions of the well-known fields in a feature string.
///
/// Feature strings are not self-describing; the defaults follow the
/// UniDic/IPADIC convention of POS in fields 0 and 1 and the dictionary
/// form in field 10.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FeatureLayout {
    /// Field holding the major part-of-speech category.
    pub pos: usize,
    /// Field holding the part-of-speech subcategory.
    pub pos_detail: usize,
    /// Field holding the dictionary (citation) form.
    pub dictionary_form: usize,
}

impl Default for FeatureLayout {
    fn default() -> Self {
        Self {
            pos: 0,
            pos_detail: 1,
            dictionary_form: 10,
        }
    }
}

/// Coarse class of the major part-of-speech category.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum PosClass {
    /// 名詞
    Noun,
    /// 助詞
    Particle,
    /// 助動詞
    AuxiliaryVerb,
    /// 動詞
    Verb,
    /// 副詞
    Adverb,
    /// 連体詞
    Prenominal,
    /// Anything else.
    Other,
}

impl PosClass {
    /// Classifies a major part-of-speech string.
    pub fn from_pos(pos: &str) -> Self {
        match pos {
            "名詞" => Self::Noun,
            "助詞" => Self::Particle,
            "助動詞" => Self::AuxiliaryVerb,
            "動詞" => Self::Verb,
            "副詞" => Self::Adverb,
            "連体詞" => Self::Prenominal,
            _ => Self::Other,
        }
    }
}

/// Resultant morpheme.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Morpheme {
    surface: String,
    range_byte: Range<usize>,
    feature: String,
    fields: Vec<String>,
    layout: FeatureLayout,
    record: TokenRecord,
    total_cost: i64,
}

impl Morpheme {
    pub(crate) fn new(
        surface: String,
        range_byte: Range<usize>,
        feature: String,
        layout: FeatureLayout,
        record: TokenRecord,
        total_cost: i64,
    ) -> Self {
        let fields = split_fields(&feature);
        Self {
            surface,
            range_byte,
            feature,
            fields,
            layout,
            record,
            total_cost,
        }
    }

    /// Gets the surface string of the morpheme.
    #[inline(always)]
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Gets the position range of the morpheme in bytes.
    #[inline(always)]
    pub fn range_byte(&self) -> Range<usize> {
        self.range_byte.clone()
    }

    /// Gets the raw feature string.
    #[inline(always)]
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Gets all comma-separated feature fields, each trimmed.
    #[inline(always)]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Gets the `i`-th feature field.
    #[inline(always)]
    pub fn field(&self, i: usize) -> Option<&str> {
        self.fields.get(i).map(String::as_str)
    }

    /// Gets the major part-of-speech category.
    #[inline(always)]
    pub fn pos(&self) -> Option<&str> {
        self.field(self.layout.pos)
    }

    /// Gets the part-of-speech subcategory.
    #[inline(always)]
    pub fn pos_detail(&self) -> Option<&str> {
        self.field(self.layout.pos_detail)
    }

    /// Gets the dictionary (citation) form.
    #[inline(always)]
    pub fn dictionary_form(&self) -> Option<&str> {
        self.field(self.layout.dictionary_form)
    }

    /// Gets the coarse class of the major part-of-speech category.
    pub fn pos_class(&self) -> PosClass {
        self.pos().map_or(PosClass::Other, PosClass::from_pos)
    }

    /// Checks if the morpheme is displayed attached to the preceding one.
    ///
    /// Auxiliary verbs, conjunctive particles, and suffixes attach.
    pub fn attaches(&self) -> bool {
        self.pos_class() == PosClass::AuxiliaryVerb
            || matches!(self.pos_detail(), Some("接続助詞" | "接尾"))
    }

    /// Gets the left connection id.
    #[inline(always)]
    pub fn left_id(&self) -> u16 {
        self.record.left_id
    }

    /// Gets the right connection id.
    #[inline(always)]
    pub fn right_id(&self) -> u16 {
        self.record.right_id
    }

    /// Gets the part-of-speech id.
    #[inline(always)]
    pub fn pos_id(&self) -> u16 {
        self.record.pos_id
    }

    /// Gets the word cost.
    #[inline(always)]
    pub fn word_cost(&self) -> i16 {
        self.record.weight
    }

    /// Gets the total cost from BOS to the morpheme.
    #[inline(always)]
    pub fn total_cost(&self) -> i64 {
        self.total_cost
    }
}
