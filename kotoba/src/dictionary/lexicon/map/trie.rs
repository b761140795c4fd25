use crate::utils::FromU32;

/// Transition unit of a double-array trie.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct DoubleArrayUnit {
    pub base: i32,
    pub check: u32,
}

impl DoubleArrayUnit {
    #[inline(always)]
    pub const fn new(base: i32, check: u32) -> Self {
        Self { base, check }
    }

    /// Checks if this unit, stored at `index`, is the accepting unit of a node.
    ///
    /// An accepting unit refers to itself through `check` and stores
    /// a negated value in `base`.
    #[inline(always)]
    pub fn is_leaf_at(&self, index: usize) -> bool {
        self.base < 0 && usize::from_u32(self.check) == index
    }

    /// Gets the value stored in an accepting unit.
    #[inline(always)]
    pub const fn value(&self) -> u32 {
        debug_assert!(self.base < 0);
        (-1 - self.base) as u32
    }
}

/// Read-only double-array trie over bytes.
pub struct Trie {
    units: Vec<DoubleArrayUnit>,
}

impl Trie {
    pub const fn new(units: Vec<DoubleArrayUnit>) -> Self {
        Self { units }
    }

    #[inline(always)]
    pub fn num_units(&self) -> usize {
        self.units.len()
    }

    /// Iterates over the values of all accepting units with their indices.
    pub fn leaves(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.units
            .iter()
            .enumerate()
            .filter(|(i, unit)| unit.is_leaf_at(*i))
            .map(|(i, unit)| (i, unit.value()))
    }

    /// Returns the keys that are prefixes of `input`, shortest first.
    #[inline(always)]
    pub fn common_prefix_iterator<'a>(&'a self, input: &'a [u8]) -> CommonPrefixIter<'a> {
        let base = self
            .units
            .first()
            .and_then(|root| usize::try_from(root.base).ok());
        CommonPrefixIter {
            units: &self.units,
            input,
            base: base.unwrap_or_default(),
            pos: 0,
            leaf_checked: false,
            done: base.is_none(),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct TrieMatch {
    pub value: u32,
    pub end_byte: usize,
}

impl TrieMatch {
    #[inline(always)]
    pub const fn new(value: u32, end_byte: usize) -> Self {
        Self { value, end_byte }
    }
}

pub struct CommonPrefixIter<'a> {
    units: &'a [DoubleArrayUnit],
    input: &'a [u8],
    base: usize,
    pos: usize,
    leaf_checked: bool,
    done: bool,
}

impl CommonPrefixIter<'_> {
    /// Moves to the child labeled by the next input byte.
    #[inline(always)]
    fn advance(&mut self) -> bool {
        let Some(&byte) = self.input.get(self.pos) else {
            return false;
        };
        let next = self.base + usize::from(byte) + 1;
        match self.units.get(next) {
            Some(unit) if usize::from_u32(unit.check) == self.base => {
                match usize::try_from(unit.base) {
                    Ok(base) => {
                        self.base = base;
                        self.pos += 1;
                        self.leaf_checked = false;
                        true
                    }
                    Err(_) => false,
                }
            }
            _ => false,
        }
    }
}

impl Iterator for CommonPrefixIter<'_> {
    type Item = TrieMatch;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if !self.leaf_checked {
                self.leaf_checked = true;
                if let Some(unit) = self.units.get(self.base)
                    && unit.is_leaf_at(self.base)
                {
                    return Some(TrieMatch::new(unit.value(), self.pos));
                }
            }
            if !self.advance() {
                self.done = true;
            }
        }
        None
    }
}
