//! Builders of small binary dictionaries for tests.
use std::collections::BTreeMap;

use crate::Dictionary;
use crate::common::{CHARSET_LEN, DICTIONARY_MAGIC, DICTIONARY_VERSION};
use crate::dictionary::lexicon::map::trie::DoubleArrayUnit;

#[derive(Default)]
struct TrieNode {
    value: Option<u32>,
    children: BTreeMap<u8, TrieNode>,
}

/// Builds double-array units storing `keys`.
///
/// Index 0 holds the root pointer. Every node gets a distinct base `b`;
/// its accepting unit sits at `b` and the child for byte `c` at `b + c + 1`.
pub fn build_double_array(keys: &[(Vec<u8>, u32)]) -> Vec<DoubleArrayUnit> {
    let mut root = TrieNode::default();
    for (key, value) in keys {
        let mut node = &mut root;
        for &b in key {
            node = node.children.entry(b).or_default();
        }
        node.value = Some(*value);
    }
    let mut units = vec![DoubleArrayUnit::default()];
    let mut used = vec![true];
    let root_base = place(&root, &mut units, &mut used);
    units[0] = DoubleArrayUnit::new(i32::try_from(root_base).unwrap(), 0);
    units
}

fn is_used(used: &[bool], i: usize) -> bool {
    used.get(i).copied().unwrap_or(false)
}

fn place(node: &TrieNode, units: &mut Vec<DoubleArrayUnit>, used: &mut Vec<bool>) -> usize {
    let mut base = 1;
    while is_used(used, base)
        || node
            .children
            .keys()
            .any(|&c| is_used(used, base + usize::from(c) + 1))
    {
        base += 1;
    }
    let last = base + node.children.keys().last().map_or(0, |&c| usize::from(c) + 1);
    if used.len() <= last {
        used.resize(last + 1, false);
        units.resize(last + 1, DoubleArrayUnit::default());
    }
    used[base] = true;
    for &c in node.children.keys() {
        used[base + usize::from(c) + 1] = true;
    }
    if let Some(value) = node.value {
        units[base] = DoubleArrayUnit::new(-1 - i32::try_from(value).unwrap(), base as u32);
    }
    for (&c, child) in &node.children {
        let child_base = place(child, units, used);
        units[base + usize::from(c) + 1] =
            DoubleArrayUnit::new(i32::try_from(child_base).unwrap(), base as u32);
    }
    base
}

/// One lexical entry of a test dictionary.
#[derive(Clone, Debug)]
pub struct TestEntry {
    pub surface: String,
    pub left_id: u16,
    pub right_id: u16,
    pub weight: i16,
    pub feature: String,
}

pub fn entry(surface: &str, left_id: u16, right_id: u16, weight: i16, feature: &str) -> TestEntry {
    TestEntry {
        surface: surface.to_string(),
        left_id,
        right_id,
        weight,
        feature: feature.to_string(),
    }
}

/// Serialized regions of a system dictionary, before the header is attached.
pub struct SysDicParts {
    pub left_size: u32,
    pub right_size: u32,
    pub units: Vec<DoubleArrayUnit>,
    pub tokens: Vec<u8>,
    pub features: Vec<u8>,
    pub num_tokens: u32,
}

impl SysDicParts {
    /// Lays out `entries` as the reference compiler does: tokens grouped by
    /// surface in byte order, each group referenced by `offset << 8 | count`.
    pub fn new(entries: &[TestEntry], left_size: u32, right_size: u32) -> Self {
        let mut groups: BTreeMap<&[u8], Vec<&TestEntry>> = BTreeMap::new();
        for e in entries {
            groups.entry(e.surface.as_bytes()).or_default().push(e);
        }

        let mut keys = vec![];
        let mut tokens = vec![];
        let mut features = vec![];
        let mut num_tokens = 0u32;
        for (surface, group) in groups {
            keys.push((surface.to_vec(), (num_tokens << 8) | group.len() as u32));
            for e in group {
                let offset = features.len() as u32;
                features.extend_from_slice(e.feature.as_bytes());
                features.push(0);
                tokens.extend_from_slice(&e.left_id.to_le_bytes());
                tokens.extend_from_slice(&e.right_id.to_le_bytes());
                tokens.extend_from_slice(&0u16.to_le_bytes());
                tokens.extend_from_slice(&e.weight.to_le_bytes());
                tokens.extend_from_slice(&offset.to_le_bytes());
                tokens.extend_from_slice(&0u32.to_le_bytes());
                num_tokens += 1;
            }
        }

        Self {
            left_size,
            right_size,
            units: build_double_array(&keys),
            tokens,
            features,
            num_tokens,
        }
    }

    /// Serializes with a correct header.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_with(DICTIONARY_VERSION, 0)
    }

    /// Serializes with the given version and `trailing` extra zero bytes,
    /// keeping the magic consistent with the final length.
    pub fn to_bytes_with(&self, version: u32, trailing: usize) -> Vec<u8> {
        let mut da = vec![];
        for unit in &self.units {
            da.extend_from_slice(&unit.base.to_le_bytes());
            da.extend_from_slice(&unit.check.to_le_bytes());
        }
        let total = 40 + CHARSET_LEN + da.len() + self.tokens.len() + self.features.len() + trailing;

        let mut bytes = vec![];
        for field in [
            DICTIONARY_MAGIC ^ total as u32,
            version,
            0,
            self.num_tokens,
            self.left_size,
            self.right_size,
            da.len() as u32,
            self.tokens.len() as u32,
            self.features.len() as u32,
            0,
        ] {
            bytes.extend_from_slice(&field.to_le_bytes());
        }
        let mut charset = b"UTF-8".to_vec();
        charset.resize(CHARSET_LEN, 0);
        bytes.extend_from_slice(&charset);
        bytes.extend_from_slice(&da);
        bytes.extend_from_slice(&self.tokens);
        bytes.extend_from_slice(&self.features);
        bytes.resize(total, 0);
        bytes
    }
}

/// Builds `sys.dic` bytes whose connection ids are bounded by `left_size` and `right_size`.
pub fn build_sysdic(entries: &[TestEntry], left_size: u32, right_size: u32) -> Vec<u8> {
    SysDicParts::new(entries, left_size, right_size).to_bytes()
}

/// Builds `matrix.bin` bytes with zero costs except for the given
/// `(right_id, left_id, cost)` cells.
pub fn build_matrix(num_left: u16, num_right: u16, costs: &[(u16, u16, i16)]) -> Vec<u8> {
    let mut data = vec![0i16; usize::from(num_left) * usize::from(num_right)];
    for &(right_id, left_id, cost) in costs {
        data[usize::from(left_id) * usize::from(num_left) + usize::from(right_id)] = cost;
    }
    let mut bytes = vec![];
    bytes.extend_from_slice(&num_left.to_le_bytes());
    bytes.extend_from_slice(&num_right.to_le_bytes());
    for c in data {
        bytes.extend_from_slice(&c.to_le_bytes());
    }
    bytes
}

/// Builds a dictionary over a square `size` x `size` matrix.
pub fn build_test_dictionary(
    entries: &[TestEntry],
    size: u16,
    costs: &[(u16, u16, i16)],
) -> Dictionary {
    let sysdic = build_sysdic(entries, u32::from(size), u32::from(size));
    let matrix = build_matrix(size, size, costs);
    Dictionary::from_bytes(&sysdic, &matrix).unwrap()
}
