use std::ops::Range;

use crate::common::BOS_EOS_CONNECTION_ID;
use crate::dictionary::{ConnectorCost, ConnectorView, SystemLexicon};
use crate::errors::{KotobaError, Result};

const MAX_COST: i64 = i64::MAX;
const INVALID_IDX: usize = usize::MAX;
const BOS_TOKEN_ID: u32 = u32::MAX;

/// The best path found so far ending at a (position, connection class) cell.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    /// Token that ends here; `u32::MAX` for the start sentinel.
    pub token_id: u32,
    pub right_id: u16,
    /// Cumulative cost from the start sentinel.
    pub min_cost: i64,
    /// Cell index of the predecessor; `usize::MAX` for the start sentinel.
    pub prev: usize,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            token_id: BOS_TOKEN_ID,
            right_id: 0,
            min_cost: MAX_COST,
            prev: INVALID_IDX,
        }
    }
}

impl Node {
    #[inline(always)]
    pub fn is_connected_to_bos(&self) -> bool {
        self.min_cost != MAX_COST
    }

    #[inline(always)]
    pub fn is_bos(&self) -> bool {
        self.prev == INVALID_IDX
    }
}

/// One step of the best path.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PathEntry {
    pub range_byte: (usize, usize),
    pub token_id: u32,
    pub total_cost: i64,
}

impl PathEntry {
    #[inline(always)]
    pub fn range_byte(&self) -> Range<usize> {
        self.range_byte.0..self.range_byte.1
    }
}

#[derive(Clone, Copy)]
struct Candidate {
    token_id: u32,
    left_id: u16,
    right_id: u16,
    weight: i16,
    end_byte: usize,
}

/// Lattice over the byte positions of one input.
///
/// Cells form a two-dimensional arena indexed by (end position, class slot),
/// where slots enumerate the connection classes observed in this input.
pub struct Lattice {
    len_byte: usize,
    width: usize,
    cells: Vec<Node>,
    /// Filled slots of each position, in order of first insertion.
    ends: Vec<Vec<usize>>,
    eos: usize,
}

impl Lattice {
    /// Finds the minimum-cost segmentation of `input`.
    ///
    /// # Errors
    ///
    /// - [`KotobaError::NoParse`] if no chain of dictionary words covers the input.
    /// - [`KotobaError::OutOfRange`] if a connection id falls outside the matrix.
    pub fn build<C>(lexicon: &SystemLexicon, connector: &C, input: &[u8]) -> Result<Self>
    where
        C: ConnectorCost,
    {
        let len_byte = input.len();

        // Slot 0 is reserved for the class of the start sentinel.
        let mut slot_of = vec![INVALID_IDX; connector.num_right() + 1];
        let bos_slot = slot_of.get_mut(usize::from(BOS_EOS_CONNECTION_ID)).ok_or_else(|| {
            KotobaError::out_of_range("connector", "matrix has no room for the BOS class")
        })?;
        *bos_slot = 0;
        let mut width = 1;

        let mut candidates: Vec<Vec<Candidate>> = Vec::with_capacity(len_byte);
        for start in 0..len_byte {
            let mut here = vec![];
            for m in lexicon.common_prefix_iterator(&input[start..]) {
                if m.end_byte == 0 {
                    continue;
                }
                let slot = slot_of.get_mut(usize::from(m.record.right_id)).ok_or_else(|| {
                    KotobaError::out_of_range(
                        "right_id",
                        format!(
                            "right id is out of bounds ({} > {})",
                            m.record.right_id,
                            connector.num_right(),
                        ),
                    )
                })?;
                if *slot == INVALID_IDX {
                    *slot = width;
                    width += 1;
                }
                here.push(Candidate {
                    token_id: m.token_id,
                    left_id: m.record.left_id,
                    right_id: m.record.right_id,
                    weight: m.record.weight,
                    end_byte: start + m.end_byte,
                });
            }
            candidates.push(here);
        }

        log::debug!(
            "[kotoba] building lattice: {len_byte} bytes x {width} classes"
        );

        let mut lattice = Self {
            len_byte,
            width,
            cells: vec![Node::default(); (len_byte + 1) * width],
            ends: vec![vec![]; len_byte + 1],
            eos: INVALID_IDX,
        };
        lattice.insert_bos();

        for (start, here) in candidates.iter().enumerate() {
            if !lattice.has_previous_node(start) {
                continue;
            }
            for cand in here {
                let slot = slot_of[usize::from(cand.right_id)];
                for i in 0..lattice.ends[start].len() {
                    let lidx = start * width + lattice.ends[start][i];
                    let lnode = lattice.cells[lidx];
                    debug_assert!(lnode.is_connected_to_bos());
                    let conn_cost = connector.cost(lnode.right_id, cand.left_id)?;
                    let total = lnode.min_cost + i64::from(conn_cost) + i64::from(cand.weight);
                    lattice.relax(cand.end_byte, slot, total, lidx, cand);
                }
            }
        }

        lattice.insert_eos()?;
        Ok(lattice)
    }

    fn insert_bos(&mut self) {
        self.cells[0] = Node {
            token_id: BOS_TOKEN_ID,
            right_id: BOS_EOS_CONNECTION_ID,
            min_cost: 0,
            prev: INVALID_IDX,
        };
        self.ends[0].push(0);
    }

    /// Records the path through `prev` if it is strictly cheaper than the current one.
    #[inline(always)]
    fn relax(&mut self, end_byte: usize, slot: usize, total: i64, prev: usize, cand: &Candidate) {
        let idx = end_byte * self.width + slot;
        let cell = &mut self.cells[idx];
        if total < cell.min_cost {
            if !cell.is_connected_to_bos() {
                self.ends[end_byte].push(slot);
            }
            *cell = Node {
                token_id: cand.token_id,
                right_id: cand.right_id,
                min_cost: total,
                prev,
            };
        }
    }

    /// Picks the cheapest node at the last position; the first one wins on ties.
    fn insert_eos(&mut self) -> Result<()> {
        let base = self.len_byte * self.width;
        let mut eos = INVALID_IDX;
        let mut min_cost = MAX_COST;
        for &slot in &self.ends[self.len_byte] {
            let node = &self.cells[base + slot];
            if eos == INVALID_IDX || node.min_cost < min_cost {
                min_cost = node.min_cost;
                eos = base + slot;
            }
        }
        if eos == INVALID_IDX {
            return Err(KotobaError::NoParse {
                len_byte: self.len_byte,
            });
        }
        self.eos = eos;
        Ok(())
    }

    /// Returns the number of bytes of the input.
    #[inline(always)]
    pub const fn len_byte(&self) -> usize {
        self.len_byte
    }

    /// Returns the number of connection classes observed in the input.
    #[inline(always)]
    pub const fn num_classes(&self) -> usize {
        self.width
    }

    /// Gets the node terminating the best path.
    #[inline(always)]
    pub fn eos_node(&self) -> &Node {
        &self.cells[self.eos]
    }

    /// Checks if any path ends at byte position `i`.
    #[inline(always)]
    pub fn has_previous_node(&self, i: usize) -> bool {
        self.ends.get(i).map(|d| !d.is_empty()).unwrap_or(false)
    }

    /// Walks the best path back to the start sentinel, returning it from left to right.
    pub fn backtrace(&self) -> Vec<PathEntry> {
        let mut path = vec![];
        let mut idx = self.eos;
        loop {
            let node = &self.cells[idx];
            if node.is_bos() {
                break;
            }
            path.push(PathEntry {
                range_byte: (node.prev / self.width, idx / self.width),
                token_id: node.token_id,
                total_cost: node.min_cost,
            });
            idx = node.prev;
        }
        path.reverse();
        path
    }
}

impl std::fmt::Debug for Lattice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Lattice {{ eos: {}, ends: [", self.eos)?;
        for (i, slots) in self.ends.iter().enumerate() {
            let nodes: Vec<_> = slots
                .iter()
                .map(|&slot| &self.cells[i * self.width + slot])
                .collect();
            writeln!(f, "{i} => {nodes:?}")?;
        }
        writeln!(f, "]}}")
    }
}
