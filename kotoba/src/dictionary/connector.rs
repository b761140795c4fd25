use crate::errors::{KotobaError, Result};

pub trait ConnectorView {
    /// Returns maximum number of left connection ID
    fn num_left(&self) -> usize;

    /// Returns maximum number of right connection ID
    fn num_right(&self) -> usize;
}

pub trait ConnectorCost: ConnectorView {
    /// Gets the cost of connecting a word with `right_id` to a following word with `left_id`.
    fn cost(&self, right_id: u16, left_id: u16) -> Result<i32>;
}

/// Matrix of connection costs (`matrix.bin`).
///
/// The serialized form is a sequence of little-endian u16 values:
/// `num_left`, `num_right`, then `num_left * num_right` costs
/// reinterpreted as two's-complement i16.
#[derive(Debug, Clone)]
pub struct ConnectionMatrix {
    data: Vec<i16>,
    num_left: u16,
    num_right: u16,
}

impl ConnectionMatrix {
    /// Creates a matrix from raw u16 values.
    ///
    /// # Errors
    ///
    /// [`KotobaError::InvalidSize`] is returned when the number of costs
    /// is not exactly `num_left * num_right`.
    pub fn from_u16s(values: &[u16]) -> Result<Self> {
        let [num_left, num_right, costs @ ..] = values else {
            return Err(KotobaError::invalid_size(
                "matrix",
                format!("{} values are too few to hold the dimensions", values.len()),
            ));
        };
        let expected = usize::from(*num_left) * usize::from(*num_right);
        if costs.len() != expected {
            return Err(KotobaError::invalid_size(
                "matrix",
                format!(
                    "matrix size is not correct: {} costs for {num_left}x{num_right}",
                    costs.len()
                ),
            ));
        }
        Ok(Self {
            data: costs.iter().map(|&c| c as i16).collect(),
            num_left: *num_left,
            num_right: *num_right,
        })
    }

    /// Creates a matrix from its little-endian serialized bytes.
    ///
    /// # Errors
    ///
    /// [`KotobaError::InvalidSize`] is returned when the byte length is odd
    /// or the dimensions do not match the number of costs.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 2 != 0 {
            return Err(KotobaError::invalid_size(
                "matrix",
                format!("odd byte length {}", bytes.len()),
            ));
        }
        let values: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
            .collect();
        let matrix = Self::from_u16s(&values)?;
        log::debug!(
            "[kotoba] loaded connection matrix: {}x{}",
            matrix.num_left,
            matrix.num_right,
        );
        Ok(matrix)
    }
}

impl ConnectorView for ConnectionMatrix {
    #[inline(always)]
    fn num_left(&self) -> usize {
        usize::from(self.num_left)
    }

    #[inline(always)]
    fn num_right(&self) -> usize {
        usize::from(self.num_right)
    }
}

impl ConnectorCost for ConnectionMatrix {
    /// Looks up `data[left_id * num_left + right_id]`.
    ///
    /// The row stride is `num_left`, and the ids are bounded inclusively by
    /// the declared sizes. This is the addressing the reference dictionaries
    /// were segmented with.
    #[inline(always)]
    fn cost(&self, right_id: u16, left_id: u16) -> Result<i32> {
        if right_id > self.num_right {
            return Err(KotobaError::out_of_range(
                "right_id",
                format!("right id is out of bounds ({right_id} > {})", self.num_right),
            ));
        }
        if left_id > self.num_left {
            return Err(KotobaError::out_of_range(
                "left_id",
                format!("left id is out of bounds ({left_id} > {})", self.num_left),
            ));
        }
        let index = usize::from(left_id) * usize::from(self.num_left) + usize::from(right_id);
        self.data
            .get(index)
            .map(|&c| i32::from(c))
            .ok_or_else(|| {
                KotobaError::out_of_range(
                    "matrix",
                    format!("cell ({right_id}, {left_id}) lies outside the table"),
                )
            })
    }
}
