//! Binary indexed tree over counts
//!
//! Positions are 1-based: cell `i` aggregates the raw positions
//! `(i - lowbit(i), i]`. Position 0 is never stored and `prefix_sum(0)` is 0.

use crate::base::{lowbit, Count, Len};
use crate::error::{check_range, Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenwickTree {
    /// N + 1 cells, cell 0 is unused
    cells: Vec<Count>,
}

impl FenwickTree {
    /// Creates a tree with `size` positions, all zero
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![0; size + 1],
        }
    }

    /// Adds `delta` at position `index` (1 ≤ index ≤ N)
    ///
    /// Fails without modifying the tree if the index is out of range, if a
    /// negative delta would bring the position below zero, or if a cell would
    /// overflow.
    pub fn update(&mut self, index: usize, delta: i64) -> Result<()> {
        let size = self.len();
        check_range(index, 1, size)?;

        if delta < 0 {
            // Every ancestor cell holds at least the raw value of `index`
            let current = self.point_value(index)?;
            if current < delta.unsigned_abs() {
                return Err(Error::NegativeCount { index });
            }
        }

        let mut i = index;
        while i <= size {
            if self.cells[i].checked_add_signed(delta).is_none() {
                return Err(Error::CountOverflow { index: i });
            }
            i += lowbit(i);
        }

        let mut i = index;
        while i <= size {
            self.cells[i] = self.cells[i].wrapping_add_signed(delta);
            i += lowbit(i);
        }
        Ok(())
    }

    /// Sum of the positions `1..=index` (0 ≤ index ≤ N)
    pub fn prefix_sum(&self, index: usize) -> Result<Count> {
        check_range(index, 0, self.len())?;

        let mut total = 0;
        let mut i = index;
        while i > 0 {
            total += self.cells[i];
            i -= lowbit(i);
        }
        Ok(total)
    }

    /// Raw value at position `index` (1 ≤ index ≤ N)
    ///
    /// Cell `index` covers `(z, index]` with `z = index - lowbit(index)`; the
    /// cells met when walking down from `index - 1` to `z` partition
    /// `(z, index - 1]`, so subtracting them leaves the value at `index`.
    pub fn point_value(&self, index: usize) -> Result<Count> {
        check_range(index, 1, self.len())?;

        let mut total = self.cells[index];
        let z = index - lowbit(index);
        let mut i = index - 1;
        while i != z {
            total -= self.cells[i];
            i -= lowbit(i);
        }
        Ok(total)
    }

    /// Adds the positions of `other` to this tree
    ///
    /// Updates are linear, so summing cells is the same as replaying all the
    /// updates of `other` on this tree.
    pub fn merge(&mut self, other: &FenwickTree) -> Result<()> {
        if self.cells.len() != other.cells.len() {
            return Err(Error::SizeMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        let merged = self
            .cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .map(|(index, (cell, value))| {
                cell.checked_add(*value)
                    .ok_or(Error::CountOverflow { index })
            })
            .collect::<Result<Vec<Count>>>()?;
        self.cells = merged;
        Ok(())
    }

    /// Raw positions `1..=N`
    pub fn to_vec(&self) -> Vec<Count> {
        (1..=self.len())
            .map(|index| self.point_value(index).unwrap_or_default())
            .collect()
    }
}

impl Len for FenwickTree {
    fn len(&self) -> usize {
        self.cells.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::FenwickTree;
    use crate::base::Len;
    use crate::error::Error;

    fn from_values(values: &[u64]) -> FenwickTree {
        let mut tree = FenwickTree::new(values.len());
        for (ix, value) in values.iter().enumerate() {
            tree.update(ix + 1, *value as i64).unwrap();
        }
        tree
    }

    #[test]
    fn test_prefix_sum() {
        let values = [3, 0, 2, 7, 1, 0, 4, 5, 9, 1, 1, 0, 2];
        let tree = from_values(&values);

        assert_eq!(tree.prefix_sum(0).unwrap(), 0);
        let mut expected = 0;
        for index in 1..=values.len() {
            expected += values[index - 1];
            assert_eq!(
                tree.prefix_sum(index).unwrap(),
                expected,
                "prefix sum at {}",
                index
            );
        }
    }

    #[test]
    fn test_point_value() {
        // 16 positions so that every subtree shape (including the root) is hit
        let values: Vec<u64> = (0..16).map(|i| (i * 7 + 3) % 5).collect();
        let tree = from_values(&values);

        for index in 1..=values.len() {
            assert_eq!(
                tree.point_value(index).unwrap(),
                values[index - 1],
                "point value at {}",
                index
            );
        }
        assert_eq!(tree.to_vec(), values);
    }

    #[test]
    fn test_point_value_after_decrements() {
        let mut tree = from_values(&[1, 1, 1, 1, 1, 1, 1]);
        tree.update(4, -1).unwrap();
        tree.update(6, 2).unwrap();
        tree.update(7, -1).unwrap();

        assert_eq!(tree.to_vec(), vec![1, 1, 1, 0, 1, 3, 0]);
        assert_eq!(tree.prefix_sum(7).unwrap(), 7);
    }

    #[test]
    fn test_out_of_range() {
        let mut tree = FenwickTree::new(4);

        assert_eq!(
            tree.update(0, 1),
            Err(Error::OutOfRange {
                index: 0,
                min: 1,
                max: 4
            })
        );
        assert!(tree.update(5, 1).is_err());
        assert!(tree.prefix_sum(5).is_err());
        assert!(tree.point_value(0).is_err());
        assert!(tree.point_value(5).is_err());

        // Cannot go below zero, and nothing is modified
        tree.update(3, 1).unwrap();
        assert!(tree.update(3, -2).is_err());
        assert_eq!(tree.to_vec(), vec![0, 0, 1, 0]);
    }

    #[test]
    fn test_empty() {
        let tree = FenwickTree::new(0);
        assert!(tree.is_empty());
        assert_eq!(tree.prefix_sum(0).unwrap(), 0);
        assert!(tree.point_value(1).is_err());
        assert!(tree.to_vec().is_empty());
    }

    #[test]
    fn test_overflow() {
        let mut tree = FenwickTree::new(2);
        tree.update(1, i64::MAX).unwrap();
        tree.update(1, i64::MAX).unwrap();

        // Cells 1 and 2 both hold 2 * i64::MAX
        assert_eq!(tree.update(1, i64::MAX), Err(Error::CountOverflow { index: 1 }));
        assert_eq!(tree.update(2, 2), Err(Error::CountOverflow { index: 2 }));
        assert_eq!(tree.to_vec(), vec![2 * i64::MAX as u64, 0]);

        let mut other = FenwickTree::new(2);
        other.update(2, 2).unwrap();
        assert_eq!(tree.merge(&other), Err(Error::CountOverflow { index: 2 }));
        assert_eq!(tree.to_vec(), vec![2 * i64::MAX as u64, 0]);
    }

    #[test]
    fn test_merge() {
        let mut left = from_values(&[1, 0, 2, 5, 0]);
        let right = from_values(&[0, 3, 1, 0, 4]);
        left.merge(&right).unwrap();
        assert_eq!(left.to_vec(), vec![1, 3, 3, 5, 4]);

        assert_eq!(
            left.merge(&FenwickTree::new(3)),
            Err(Error::SizeMismatch {
                expected: 5,
                found: 3
            })
        );
    }
}
