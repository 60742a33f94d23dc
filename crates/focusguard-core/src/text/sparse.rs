//! Sparse feature vectors produced by the vectorizer.

/// A sparse vector stored as `(column, value)` pairs sorted by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from pairs; sorts by column and sums duplicate columns.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_by_key(|&(idx, _)| idx);

        let mut entries: Vec<(usize, f64)> = Vec::with_capacity(pairs.len());
        for (idx, value) in pairs {
            match entries.last_mut() {
                Some((last, acc)) if *last == idx => *acc += value,
                _ => entries.push((idx, value)),
            }
        }

        Self { entries }
    }

    /// Non-zero entries in column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest column index plus one, or zero for an empty vector.
    pub fn min_width(&self) -> usize {
        self.entries.last().map(|&(idx, _)| idx + 1).unwrap_or(0)
    }

    /// Dot product with a dense row. Columns beyond `dense` are ignored.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|&(idx, value)| dense.get(idx).map(|w| w * value))
            .sum()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    /// Scale in place so the norm is one. Zero vectors are left untouched.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, v) in &mut self.entries {
                *v /= norm;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_sorts_and_merges() {
        let v = SparseVector::from_pairs(vec![(3, 1.0), (1, 2.0), (3, 0.5)]);
        let entries: Vec<_> = v.iter().collect();
        assert_eq!(entries, vec![(1, 2.0), (3, 1.5)]);
        assert_eq!(v.min_width(), 4);
    }

    #[test]
    fn test_dot_and_normalize() {
        let mut v = SparseVector::from_pairs(vec![(0, 3.0), (2, 4.0)]);
        assert_eq!(v.dot(&[1.0, 10.0, 1.0]), 7.0);

        v.l2_normalize();
        assert!((v.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_vector() {
        let mut v = SparseVector::default();
        v.l2_normalize();
        assert!(v.is_empty());
        assert_eq!(v.dot(&[1.0]), 0.0);
        assert_eq!(v.min_width(), 0);
    }
}
