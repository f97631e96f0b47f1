/// Row-major flat N-dimensional grid. No per-cell objects.
/// The last axis varies fastest.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    pub data: Vec<T>,
    dims: Vec<usize>,
    strides: Vec<usize>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(dims: &[usize]) -> Self {
        let strides = strides(dims);
        let len = dims.iter().product();
        Self {
            data: vec![T::default(); len],
            dims: dims.to_vec(),
            strides,
        }
    }
}

impl<T: Copy> Grid<T> {
    /// Wrap existing row-major data. `data.len()` must equal the product of `dims`.
    pub fn from_data(dims: &[usize], data: Vec<T>) -> Option<Self> {
        if data.len() != dims.iter().product::<usize>() {
            return None;
        }
        Some(Self {
            data,
            dims: dims.to_vec(),
            strides: strides(dims),
        })
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn contains(&self, index: &[usize]) -> bool {
        index.len() == self.dims.len() && index.iter().zip(&self.dims).all(|(i, d)| i < d)
    }

    #[inline]
    pub fn idx(&self, index: &[usize]) -> usize {
        debug_assert!(self.contains(index));
        flat_index(index, &self.strides)
    }

    #[inline]
    pub fn get(&self, index: &[usize]) -> T {
        self.data[self.idx(index)]
    }

    #[inline]
    pub fn set(&mut self, index: &[usize], v: T) {
        let i = self.idx(index);
        self.data[i] = v;
    }

    /// Inverse of `idx`.
    pub fn unravel(&self, mut flat: usize) -> Vec<usize> {
        self.strides
            .iter()
            .map(|&s| {
                let i = flat / s;
                flat %= s;
                i
            })
            .collect()
    }
}

/// Row-major strides for `dims`.
pub fn strides(dims: &[usize]) -> Vec<usize> {
    let mut out = vec![1; dims.len()];
    for i in (0..dims.len().saturating_sub(1)).rev() {
        out[i] = out[i + 1] * dims[i + 1];
    }
    out
}

#[inline]
pub fn flat_index(index: &[usize], strides: &[usize]) -> usize {
    index.iter().zip(strides).map(|(i, s)| i * s).sum()
}

/// Lazy Cartesian product of `[0, dims[i])`, in row-major order.
///
/// An empty `dims` yields exactly one empty tuple; any zero-sized axis
/// yields nothing.
#[derive(Clone, Debug)]
pub struct IndexTuples {
    dims: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl IndexTuples {
    pub fn new(dims: &[usize]) -> Self {
        let next = if dims.contains(&0) {
            None
        } else {
            Some(vec![0; dims.len()])
        };
        Self {
            dims: dims.to_vec(),
            next,
        }
    }
}

impl Iterator for IndexTuples {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;
        let mut succ = current.clone();
        for axis in (0..self.dims.len()).rev() {
            succ[axis] += 1;
            if succ[axis] < self.dims[axis] {
                self.next = Some(succ);
                break;
            }
            succ[axis] = 0;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strides_row_major() {
        assert_eq!(strides(&[4, 3, 2]), vec![6, 2, 1]);
        assert_eq!(strides(&[5]), vec![1]);
        assert!(strides(&[]).is_empty());
    }

    #[test]
    fn test_get_set_unravel() {
        let mut g = Grid::<u8>::new(&[3, 4]);
        assert_eq!(g.len(), 12);
        g.set(&[2, 1], 7);
        assert_eq!(g.get(&[2, 1]), 7);
        assert_eq!(g.idx(&[2, 1]), 9);
        assert_eq!(g.unravel(9), vec![2, 1]);
        assert!(!g.contains(&[3, 0]));
        assert!(!g.contains(&[0]));
    }

    #[test]
    fn test_from_data_checks_length() {
        assert!(Grid::from_data(&[2, 2], vec![0u8; 4]).is_some());
        assert!(Grid::from_data(&[2, 2], vec![0u8; 5]).is_none());
    }

    #[test]
    fn test_index_tuples_order() {
        let all: Vec<_> = IndexTuples::new(&[2, 3]).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn test_index_tuples_matches_flat_order() {
        let dims = [3, 2, 4];
        let g = Grid::<u8>::new(&dims);
        for (flat, tuple) in IndexTuples::new(&dims).enumerate() {
            assert_eq!(g.idx(&tuple), flat);
        }
        assert_eq!(IndexTuples::new(&dims).count(), 24);
    }

    #[test]
    fn test_index_tuples_degenerate() {
        assert_eq!(IndexTuples::new(&[]).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(IndexTuples::new(&[3, 0]).count(), 0);
    }
}
