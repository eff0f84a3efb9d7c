/// Watch depth of a user: number of distinct tracked videos watched
pub type Depth = usize;

/// Number of users (or of recorded watches)
pub type Count = u64;

pub type BoxResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Marks object that have a length
pub trait Len {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lowest set bit of a (1-based) Fenwick index
#[inline]
pub(crate) fn lowbit(index: usize) -> usize {
    index & index.wrapping_neg()
}
