use vodca::{AsRefln, Fromln};

/// Catalog number printed on the spine. Unique among live books, unrelated to [`BookId`](super::BookId).
#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct CallNumber(i64);

impl CallNumber {
    pub fn new(number: impl Into<i64>) -> Self {
        Self(number.into())
    }
}
