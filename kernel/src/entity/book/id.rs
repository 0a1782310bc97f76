use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct BookId(i64);

impl BookId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }
}
