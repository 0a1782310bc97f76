use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct PersonId(i64);

impl PersonId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }
}
