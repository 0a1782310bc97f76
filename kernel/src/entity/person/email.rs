use vodca::{AsRefln, Fromln};

/// Contact address. The store caps it at 100 characters and keeps it unique
/// among live people; nothing is checked before the write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct PersonEmail(String);

impl PersonEmail {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }
}
