mod book;
mod person;

pub use self::{book::*, person::*};
