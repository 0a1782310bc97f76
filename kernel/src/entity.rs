mod book;
mod common;
mod person;

pub use self::{book::*, common::*, person::*};
