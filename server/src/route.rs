mod book;
mod person;

pub use self::{book::*, person::*};

use crate::handler::AppModule;

/// Every endpoint of the service, waiting for its state.
pub fn routes() -> axum::Router<AppModule> {
    axum::Router::new().route_person().route_book()
}
