use driver::database::PostgresDatabase;
use std::ops::Deref;
use std::sync::Arc;
use vodca::References;

/// Shared state handed to every route. Cheap to clone.
#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub fn new(pgpool: PostgresDatabase) -> Self {
        Self(Arc::new(Handler::new(pgpool)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    pgpool: PostgresDatabase,
}

impl Handler {
    pub fn new(pgpool: PostgresDatabase) -> Self {
        Self { pgpool }
    }
}
