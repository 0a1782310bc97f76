use crate::KernelError;

/// Hands out connections to the backing store.
///
/// Every operation acquires its own connection; nothing here spans more than
/// one statement, so there is no commit/rollback surface.
#[async_trait::async_trait]
pub trait DatabaseConnection: 'static + Sync + Send {
    type Connection: 'static + Send;
    async fn acquire(&self) -> error_stack::Result<Self::Connection, KernelError>;
}

pub trait DependOnDatabaseConnection: 'static + Sync + Send {
    type DatabaseConnection: DatabaseConnection;
    fn database_connection(&self) -> &Self::DatabaseConnection;
}

impl<T> DependOnDatabaseConnection for T
where
    T: DatabaseConnection,
{
    type DatabaseConnection = T;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        self
    }
}
