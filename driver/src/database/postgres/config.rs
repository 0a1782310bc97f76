use error_stack::{Report, ResultExt};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use vodca::References;

use kernel::KernelError;

use crate::env;

const DIALECT: &str = "DIALECT";
const HOST: &str = "HOST";
const PORT: &str = "DBPORT";
const USER: &str = "USER";
const DATABASE: &str = "NAME";
const PASSWORD: &str = "PASSWORD";

const SUPPORTED_DIALECTS: &[&str] = &["postgres", "postgresql"];

/// Connection settings. Every value is required, there are no fallbacks.
#[derive(Clone, References)]
pub struct PostgresConfig {
    host: String,
    port: u16,
    user: String,
    database: String,
    password: String,
}

impl PostgresConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        database: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            user: user.into(),
            database: database.into(),
            password: password.into(),
        }
    }

    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        check_dialect(&env(DIALECT)?)?;
        let port = env(PORT)?;
        let port = port
            .parse::<u16>()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("`{PORT}` is not a valid port: {port}"))?;
        Ok(Self::new(
            env(HOST)?,
            port,
            env(USER)?,
            env(DATABASE)?,
            env(PASSWORD)?,
        ))
    }

    pub(in crate::database) fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(PgSslMode::Disable)
    }
}

impl std::fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

fn check_dialect(dialect: &str) -> error_stack::Result<(), KernelError> {
    if SUPPORTED_DIALECTS
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(dialect))
    {
        Ok(())
    } else {
        Err(Report::new(KernelError::Internal)
            .attach_printable(format!("Unsupported database dialect `{dialect}`")))
    }
}

#[cfg(test)]
mod test {
    use super::{check_dialect, PostgresConfig};

    #[test]
    fn accepts_postgres_dialects() {
        assert!(check_dialect("postgres").is_ok());
        assert!(check_dialect("PostgreSQL").is_ok());
    }

    #[test]
    fn rejects_other_dialects() {
        assert!(check_dialect("mysql").is_err());
        assert!(check_dialect("").is_err());
    }

    #[test]
    fn debug_hides_password() {
        let config = PostgresConfig::new("localhost", 5432, "library", "library", "hunter2");
        let printed = format!("{config:?}");
        assert!(printed.contains("localhost"));
        assert!(!printed.contains("hunter2"));
    }
}
