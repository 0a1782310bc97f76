use error_stack::Report;
use kernel::KernelError;
use sqlx::Error;

// SQLSTATE codes the database raises for values it refuses to store.
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

pub(crate) trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = classify(&error);
            Report::from(error).change_context(context)
        })
    }
}

fn classify(error: &Error) -> KernelError {
    match error {
        Error::PoolTimedOut => KernelError::Timeout,
        Error::Database(db) if db.is_unique_violation() => KernelError::Conflict,
        Error::Database(db) => match db.code().as_deref() {
            Some(STRING_DATA_RIGHT_TRUNCATION) | Some(NUMERIC_VALUE_OUT_OF_RANGE) => {
                KernelError::Invalid
            }
            _ => KernelError::Internal,
        },
        _ => KernelError::Internal,
    }
}
