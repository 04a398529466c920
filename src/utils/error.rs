use mongodb::error::ErrorKind;
use std::fmt;

/// MongoDB server codes for index definition conflicts
const INDEX_OPTIONS_CONFLICT: i32 = 85;
const INDEX_KEY_SPECS_CONFLICT: i32 = 86;
const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug)]
pub enum AuditError {
    Connection(String),
    IndexConflict(String),
    DuplicateKey(String),
    Database(String),
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditError::Connection(msg) => write!(f, "Connection error: {}", msg),
            AuditError::IndexConflict(msg) => write!(f, "Index conflict: {}", msg),
            AuditError::DuplicateKey(msg) => write!(f, "Duplicate key: {}", msg),
            AuditError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for AuditError {}

impl AuditError {
    /// Classifica pelo código retornado pelo servidor
    pub fn from_code(code: i32, message: String) -> Self {
        match code {
            INDEX_OPTIONS_CONFLICT | INDEX_KEY_SPECS_CONFLICT => AuditError::IndexConflict(message),
            DUPLICATE_KEY => AuditError::DuplicateKey(message),
            _ => AuditError::Database(message),
        }
    }
}

impl From<mongodb::error::Error> for AuditError {
    fn from(err: mongodb::error::Error) -> Self {
        match *err.kind {
            ErrorKind::Command(ref command_error) => {
                AuditError::from_code(command_error.code, command_error.message.clone())
            }
            _ => AuditError::Database(err.to_string()),
        }
    }
}
