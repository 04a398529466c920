use mongodb::bson::Bson;
use std::fmt;

/// Normalized identifier so `id` / `user_id` compare the same way whatever BSON type
/// the application wrote (string, int32/int64, integral double, ObjectId...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdKey {
    Str(String),
    Int(i64),
    Other(String),
}

impl IdKey {
    /// `None` for null; a user without id cannot be matched
    pub fn from_bson(value: &Bson) -> Option<Self> {
        match value {
            Bson::Null | Bson::Undefined => None,
            Bson::String(s) => Some(IdKey::Str(s.clone())),
            Bson::Int32(n) => Some(IdKey::Int(i64::from(*n))),
            Bson::Int64(n) => Some(IdKey::Int(*n)),
            Bson::Double(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some(IdKey::Int(*f as i64))
            }
            other => Some(IdKey::Other(other.to_string())),
        }
    }
}

impl fmt::Display for IdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdKey::Str(s) | IdKey::Other(s) => write!(f, "{}", s),
            IdKey::Int(n) => write!(f, "{}", n),
        }
    }
}
