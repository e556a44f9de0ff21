//! The user record.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A stored user.
///
/// `id` and `created_at` are assigned by the store at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: u32,
    /// RFC 3339, UTC, second precision.
    pub created_at: String,
}

impl Record {
    /// Build a record with a fresh identifier and the current timestamp.
    pub(crate) fn new(name: String, email: String, age: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            age,
            created_at: timestamp_now(),
        }
    }
}

fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_fields() {
        let record = Record::new("Ann".into(), "ann@x.com".into(), 30);
        assert_eq!(record.name, "Ann");
        assert_eq!(record.email, "ann@x.com");
        assert_eq!(record.age, 30);
        assert!(Uuid::parse_str(&record.id).is_ok());
    }

    #[test]
    fn test_timestamp_format() {
        let record = Record::new("Ann".into(), "ann@x.com".into(), 30);
        assert!(chrono::DateTime::parse_from_rfc3339(&record.created_at).is_ok());
        assert!(record.created_at.ends_with('Z'));
    }
}
