use serde::{Deserialize, Serialize};

/// Persisted session as written by the host application. Only the
/// username is read here; any other fields are ignored.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SessionRecord {
    pub username: String,
}

impl SessionRecord {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// The username worth hydrating, if any. Empty names are skipped.
    pub fn username(&self) -> Option<&str> {
        if self.username.is_empty() {
            None
        } else {
            Some(&self.username)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_extra_fields() {
        let record: SessionRecord =
            serde_json::from_str(r#"{"username":"alice","token":"abc","role":"user"}"#).unwrap();
        assert_eq!(record.username(), Some("alice"));
    }

    #[test]
    fn empty_username_is_not_hydrated() {
        assert_eq!(SessionRecord::new("").username(), None);
    }

    #[test]
    fn missing_username_fails_to_parse() {
        assert!(serde_json::from_str::<SessionRecord>(r#"{"token":"abc"}"#).is_err());
    }
}
