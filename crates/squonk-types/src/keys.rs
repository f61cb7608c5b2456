//! Registry keys
//!
//! The registry file has a single flat key space shared by two kinds of
//! entries: registrations are stored under the uploader's user id, song
//! lists under the group id. Both are plain strings on disk.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of a registration entry (the uploading user's Telegram id)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserKey(String);

impl UserKey {
    /// Create a key from a Telegram user id
    pub fn from_user_id(user_id: u64) -> Self {
        Self(user_id.to_string())
    }

    /// Get the underlying string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Key of a playlist entry (a chat or channel id)
///
/// Group ids typed by users are stored verbatim, so a `GroupId` is not
/// guaranteed to parse as a chat id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Create a group id from a Telegram chat id
    pub fn from_chat_id(chat_id: i64) -> Self {
        Self(chat_id.to_string())
    }

    /// Get the underlying string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Chat id this group id refers to, if it is numeric
    pub fn chat_id(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<String> for GroupId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for UserKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for GroupId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_key_from_user_id() {
        let key = UserKey::from_user_id(123456789);
        assert_eq!(key.as_str(), "123456789");
    }

    #[test]
    fn test_group_id_from_negative_chat_id() {
        let id = GroupId::from_chat_id(-1001234567890);
        assert_eq!(id.as_str(), "-1001234567890");
        assert_eq!(id.chat_id(), Some(-1001234567890));
    }

    #[test]
    fn test_free_text_group_id_has_no_chat_id() {
        let id = GroupId::from("my-band");
        assert_eq!(id.chat_id(), None);
        assert_eq!(id.to_string(), "my-band");
    }

    #[test]
    fn test_keys_serialize_as_plain_strings() {
        let json = serde_json::to_string(&GroupId::from("-42")).unwrap();
        assert_eq!(json, "\"-42\"");
        let back: UserKey = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(back.as_str(), "7");
    }
}
