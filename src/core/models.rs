use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// The logged-in user. Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserIdentity {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One entry of the directory surface, built from the chat list or a search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub contact_email: String,
    pub first_name: String,
    pub last_name: String,
}

impl ConversationSummary {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<&UserIdentity> for ConversationSummary {
    fn from(user: &UserIdentity) -> Self {
        ConversationSummary {
            contact_email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Server timestamps arrive either as text or as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

impl Timestamp {
    pub fn to_local(&self) -> Option<DateTime<Local>> {
        match self {
            Timestamp::Millis(ms) => Utc
                .timestamp_millis_opt(*ms)
                .single()
                .map(|t| t.with_timezone(&Local)),
            Timestamp::Text(s) => {
                if let Ok(t) = DateTime::parse_from_rfc3339(s) {
                    return Some(t.with_timezone(&Local));
                }
                // SQLite CURRENT_TIMESTAMP style, always UTC
                NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                    .ok()
                    .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(&Local))
            }
        }
    }

    /// Local time of day, or the raw value when it cannot be parsed.
    pub fn time_of_day(&self) -> String {
        match (self.to_local(), self) {
            (Some(t), _) => t.format("%H:%M:%S").to_string(),
            (None, Timestamp::Text(s)) => s.clone(),
            (None, Timestamp::Millis(ms)) => ms.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub sender_email: String,
    pub receiver_email: String,
    pub message: String,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub attachment_type: Option<String>,
    #[serde(default)]
    pub attachment_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

impl ChatMessage {
    pub fn direction(&self, me: &str) -> Direction {
        if self.sender_email == me {
            Direction::Sent
        } else {
            Direction::Received
        }
    }

    pub fn attachment_label(&self) -> Option<String> {
        self.attachment_type.as_ref()?;
        let name = self.attachment_name.as_deref().unwrap_or("unnamed");
        Some(format!("📎 File: {name}"))
    }
}

/// Body of `POST /send-message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    pub sender_email: String,
    pub receiver_email: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Wire envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CheckUserResponse {
    pub exists: bool,
}

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub chats: Vec<ConversationSummary>,
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub users: Vec<UserIdentity>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearChatRequest<'a> {
    pub user_email: &'a str,
    pub friend_email: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_parses_wire_shape() {
        let json = r#"{
            "senderEmail": "a@x.com",
            "receiverEmail": "b@x.com",
            "message": "hi",
            "timestamp": "2024-03-01T10:15:30Z",
            "attachmentType": "image/png",
            "attachmentName": "cat.png"
        }"#;
        let msg: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.sender_email, "a@x.com");
        assert_eq!(msg.attachment_label().as_deref(), Some("📎 File: cat.png"));
        assert_eq!(msg.direction("a@x.com"), Direction::Sent);
        assert_eq!(msg.direction("b@x.com"), Direction::Received);
    }

    #[test]
    fn message_without_attachment() {
        let json = r#"{"senderEmail":"a","receiverEmail":"b","message":"m","timestamp":0}"#;
        let msg: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.timestamp, Timestamp::Millis(0));
        assert!(msg.attachment_label().is_none());
    }

    #[test]
    fn timestamp_formats() {
        assert!(Timestamp::Text("2024-03-01T10:15:30.000Z".into()).to_local().is_some());
        assert!(Timestamp::Text("2024-03-01 10:15:30".into()).to_local().is_some());
        assert!(Timestamp::Millis(1_700_000_000_000).to_local().is_some());
        assert_eq!(Timestamp::Text("yesterday".into()).time_of_day(), "yesterday");
    }

    #[test]
    fn outgoing_uses_camel_case() {
        let out = OutgoingMessage {
            sender_email: "a@x.com".into(),
            receiver_email: "b@x.com".into(),
            message: "yo".into(),
        };
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v["senderEmail"], "a@x.com");
        assert_eq!(v["receiverEmail"], "b@x.com");
    }

    #[test]
    fn summary_from_user() {
        let user = UserIdentity {
            email: "b@x.com".into(),
            first_name: "Bob".into(),
            last_name: "Lee".into(),
        };
        let s = ConversationSummary::from(&user);
        assert_eq!(s.contact_email, "b@x.com");
        assert_eq!(s.display_name(), "Bob Lee");
    }
}
