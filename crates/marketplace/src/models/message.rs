//! Direct messages and the conversations that group them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use artconnect_core::{ConversationId, MessageId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

impl Message {
    /// Whether the message travels between `a` and `b`, in either direction.
    #[must_use]
    pub fn is_between(&self, a: &UserId, b: &UserId) -> bool {
        (&self.sender_id == a && &self.receiver_id == b)
            || (&self.sender_id == b && &self.receiver_id == a)
    }
}

/// A conversation between exactly two participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    pub participants: [UserId; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    #[must_use]
    pub fn includes(&self, user_id: &UserId) -> bool {
        self.participants.contains(user_id)
    }

    /// The participant who is not `user_id`.
    #[must_use]
    pub fn other_participant(&self, user_id: &UserId) -> Option<&UserId> {
        self.participants.iter().find(|id| *id != user_id)
    }

    #[must_use]
    pub fn is_between(&self, a: &UserId, b: &UserId) -> bool {
        self.includes(a) && self.includes(b)
    }
}

/// A conversation as seen by one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    #[serde(flatten)]
    pub conversation: Conversation,
    /// Messages addressed to the viewer that are still unread.
    pub unread_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<Participant>,
}

/// Display details for the other side of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: UserId,
    pub name: String,
    pub profile_image: Option<String>,
}
