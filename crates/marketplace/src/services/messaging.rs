//! Direct messaging between users.
//!
//! Conversation access is scoped to participants: a conversation the viewer
//! is not part of is reported as not found.

use thiserror::Error;

use artconnect_core::{ConversationId, UserId};

use crate::db::messages::MessageRepository;
use crate::db::users::UserRepository;
use crate::db::{Database, RepositoryError};
use crate::models::{Conversation, ConversationSummary, Message, Participant};

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("message content is empty")]
    EmptyContent,

    #[error("cannot send a message to yourself")]
    MessageToSelf,

    #[error("recipient not found")]
    RecipientNotFound,

    #[error("conversation not found")]
    ConversationNotFound,

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

pub struct MessagingService<'a> {
    messages: MessageRepository<'a>,
    users: UserRepository<'a>,
}

impl<'a> MessagingService<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self {
            messages: MessageRepository::new(db),
            users: UserRepository::new(db),
        }
    }

    /// The viewer's conversations, newest activity first, with the other
    /// participant's display details attached.
    pub async fn conversations(&self, viewer: &UserId) -> Vec<ConversationSummary> {
        let mut summaries = self.messages.user_conversations(viewer).await;

        for summary in &mut summaries {
            if let Some(other) = summary.conversation.other_participant(viewer) {
                summary.participant = self.users.get_by_id(other).await.map(|user| Participant {
                    id: user.id,
                    name: user.name,
                    profile_image: user.profile.profile_image,
                });
            }
        }

        summaries
    }

    /// A conversation and its messages, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::ConversationNotFound` if the conversation does
    /// not exist or `viewer` is not a participant.
    pub async fn conversation_messages(
        &self,
        id: &ConversationId,
        viewer: &UserId,
    ) -> Result<(Conversation, Vec<Message>), MessagingError> {
        let conversation = self.participant_conversation(id, viewer).await?;
        let messages = self
            .messages
            .conversation_messages(id)
            .await
            .map_err(not_found_as_conversation)?;
        Ok((conversation, messages))
    }

    /// Mark messages addressed to `viewer` in this conversation as read.
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::ConversationNotFound` if the conversation does
    /// not exist or `viewer` is not a participant.
    pub async fn mark_as_read(
        &self,
        id: &ConversationId,
        viewer: &UserId,
    ) -> Result<usize, MessagingError> {
        self.participant_conversation(id, viewer).await?;
        let updated = self
            .messages
            .mark_as_read(id, viewer)
            .await
            .map_err(not_found_as_conversation)?;
        tracing::debug!(conversation_id = %id, updated, "Marked messages as read");
        Ok(updated)
    }

    /// Send a message, opening a conversation if the pair has none yet.
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::EmptyContent` for blank content,
    /// `MessagingError::MessageToSelf` when sender and receiver match and
    /// `MessagingError::RecipientNotFound` for an unknown receiver.
    pub async fn send(
        &self,
        sender: &UserId,
        receiver: &UserId,
        content: &str,
    ) -> Result<Message, MessagingError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(MessagingError::EmptyContent);
        }
        if sender == receiver {
            return Err(MessagingError::MessageToSelf);
        }
        if self.users.get_by_id(receiver).await.is_none() {
            return Err(MessagingError::RecipientNotFound);
        }

        let (message, conversation) = self.messages.create_message(sender, receiver, content).await;
        tracing::info!(
            message_id = %message.id,
            conversation_id = %conversation.id,
            "Message sent"
        );
        Ok(message)
    }

    async fn participant_conversation(
        &self,
        id: &ConversationId,
        viewer: &UserId,
    ) -> Result<Conversation, MessagingError> {
        self.messages
            .conversation(id)
            .await
            .filter(|c| c.includes(viewer))
            .ok_or(MessagingError::ConversationNotFound)
    }
}

fn not_found_as_conversation(err: RepositoryError) -> MessagingError {
    match err {
        RepositoryError::NotFound => MessagingError::ConversationNotFound,
        other => MessagingError::Repository(other),
    }
}
