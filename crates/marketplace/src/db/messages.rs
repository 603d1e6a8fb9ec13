//! Message and conversation repository.

use chrono::Utc;
use uuid::Uuid;

use artconnect_core::{ConversationId, MessageId, UserId};

use super::{Database, MessageTables, RepositoryError};
use crate::models::{Conversation, ConversationSummary, Message};

/// Repository for direct messaging.
pub struct MessageRepository<'a> {
    db: &'a Database,
}

impl MessageTables {
    fn find_conversation(&self, id: &ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| &c.id == id)
    }

    fn messages_in<'m>(
        &'m self,
        conversation: &'m Conversation,
    ) -> impl Iterator<Item = &'m Message> + 'm {
        let [a, b] = &conversation.participants;
        self.messages.iter().filter(move |m| m.is_between(a, b))
    }
}

impl<'a> MessageRepository<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Conversations that include `user_id`, most recently updated first.
    ///
    /// The unread count covers messages addressed to `user_id` only.
    /// `participant` is left empty for the caller to resolve.
    pub async fn user_conversations(&self, user_id: &UserId) -> Vec<ConversationSummary> {
        let tables = self.db.messaging.read().await;

        let mut summaries: Vec<ConversationSummary> = tables
            .conversations
            .iter()
            .filter(|c| c.includes(user_id))
            .map(|conversation| ConversationSummary {
                unread_count: tables
                    .messages_in(conversation)
                    .filter(|m| &m.receiver_id == user_id && !m.read)
                    .count(),
                conversation: conversation.clone(),
                participant: None,
            })
            .collect();

        summaries.sort_by(|a, b| b.conversation.updated_at.cmp(&a.conversation.updated_at));
        summaries
    }

    pub async fn conversation(&self, id: &ConversationId) -> Option<Conversation> {
        self.db
            .messaging
            .read()
            .await
            .find_conversation(id)
            .cloned()
    }

    /// Messages between the conversation's participants, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown conversation.
    pub async fn conversation_messages(
        &self,
        id: &ConversationId,
    ) -> Result<Vec<Message>, RepositoryError> {
        let tables = self.db.messaging.read().await;
        let conversation = tables
            .find_conversation(id)
            .ok_or(RepositoryError::NotFound)?;

        let mut messages: Vec<Message> = tables.messages_in(conversation).cloned().collect();
        messages.sort_by_key(|m| m.timestamp);
        Ok(messages)
    }

    pub async fn conversation_between(&self, a: &UserId, b: &UserId) -> Option<Conversation> {
        self.db
            .messaging
            .read()
            .await
            .conversations
            .iter()
            .find(|c| c.is_between(a, b))
            .cloned()
    }

    /// Append a message and bump (or open) the conversation it belongs to.
    pub async fn create_message(
        &self,
        sender_id: &UserId,
        receiver_id: &UserId,
        content: &str,
    ) -> (Message, Conversation) {
        let mut tables = self.db.messaging.write().await;
        let now = Utc::now();

        let message = Message {
            id: MessageId::new(format!("msg_{}", Uuid::new_v4())),
            sender_id: sender_id.clone(),
            receiver_id: receiver_id.clone(),
            content: content.to_string(),
            timestamp: now,
            read: false,
        };
        tables.messages.push(message.clone());

        let conversation = if let Some(existing) = tables
            .conversations
            .iter_mut()
            .find(|c| c.is_between(sender_id, receiver_id))
        {
            existing.last_message = Some(message.clone());
            existing.updated_at = now;
            existing.clone()
        } else {
            let conversation = Conversation {
                id: ConversationId::new(format!("conv_{}", Uuid::new_v4())),
                participants: [sender_id.clone(), receiver_id.clone()],
                last_message: Some(message.clone()),
                created_at: now,
                updated_at: now,
            };
            tables.conversations.push(conversation.clone());
            conversation
        };

        (message, conversation)
    }

    /// Mark every message the other participant sent to `user_id` as read.
    ///
    /// Returns how many messages changed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown conversation.
    pub async fn mark_as_read(
        &self,
        id: &ConversationId,
        user_id: &UserId,
    ) -> Result<usize, RepositoryError> {
        let mut tables = self.db.messaging.write().await;
        let conversation = tables
            .find_conversation(id)
            .ok_or(RepositoryError::NotFound)?;
        let Some(other) = conversation.other_participant(user_id).cloned() else {
            return Ok(0);
        };

        let mut updated = 0;
        for message in &mut tables.messages {
            if message.sender_id == other && &message.receiver_id == user_id && !message.read {
                message.read = true;
                updated += 1;
            }
        }

        // Keep the embedded last message consistent with the table.
        if let Some(conversation) = tables.conversations.iter_mut().find(|c| &c.id == id)
            && let Some(last) = conversation.last_message.as_mut()
            && last.sender_id == other
            && &last.receiver_id == user_id
        {
            last.read = true;
        }

        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn seeded() -> Database {
        Database::seeded().unwrap()
    }

    #[tokio::test]
    async fn test_user_conversations_only_include_participant() {
        let db = seeded();
        let repo = MessageRepository::new(&db);
        let alex = UserId::new("2");

        let summaries = repo.user_conversations(&alex).await;
        assert_eq!(summaries.len(), 2);
        assert!(summaries.iter().all(|s| s.conversation.includes(&alex)));
        // Most recently updated first.
        assert_eq!(summaries[0].conversation.id.as_str(), "1");
        assert_eq!(summaries[0].unread_count, 1);
        // Alex's own unread message to Maya does not count for Alex.
        assert_eq!(summaries[1].unread_count, 0);
    }

    #[tokio::test]
    async fn test_conversation_messages_are_ordered() {
        let db = seeded();
        let repo = MessageRepository::new(&db);

        let messages = repo
            .conversation_messages(&ConversationId::new("2"))
            .await
            .unwrap();
        let ids: Vec<_> = messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "6", "7"]);

        assert!(matches!(
            repo.conversation_messages(&ConversationId::new("nope")).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_create_message_updates_existing_conversation() {
        let db = seeded();
        let repo = MessageRepository::new(&db);
        let sofia = UserId::new("1");
        let maya = UserId::new("3");

        let (message, conversation) = repo.create_message(&sofia, &maya, "Hi again").await;
        assert!(message.id.as_str().starts_with("msg_"));
        assert_eq!(conversation.id.as_str(), "3");
        assert_eq!(conversation.last_message.unwrap().id, message.id);

        let summaries = repo.user_conversations(&maya).await;
        assert_eq!(summaries[0].conversation.id.as_str(), "3");
    }

    #[tokio::test]
    async fn test_create_message_opens_new_conversation() {
        let db = seeded();
        let repo = MessageRepository::new(&db);

        let (_, conversation) = repo
            .create_message(&UserId::new("1"), &UserId::new("4"), "Welcome")
            .await;
        assert!(conversation.id.as_str().starts_with("conv_"));
        assert!(
            repo.conversation_between(&UserId::new("4"), &UserId::new("1"))
                .await
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_mark_as_read_only_touches_incoming() {
        let db = seeded();
        let repo = MessageRepository::new(&db);
        let alex = UserId::new("2");
        let maya = UserId::new("3");
        let conversation = ConversationId::new("2");

        // Message 7 is from Alex, so Alex has nothing to mark.
        assert_eq!(repo.mark_as_read(&conversation, &alex).await.unwrap(), 0);
        assert_eq!(repo.mark_as_read(&conversation, &maya).await.unwrap(), 1);
        assert_eq!(repo.mark_as_read(&conversation, &maya).await.unwrap(), 0);

        let summaries = repo.user_conversations(&maya).await;
        assert!(summaries.iter().all(|s| s.unread_count == 0));
    }
}
