//! Private message aggregate
//!
//! Each message carries independent state for the sender and receiver
//! sides: archiving or deleting a message affects only the acting
//! participant's copy. The record is gone for good once both sides have
//! deleted it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agora_common::{ErrorMap, Payload};

use crate::capabilities::{RecordForm, Reportable};
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{MemberId, MessageId};

use super::{field_error, payload_str};

/// Per-participant state of a message copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSide {
    New,
    Read,
    Archived,
    Deleted,
}

/// A private message between two members
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: MemberId,
    pub receiver_id: MemberId,
    pub subject: String,
    pub content: String,
    pub reply_to: Option<MessageId>,
    pub sender_side: MessageSide,
    pub receiver_side: MessageSide,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    errors: ErrorMap,
}

impl Message {
    pub fn new(id: MessageId, sender_id: MemberId, receiver_id: MemberId) -> Self {
        let now = Utc::now();
        Self {
            id,
            sender_id,
            receiver_id,
            subject: String::new(),
            content: String::new(),
            reply_to: None,
            sender_side: MessageSide::Read,
            receiver_side: MessageSide::New,
            created_at: now,
            updated_at: now,
            errors: ErrorMap::new(),
        }
    }

    /// Whether the member participates in this message at all
    pub fn involves(&self, member: MemberId) -> bool {
        self.sender_id == member || self.receiver_id == member
    }

    /// The member's side of the message, when they participate
    pub fn side_of(&self, member: MemberId) -> Option<MessageSide> {
        if member == self.sender_id {
            Some(self.sender_side)
        } else if member == self.receiver_id {
            Some(self.receiver_side)
        } else {
            None
        }
    }

    /// Whether both participants have deleted their copies
    pub fn is_fully_deleted(&self) -> bool {
        self.sender_side == MessageSide::Deleted && self.receiver_side == MessageSide::Deleted
    }

    /// Link this message as a reply to an earlier one
    pub fn mark_reply(&mut self, original: MessageId) -> DomainResult<bool> {
        self.reply_to = Some(original);
        self.touch();
        Ok(true)
    }

    /// Mark the receiver's copy as read
    pub fn mark_read(&mut self, member: MemberId) -> DomainResult<bool> {
        let side = self.side_mut(member)?;
        if *side == MessageSide::New {
            *side = MessageSide::Read;
            self.touch();
        }
        Ok(true)
    }

    /// Archive the acting participant's copy
    pub fn archive_side(&mut self, member: MemberId) -> DomainResult<bool> {
        let side = self.side_mut(member)?;
        *side = MessageSide::Archived;
        self.touch();
        Ok(true)
    }

    /// Bring the acting participant's copy back from the archive
    pub fn revive_side(&mut self, member: MemberId) -> DomainResult<bool> {
        let side = self.side_mut(member)?;
        *side = MessageSide::Read;
        self.touch();
        Ok(true)
    }

    /// Delete the acting participant's copy
    pub fn delete_side(&mut self, member: MemberId) -> DomainResult<bool> {
        let side = self.side_mut(member)?;
        *side = MessageSide::Deleted;
        self.touch();
        Ok(true)
    }

    fn side_mut(&mut self, member: MemberId) -> DomainResult<&mut MessageSide> {
        if member == self.sender_id {
            Ok(&mut self.sender_side)
        } else if member == self.receiver_id {
            Ok(&mut self.receiver_side)
        } else {
            Err(DomainError::InvalidState {
                reason: format!("member {member} does not participate in this message"),
            })
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Reportable for Message {
    fn errors(&self) -> ErrorMap {
        self.errors.clone()
    }
}

impl RecordForm for Message {
    fn save_from(&mut self, data: &Payload) -> DomainResult<bool> {
        let mut errors = ErrorMap::new();

        let subject = payload_str(data, "subject")
            .unwrap_or(&self.subject)
            .to_string();
        if subject.trim().is_empty() {
            field_error(&mut errors, "subject", "subject cannot be empty");
        }

        let content = payload_str(data, "content")
            .unwrap_or(&self.content)
            .to_string();
        if content.trim().is_empty() {
            field_error(&mut errors, "content", "content cannot be empty");
        }

        if !errors.is_empty() {
            self.errors = errors;
            return Ok(false);
        }

        self.subject = subject;
        self.content = content;
        self.errors.clear();
        self.touch();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message() -> Message {
        let mut message = Message::new(MessageId::new(1), MemberId::new(7), MemberId::new(9));
        let data: Payload = [
            ("subject".to_string(), json!("Hello")),
            ("content".to_string(), json!("How goes it?")),
        ]
        .into_iter()
        .collect();
        message.save_from(&data).unwrap();
        message
    }

    #[test]
    fn test_sides_start_asymmetric() {
        let message = message();
        assert_eq!(message.side_of(MemberId::new(7)), Some(MessageSide::Read));
        assert_eq!(message.side_of(MemberId::new(9)), Some(MessageSide::New));
        assert_eq!(message.side_of(MemberId::new(11)), None);
    }

    #[test]
    fn test_archive_affects_only_one_side() {
        let mut message = message();
        message.archive_side(MemberId::new(9)).unwrap();
        assert_eq!(
            message.side_of(MemberId::new(9)),
            Some(MessageSide::Archived)
        );
        assert_eq!(message.side_of(MemberId::new(7)), Some(MessageSide::Read));
    }

    #[test]
    fn test_fully_deleted_requires_both_sides() {
        let mut message = message();
        message.delete_side(MemberId::new(7)).unwrap();
        assert!(!message.is_fully_deleted());
        message.delete_side(MemberId::new(9)).unwrap();
        assert!(message.is_fully_deleted());
    }

    #[test]
    fn test_foreign_member_is_rejected() {
        let mut message = message();
        assert!(message.archive_side(MemberId::new(11)).is_err());
    }

    #[test]
    fn test_save_from_requires_subject_and_content() {
        let mut message = Message::new(MessageId::new(2), MemberId::new(1), MemberId::new(2));
        let data: Payload = [("subject".to_string(), json!("Hi"))].into_iter().collect();
        assert!(!message.save_from(&data).unwrap());
        assert!(message.errors().contains_key("content"));
    }
}
