//! Post aggregate

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agora_common::{ErrorMap, Payload};
use agora_permissions::Subject;

use crate::capabilities::{
    Archivable, Likeable, Movable, RecordForm, Removable, Reportable, Thumb,
};
use crate::errors::DomainResult;
use crate::value_objects::{ForumId, MemberId, PostId, ThreadId};

use super::{field_error, payload_str};

/// A single contribution inside a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub thread_id: ThreadId,
    pub forum_id: ForumId,
    pub author_id: MemberId,
    pub content: String,
    pub archived: bool,
    pub deleted: bool,
    pub thumbs: BTreeMap<u64, Thumb>,
    pub edited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    errors: ErrorMap,
}

impl Post {
    pub fn new(id: PostId, thread_id: ThreadId, forum_id: ForumId, author_id: MemberId) -> Self {
        let now = Utc::now();
        Self {
            id,
            thread_id,
            forum_id,
            author_id,
            content: String::new(),
            archived: false,
            deleted: false,
            thumbs: BTreeMap::new(),
            edited_at: None,
            created_at: now,
            updated_at: now,
            errors: ErrorMap::new(),
        }
    }

    /// Count of thumb-up votes
    pub fn likes(&self) -> usize {
        self.thumbs.values().filter(|t| **t == Thumb::Up).count()
    }

    /// Count of thumb-down votes
    pub fn dislikes(&self) -> usize {
        self.thumbs.values().filter(|t| **t == Thumb::Down).count()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn live(&mut self) -> bool {
        if self.deleted {
            let mut errors = ErrorMap::new();
            field_error(&mut errors, "state", "post is deleted");
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        true
    }
}

impl Reportable for Post {
    fn errors(&self) -> ErrorMap {
        self.errors.clone()
    }
}

impl RecordForm for Post {
    fn save_from(&mut self, data: &Payload) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        let mut errors = ErrorMap::new();

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

        if !self.content.is_empty() && self.content != content {
            self.edited_at = Some(Utc::now());
        }
        self.content = content;
        self.touch();
        Ok(true)
    }
}

impl Removable for Post {
    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn delete(&mut self) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.deleted = true;
        self.touch();
        Ok(true)
    }
}

impl Archivable for Post {
    fn is_archived(&self) -> bool {
        self.archived
    }

    fn archive(&mut self) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.archived = true;
        self.touch();
        Ok(true)
    }

    fn revive(&mut self) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.archived = false;
        self.touch();
        Ok(true)
    }
}

impl Movable for Post {
    type Destination = (ThreadId, ForumId);

    fn move_to(&mut self, destination: (ThreadId, ForumId)) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.thread_id = destination.0;
        self.forum_id = destination.1;
        self.touch();
        Ok(true)
    }
}

impl Likeable for Post {
    fn current_thumb(&self, member: MemberId) -> Option<Thumb> {
        self.thumbs.get(&member.get()).copied()
    }

    fn thumb_up(&mut self, member: MemberId) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.thumbs.insert(member.get(), Thumb::Up);
        self.touch();
        Ok(true)
    }

    fn thumb_down(&mut self, member: MemberId) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.thumbs.insert(member.get(), Thumb::Down);
        self.touch();
        Ok(true)
    }

    fn thumb_reset(&mut self, member: MemberId) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.thumbs.remove(&member.get());
        self.touch();
        Ok(true)
    }
}

impl Subject for Post {
    fn kind(&self) -> &'static str {
        "post"
    }

    fn author_id(&self) -> Option<u64> {
        Some(self.author_id.get())
    }

    fn allowed_group_ids(&self) -> Vec<u64> {
        Vec::new()
    }
}
