//! Thread aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agora_common::{ErrorMap, Payload};
use agora_permissions::Subject;

use crate::capabilities::{
    Archivable, Hideable, Lockable, Movable, Pinnable, PostTally, RecordForm, Removable,
    Reportable,
};
use crate::errors::DomainResult;
use crate::value_objects::{ForumId, GroupId, MemberId, ThreadId};

use super::{apply_delta, field_error, payload_str};

/// A conversation of posts inside a forum
///
/// The allowed-group list is the thread's own access restriction; an empty
/// list means the thread is unrestricted. Threads are the primary subjects
/// of permission checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub id: ThreadId,
    pub forum_id: ForumId,
    pub author_id: MemberId,
    pub name: String,
    pub pinned: bool,
    pub locked: bool,
    pub archived: bool,
    pub hidden: bool,
    pub deleted: bool,
    pub posts_count: i64,
    pub allowed_group_ids: Vec<GroupId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    errors: ErrorMap,
}

impl Thread {
    pub fn new(id: ThreadId, forum_id: ForumId, author_id: MemberId) -> Self {
        let now = Utc::now();
        Self {
            id,
            forum_id,
            author_id,
            name: String::new(),
            pinned: false,
            locked: false,
            archived: false,
            hidden: false,
            deleted: false,
            posts_count: 0,
            allowed_group_ids: Vec::new(),
            created_at: now,
            updated_at: now,
            errors: ErrorMap::new(),
        }
    }

    /// Restrict the thread to the given groups
    pub fn restrict_to(&mut self, groups: Vec<GroupId>) {
        self.allowed_group_ids = groups;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn live(&mut self) -> bool {
        if self.deleted {
            let mut errors = ErrorMap::new();
            field_error(&mut errors, "state", "thread is deleted");
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        true
    }
}

impl Reportable for Thread {
    fn errors(&self) -> ErrorMap {
        self.errors.clone()
    }
}

impl RecordForm for Thread {
    fn save_from(&mut self, data: &Payload) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        let mut errors = ErrorMap::new();

        let name = payload_str(data, "name").unwrap_or(&self.name).to_string();
        if name.trim().is_empty() {
            field_error(&mut errors, "name", "name cannot be empty");
        }

        if !errors.is_empty() {
            self.errors = errors;
            return Ok(false);
        }

        self.name = name;
        self.touch();
        Ok(true)
    }
}

impl Removable for Thread {
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

impl Archivable for Thread {
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

impl Hideable for Thread {
    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn hide(&mut self) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.hidden = true;
        self.touch();
        Ok(true)
    }

    fn reveal(&mut self) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.hidden = false;
        self.touch();
        Ok(true)
    }
}

impl Pinnable for Thread {
    fn is_pinned(&self) -> bool {
        self.pinned
    }

    fn pin(&mut self) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.pinned = true;
        self.touch();
        Ok(true)
    }

    fn unpin(&mut self) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.pinned = false;
        self.touch();
        Ok(true)
    }
}

impl Lockable for Thread {
    fn is_locked(&self) -> bool {
        self.locked
    }

    fn lock(&mut self) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.locked = true;
        self.touch();
        Ok(true)
    }

    fn unlock(&mut self) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.locked = false;
        self.touch();
        Ok(true)
    }
}

impl Movable for Thread {
    type Destination = ForumId;

    fn move_to(&mut self, destination: ForumId) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.forum_id = destination;
        self.touch();
        Ok(true)
    }
}

impl PostTally for Thread {
    fn tally_post(&mut self, delta: i64) -> DomainResult<bool> {
        self.posts_count = apply_delta("thread.posts_count", self.posts_count, delta)?;
        self.touch();
        Ok(true)
    }
}

impl Subject for Thread {
    fn kind(&self) -> &'static str {
        "thread"
    }

    fn author_id(&self) -> Option<u64> {
        Some(self.author_id.get())
    }

    fn allowed_group_ids(&self) -> Vec<u64> {
        self.allowed_group_ids.iter().map(GroupId::get).collect()
    }
}
