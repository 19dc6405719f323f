//! Forum aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agora_common::{ErrorMap, Payload};

use crate::capabilities::{
    Hideable, Movable, PostTally, RecordForm, Removable, Reportable, Sortable, ThreadTally,
};
use crate::errors::DomainResult;
use crate::value_objects::{CategoryId, ForumId};

use super::{apply_delta, field_error, payload_i64, payload_str};

/// A board of threads under a category
///
/// Carries derived thread/post counters maintained by the service layer's
/// secondary effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forum {
    pub id: ForumId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub position: i32,
    pub hidden: bool,
    pub deleted: bool,
    pub threads_count: i64,
    pub posts_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    errors: ErrorMap,
}

impl Forum {
    pub fn new(id: ForumId, category_id: CategoryId) -> Self {
        let now = Utc::now();
        Self {
            id,
            category_id,
            name: String::new(),
            description: None,
            position: 0,
            hidden: false,
            deleted: false,
            threads_count: 0,
            posts_count: 0,
            created_at: now,
            updated_at: now,
            errors: ErrorMap::new(),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn live(&mut self) -> bool {
        if self.deleted {
            let mut errors = ErrorMap::new();
            field_error(&mut errors, "state", "forum is deleted");
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        true
    }
}

impl Reportable for Forum {
    fn errors(&self) -> ErrorMap {
        self.errors.clone()
    }
}

impl RecordForm for Forum {
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
        if let Some(description) = payload_str(data, "description") {
            self.description = Some(description.to_string());
        }
        if let Some(position) = payload_i64(data, "position") {
            self.position = position as i32;
        }
        self.touch();
        Ok(true)
    }
}

impl Removable for Forum {
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

impl Hideable for Forum {
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

impl Sortable for Forum {
    fn position(&self) -> i32 {
        self.position
    }

    fn set_position(&mut self, position: i32) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.position = position;
        self.touch();
        Ok(true)
    }
}

impl Movable for Forum {
    type Destination = CategoryId;

    fn move_to(&mut self, destination: CategoryId) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.category_id = destination;
        self.touch();
        Ok(true)
    }
}

impl ThreadTally for Forum {
    fn tally_thread(&mut self, delta: i64) -> DomainResult<bool> {
        self.threads_count = apply_delta("forum.threads_count", self.threads_count, delta)?;
        self.touch();
        Ok(true)
    }
}

impl PostTally for Forum {
    fn tally_post(&mut self, delta: i64) -> DomainResult<bool> {
        self.posts_count = apply_delta("forum.posts_count", self.posts_count, delta)?;
        self.touch();
        Ok(true)
    }
}
