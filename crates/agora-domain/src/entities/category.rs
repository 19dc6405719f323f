//! Category aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agora_common::{ErrorMap, Payload};

use crate::capabilities::{Hideable, RecordForm, Removable, Reportable, Sortable};
use crate::errors::DomainResult;
use crate::value_objects::CategoryId;

use super::{field_error, payload_i64, payload_str, slugify};

/// Top-level grouping of forums
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub position: i32,
    pub hidden: bool,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    errors: ErrorMap,
}

impl Category {
    pub fn new(id: CategoryId) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: String::new(),
            slug: String::new(),
            description: None,
            position: 0,
            hidden: false,
            deleted: false,
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
            field_error(&mut errors, "state", "category is deleted");
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        true
    }
}

impl Reportable for Category {
    fn errors(&self) -> ErrorMap {
        self.errors.clone()
    }
}

impl RecordForm for Category {
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

        self.slug = payload_str(data, "slug")
            .map(str::to_string)
            .unwrap_or_else(|| slugify(&name));
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

impl Removable for Category {
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

impl Hideable for Category {
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

impl Sortable for Category {
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
