//! Group aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agora_common::{ErrorMap, Payload};

use crate::capabilities::{MemberTally, RecordForm, Removable, Reportable};
use crate::errors::DomainResult;
use crate::value_objects::GroupId;

use super::{apply_delta, field_error, payload_str};

/// A named collection of members used for access restrictions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub members_count: i64,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    errors: ErrorMap,
}

impl Group {
    pub fn new(id: GroupId) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: String::new(),
            members_count: 0,
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
            field_error(&mut errors, "state", "group is deleted");
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        true
    }
}

impl Reportable for Group {
    fn errors(&self) -> ErrorMap {
        self.errors.clone()
    }
}

impl RecordForm for Group {
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

impl Removable for Group {
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

impl MemberTally for Group {
    fn tally_member(&mut self, delta: i64) -> DomainResult<bool> {
        self.members_count = apply_delta("group.members_count", self.members_count, delta)?;
        self.touch();
        Ok(true)
    }
}
