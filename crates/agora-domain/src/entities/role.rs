//! Role aggregate

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agora_common::{ErrorMap, Payload};
use agora_permissions::Action;

use crate::capabilities::{RecordForm, Removable, Reportable};
use crate::errors::DomainResult;
use crate::value_objects::RoleId;

use super::{field_error, payload_str};

/// A named bundle of actions over one entity kind
///
/// The kind `"*"` covers every entity kind. Granting a role to a member
/// denormalizes it into a [`RoleGrant`] the member answers role queries
/// from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub kind: String,
    pub actions: BTreeSet<Action>,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    errors: ErrorMap,
}

/// A role as held by a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrant {
    pub role_id: RoleId,
    pub kind: String,
    pub actions: BTreeSet<Action>,
}

impl RoleGrant {
    /// Whether the grant covers an entity kind / action pair
    ///
    /// An absent kind matches only wildcard grants; an absent action is
    /// never covered.
    pub fn covers(&self, kind: Option<&str>, action: Option<Action>) -> bool {
        let kind_matches = match kind {
            Some(kind) => self.kind == "*" || self.kind == kind,
            None => self.kind == "*",
        };
        let action_matches = action.map(|a| self.actions.contains(&a)).unwrap_or(false);
        kind_matches && action_matches
    }
}

fn parse_action(raw: &str) -> Option<Action> {
    match raw {
        "create" => Some(Action::Create),
        "read" => Some(Action::Read),
        "update" => Some(Action::Update),
        "delete" => Some(Action::Delete),
        _ => None,
    }
}

impl Role {
    pub fn new(id: RoleId) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: String::new(),
            kind: "*".to_string(),
            actions: BTreeSet::new(),
            deleted: false,
            created_at: now,
            updated_at: now,
            errors: ErrorMap::new(),
        }
    }

    /// Denormalize this role into the form members hold
    pub fn grant(&self) -> RoleGrant {
        RoleGrant {
            role_id: self.id,
            kind: self.kind.clone(),
            actions: self.actions.clone(),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn live(&mut self) -> bool {
        if self.deleted {
            let mut errors = ErrorMap::new();
            field_error(&mut errors, "state", "role is deleted");
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        true
    }
}

impl Reportable for Role {
    fn errors(&self) -> ErrorMap {
        self.errors.clone()
    }
}

impl RecordForm for Role {
    fn save_from(&mut self, data: &Payload) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        let mut errors = ErrorMap::new();

        let name = payload_str(data, "name").unwrap_or(&self.name).to_string();
        if name.trim().is_empty() {
            field_error(&mut errors, "name", "name cannot be empty");
        }

        let mut actions = self.actions.clone();
        if let Some(raw_actions) = data.get("actions").and_then(|v| v.as_array()) {
            actions.clear();
            for raw in raw_actions {
                match raw.as_str().and_then(parse_action) {
                    Some(action) => {
                        actions.insert(action);
                    }
                    None => {
                        field_error(&mut errors, "actions", "unknown action");
                        break;
                    }
                }
            }
        }

        if !errors.is_empty() {
            self.errors = errors;
            return Ok(false);
        }

        self.name = name;
        self.actions = actions;
        if let Some(kind) = payload_str(data, "kind") {
            self.kind = kind.to_string();
        }
        self.touch();
        Ok(true)
    }
}

impl Removable for Role {
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
