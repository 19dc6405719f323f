//! Member aggregate

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agora_common::{ErrorMap, Payload};
use agora_permissions::{Action, Principal, Subject};

use crate::capabilities::{Bannable, PostTally, RecordForm, Removable, Reportable};
use crate::errors::DomainResult;
use crate::value_objects::{GroupId, MemberId, RankId, RoleId};

use super::role::RoleGrant;
use super::{apply_delta, field_error, payload_str};

/// Lifecycle state of a member account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Registered,
    Active,
    Banned,
}

/// A registered forum member
///
/// Members are the acting principals of permission checks: group and role
/// membership queries are answered from the member's own denormalized
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub username: String,
    pub status: MemberStatus,
    pub posts_count: i64,
    pub rank_id: Option<RankId>,
    pub group_ids: BTreeSet<GroupId>,
    pub role_grants: Vec<RoleGrant>,
    pub friend_ids: BTreeSet<MemberId>,
    pub ignored_ids: BTreeSet<MemberId>,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    errors: ErrorMap,
}

impl Member {
    pub fn new(id: MemberId) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: String::new(),
            status: MemberStatus::Registered,
            posts_count: 0,
            rank_id: None,
            group_ids: BTreeSet::new(),
            role_grants: Vec::new(),
            friend_ids: BTreeSet::new(),
            ignored_ids: BTreeSet::new(),
            deleted: false,
            created_at: now,
            updated_at: now,
            errors: ErrorMap::new(),
        }
    }

    pub fn is_friend(&self, other: MemberId) -> bool {
        self.friend_ids.contains(&other)
    }

    pub fn is_ignoring(&self, other: MemberId) -> bool {
        self.ignored_ids.contains(&other)
    }

    pub fn is_in_group(&self, group: GroupId) -> bool {
        self.group_ids.contains(&group)
    }

    pub fn has_grant(&self, role: RoleId) -> bool {
        self.role_grants.iter().any(|g| g.role_id == role)
    }

    pub fn befriend(&mut self, other: MemberId) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.friend_ids.insert(other);
        self.touch();
        Ok(true)
    }

    pub fn unfriend(&mut self, other: MemberId) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.friend_ids.remove(&other);
        self.touch();
        Ok(true)
    }

    pub fn ignore(&mut self, other: MemberId) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.ignored_ids.insert(other);
        self.touch();
        Ok(true)
    }

    pub fn unignore(&mut self, other: MemberId) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.ignored_ids.remove(&other);
        self.touch();
        Ok(true)
    }

    pub fn join_group(&mut self, group: GroupId) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.group_ids.insert(group);
        self.touch();
        Ok(true)
    }

    pub fn leave_group(&mut self, group: GroupId) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.group_ids.remove(&group);
        self.touch();
        Ok(true)
    }

    pub fn grant_role(&mut self, grant: RoleGrant) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        if !self.has_grant(grant.role_id) {
            self.role_grants.push(grant);
        }
        self.touch();
        Ok(true)
    }

    pub fn revoke_role(&mut self, role: RoleId) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.role_grants.retain(|g| g.role_id != role);
        self.touch();
        Ok(true)
    }

    pub fn grant_rank(&mut self, rank: RankId) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.rank_id = Some(rank);
        self.touch();
        Ok(true)
    }

    pub fn revoke_rank(&mut self) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.rank_id = None;
        self.touch();
        Ok(true)
    }

    /// Activate a freshly registered account
    pub fn activate(&mut self) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        if self.status == MemberStatus::Registered {
            self.status = MemberStatus::Active;
            self.touch();
        }
        Ok(true)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn live(&mut self) -> bool {
        if self.deleted {
            let mut errors = ErrorMap::new();
            field_error(&mut errors, "state", "member is deleted");
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        true
    }
}

impl Reportable for Member {
    fn errors(&self) -> ErrorMap {
        self.errors.clone()
    }
}

impl RecordForm for Member {
    fn save_from(&mut self, data: &Payload) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        let mut errors = ErrorMap::new();

        let username = payload_str(data, "username")
            .unwrap_or(&self.username)
            .to_string();
        if username.trim().is_empty() {
            field_error(&mut errors, "username", "username cannot be empty");
        } else if username.chars().any(char::is_whitespace) {
            field_error(&mut errors, "username", "username cannot contain whitespace");
        }

        if !errors.is_empty() {
            self.errors = errors;
            return Ok(false);
        }

        self.username = username;
        self.touch();
        Ok(true)
    }
}

impl Removable for Member {
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

impl Bannable for Member {
    fn is_banned(&self) -> bool {
        self.status == MemberStatus::Banned
    }

    fn ban(&mut self) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.status = MemberStatus::Banned;
        self.touch();
        Ok(true)
    }

    fn unban(&mut self) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.status = MemberStatus::Active;
        self.touch();
        Ok(true)
    }
}

impl PostTally for Member {
    fn tally_post(&mut self, delta: i64) -> DomainResult<bool> {
        self.posts_count = apply_delta("member.posts_count", self.posts_count, delta)?;
        self.touch();
        Ok(true)
    }
}

impl Principal for Member {
    fn principal_id(&self) -> u64 {
        self.id.get()
    }

    fn in_group(&self, group_id: u64) -> bool {
        self.group_ids.contains(&GroupId::new(group_id))
    }

    fn has_role(&self, subject: Option<&dyn Subject>, action: Option<Action>) -> bool {
        let kind = subject.map(|s| s.kind());
        self.role_grants.iter().any(|g| g.covers(kind, action))
    }
}
