//! Role services

use serde::Serialize;

use agora_common::{OpResult, Payload};
use agora_domain::{Member, RecordForm, Removable, Role};

use crate::envelope::{guard, saved, Committed, Op, ServiceContext};

const CREATE: Op = Op::new("role", "create");
const EDIT: Op = Op::new("role", "edit");
const REMOVE: Op = Op::new("role", "remove");
const GRANT: Op = Op::new("role", "grant");
const REVOKE: Op = Op::new("role", "revoke");

fn name_within(data: &Payload, limit: usize) -> bool {
    data.get("name")
        .and_then(serde_json::Value::as_str)
        .map(|name| name.len() <= limit)
        .unwrap_or(true)
}

/// Creates and edits roles
pub struct RoleBuilder {
    ctx: ServiceContext,
}

impl RoleBuilder {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn create<R>(&self, role: &mut R, data: &Payload) -> OpResult
    where
        R: RecordForm + Serialize,
    {
        self.ctx.run(CREATE, || {
            guard(
                name_within(data, self.ctx.config.max_name_length),
                "role.name.too.long",
            )?;
            let ok = role.save_from(data)?;
            saved(ok, role)?;
            Committed::of(role)
        })
    }

    pub fn edit<R>(&self, role: &mut R, data: &Payload) -> OpResult
    where
        R: RecordForm + Removable + Serialize,
    {
        self.ctx.run(EDIT, || {
            guard(!role.is_deleted(), "role.deleted")?;
            guard(
                name_within(data, self.ctx.config.max_name_length),
                "role.name.too.long",
            )?;
            let ok = role.save_from(data)?;
            saved(ok, role)?;
            Committed::of(role)
        })
    }
}

/// Removes roles
pub struct RoleRemover {
    ctx: ServiceContext,
}

impl RoleRemover {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn remove<R>(&self, role: &mut R) -> OpResult
    where
        R: Removable + Serialize,
    {
        self.ctx.run(REMOVE, || {
            guard(!role.is_deleted(), "role.already.deleted")?;
            let ok = role.delete()?;
            saved(ok, role)?;
            Committed::of(role)
        })
    }
}

/// Grants roles to members and revokes them
///
/// Granting denormalizes the role into the member's own grant list, which
/// is what the member answers role-membership queries from.
pub struct RoleGranter {
    ctx: ServiceContext,
}

impl RoleGranter {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn grant(&self, member: &mut Member, role: &Role) -> OpResult {
        self.ctx.run(GRANT, || {
            guard(!role.deleted, "role.deleted")?;
            guard(!member.is_deleted(), "member.deleted")?;
            guard(!member.has_grant(role.id), "role.already.granted")?;
            let ok = member.grant_role(role.grant())?;
            saved(ok, member)?;
            Committed::of(member)
        })
    }

    pub fn revoke(&self, member: &mut Member, role: &Role) -> OpResult {
        self.ctx.run(REVOKE, || {
            guard(member.has_grant(role.id), "role.not.granted")?;
            let ok = member.revoke_role(role.id)?;
            saved(ok, member)?;
            Committed::of(member)
        })
    }
}
