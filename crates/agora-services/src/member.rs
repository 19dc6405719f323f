//! Member services

use serde::Serialize;

use agora_common::{OpResult, Payload};
use agora_domain::{Bannable, Member, Rank, RecordForm, Removable};

use crate::envelope::{guard, saved, Committed, Op, ServiceContext};

const REGISTER: Op = Op::new("member", "register");
const EDIT: Op = Op::new("member", "edit");
const REMOVE: Op = Op::new("member", "remove");
const BAN: Op = Op::new("member", "ban");
const UNBAN: Op = Op::new("member", "unban");
const BEFRIEND: Op = Op::new("member", "befriend");
const UNFRIEND: Op = Op::new("member", "unfriend");
const IGNORE: Op = Op::new("member", "ignore");
const UNIGNORE: Op = Op::new("member", "unignore");
const GRANT_RANK: Op = Op::new("member", "grant_rank");
const REVOKE_RANK: Op = Op::new("member", "revoke_rank");

fn username_within(data: &Payload, limit: usize) -> bool {
    data.get("username")
        .and_then(serde_json::Value::as_str)
        .map(|username| username.len() <= limit)
        .unwrap_or(true)
}

/// Registers and edits member accounts
pub struct MemberBuilder {
    ctx: ServiceContext,
}

impl MemberBuilder {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn register(&self, member: &mut Member, data: &Payload) -> OpResult {
        self.ctx.run(REGISTER, || {
            guard(
                username_within(data, self.ctx.config.max_name_length),
                "member.username.too.long",
            )?;
            let ok = member.save_from(data)?;
            saved(ok, member)?;
            Committed::of(member)
        })
    }

    pub fn edit(&self, member: &mut Member, data: &Payload) -> OpResult {
        self.ctx.run(EDIT, || {
            guard(!member.is_deleted(), "member.deleted")?;
            guard(!member.is_banned(), "member.banned")?;
            guard(
                username_within(data, self.ctx.config.max_name_length),
                "member.username.too.long",
            )?;
            let ok = member.save_from(data)?;
            saved(ok, member)?;
            Committed::of(member)
        })
    }
}

/// Removes member accounts
pub struct MemberRemover {
    ctx: ServiceContext,
}

impl MemberRemover {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn remove<M>(&self, member: &mut M) -> OpResult
    where
        M: Removable + Serialize,
    {
        self.ctx.run(REMOVE, || {
            guard(!member.is_deleted(), "member.already.deleted")?;
            let ok = member.delete()?;
            saved(ok, member)?;
            Committed::of(member)
        })
    }
}

/// Bans and reinstates members
pub struct MemberBanisher {
    ctx: ServiceContext,
}

impl MemberBanisher {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn ban<M>(&self, member: &mut M) -> OpResult
    where
        M: Bannable + Serialize,
    {
        self.ctx.run(BAN, || {
            guard(!member.is_banned(), "member.already.banned")?;
            let ok = member.ban()?;
            saved(ok, member)?;
            Committed::of(member)
        })
    }

    pub fn unban<M>(&self, member: &mut M) -> OpResult
    where
        M: Bannable + Serialize,
    {
        self.ctx.run(UNBAN, || {
            guard(member.is_banned(), "member.not.banned")?;
            let ok = member.unban()?;
            saved(ok, member)?;
            Committed::of(member)
        })
    }
}

/// Maintains friend and ignore lists between members
pub struct MemberAcquaintance {
    ctx: ServiceContext,
}

impl MemberAcquaintance {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn befriend(&self, member: &mut Member, target: &Member) -> OpResult {
        self.ctx.run(BEFRIEND, || {
            guard(member.id != target.id, "member.acquaintance.self")?;
            guard(!target.is_deleted(), "member.deleted")?;
            guard(!member.is_friend(target.id), "member.already.friends")?;
            let ok = member.befriend(target.id)?;
            saved(ok, member)?;
            Committed::of(member)
        })
    }

    pub fn unfriend(&self, member: &mut Member, target: &Member) -> OpResult {
        self.ctx.run(UNFRIEND, || {
            guard(member.is_friend(target.id), "member.not.friends")?;
            let ok = member.unfriend(target.id)?;
            saved(ok, member)?;
            Committed::of(member)
        })
    }

    pub fn ignore(&self, member: &mut Member, target: &Member) -> OpResult {
        self.ctx.run(IGNORE, || {
            guard(member.id != target.id, "member.acquaintance.self")?;
            guard(!member.is_ignoring(target.id), "member.already.ignoring")?;
            let ok = member.ignore(target.id)?;
            saved(ok, member)?;
            Committed::of(member)
        })
    }

    pub fn unignore(&self, member: &mut Member, target: &Member) -> OpResult {
        self.ctx.run(UNIGNORE, || {
            guard(member.is_ignoring(target.id), "member.not.ignoring")?;
            let ok = member.unignore(target.id)?;
            saved(ok, member)?;
            Committed::of(member)
        })
    }
}

/// Grants and revokes vanity ranks
pub struct RankGranter {
    ctx: ServiceContext,
}

impl RankGranter {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn grant(&self, member: &mut Member, rank: &Rank) -> OpResult {
        self.ctx.run(GRANT_RANK, || {
            guard(!rank.deleted, "rank.deleted")?;
            guard(!member.is_deleted(), "member.deleted")?;
            guard(member.rank_id != Some(rank.id), "rank.already.granted")?;
            guard(member.posts_count >= rank.min_posts, "rank.posts.insufficient")?;
            let ok = member.grant_rank(rank.id)?;
            saved(ok, member)?;
            Committed::of(member)
        })
    }

    pub fn revoke(&self, member: &mut Member) -> OpResult {
        self.ctx.run(REVOKE_RANK, || {
            guard(member.rank_id.is_some(), "rank.not.granted")?;
            let ok = member.revoke_rank()?;
            saved(ok, member)?;
            Committed::of(member)
        })
    }
}
