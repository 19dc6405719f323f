//! Group services

use serde::Serialize;

use agora_common::{OpResult, Payload};
use agora_domain::{Group, Member, MemberTally, RecordForm, Removable};

use crate::envelope::{applied, guard, saved, Committed, Op, ServiceContext};

const CREATE: Op = Op::new("group", "create");
const EDIT: Op = Op::new("group", "edit");
const REMOVE: Op = Op::new("group", "remove");
const JOIN: Op = Op::new("group", "join");
const LEAVE: Op = Op::new("group", "leave");

fn name_within(data: &Payload, limit: usize) -> bool {
    data.get("name")
        .and_then(serde_json::Value::as_str)
        .map(|name| name.len() <= limit)
        .unwrap_or(true)
}

/// Creates and edits groups
pub struct GroupBuilder {
    ctx: ServiceContext,
}

impl GroupBuilder {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn create<G>(&self, group: &mut G, data: &Payload) -> OpResult
    where
        G: RecordForm + Serialize,
    {
        self.ctx.run(CREATE, || {
            guard(
                name_within(data, self.ctx.config.max_name_length),
                "group.name.too.long",
            )?;
            let ok = group.save_from(data)?;
            saved(ok, group)?;
            Committed::of(group)
        })
    }

    pub fn edit<G>(&self, group: &mut G, data: &Payload) -> OpResult
    where
        G: RecordForm + Removable + Serialize,
    {
        self.ctx.run(EDIT, || {
            guard(!group.is_deleted(), "group.deleted")?;
            guard(
                name_within(data, self.ctx.config.max_name_length),
                "group.name.too.long",
            )?;
            let ok = group.save_from(data)?;
            saved(ok, group)?;
            Committed::of(group)
        })
    }
}

/// Removes groups
pub struct GroupRemover {
    ctx: ServiceContext,
}

impl GroupRemover {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn remove<G>(&self, group: &mut G) -> OpResult
    where
        G: Removable + Serialize,
    {
        self.ctx.run(REMOVE, || {
            guard(!group.is_deleted(), "group.already.deleted")?;
            let ok = group.delete()?;
            saved(ok, group)?;
            Committed::of(group)
        })
    }
}

/// Manages group membership, keeping the member tally in step
pub struct GroupKeeper {
    ctx: ServiceContext,
}

impl GroupKeeper {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn join(&self, member: &mut Member, group: &mut Group) -> OpResult {
        self.ctx.run(JOIN, || {
            guard(!group.deleted, "group.deleted")?;
            guard(!member.is_deleted(), "member.deleted")?;
            guard(!member.is_in_group(group.id), "group.already.joined")?;
            let ok = member.join_group(group.id)?;
            saved(ok, member)?;
            let ok = group.tally_member(1)?;
            applied(ok, "group member tally")?;
            Committed::of(member)
        })
    }

    pub fn leave(&self, member: &mut Member, group: &mut Group) -> OpResult {
        self.ctx.run(LEAVE, || {
            guard(member.is_in_group(group.id), "group.not.joined")?;
            let ok = member.leave_group(group.id)?;
            saved(ok, member)?;
            let ok = group.tally_member(-1)?;
            applied(ok, "group member tally")?;
            Committed::of(member)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_domain::{GroupId, MemberId};
    use serde_json::json;

    fn member() -> Member {
        let mut member = Member::new(MemberId::new(7));
        let data: Payload = [("username".to_string(), json!("ferris"))]
            .into_iter()
            .collect();
        member.save_from(&data).unwrap();
        member
    }

    fn group() -> Group {
        let mut group = Group::new(GroupId::new(3));
        let data: Payload = [("name".to_string(), json!("Staff"))].into_iter().collect();
        group.save_from(&data).unwrap();
        group
    }

    #[test]
    fn test_join_and_leave_keep_tally() {
        let keeper = GroupKeeper::new(ServiceContext::detached());
        let mut member = member();
        let mut group = group();

        assert!(keeper.join(&mut member, &mut group).succeeded);
        assert!(member.is_in_group(group.id));
        assert_eq!(group.members_count, 1);

        let result = keeper.join(&mut member, &mut group);
        assert_eq!(result.errors["api"], json!("group.already.joined"));

        assert!(keeper.leave(&mut member, &mut group).succeeded);
        assert_eq!(group.members_count, 0);

        let result = keeper.leave(&mut member, &mut group);
        assert_eq!(result.errors["api"], json!("group.not.joined"));
    }

    #[test]
    fn test_join_refuses_deleted_group() {
        let keeper = GroupKeeper::new(ServiceContext::detached());
        let mut member = member();
        let mut group = group();
        group.delete().unwrap();

        let result = keeper.join(&mut member, &mut group);
        assert_eq!(result.errors["api"], json!("group.deleted"));
    }

    #[test]
    fn test_remove_group_once() {
        let remover = GroupRemover::new(ServiceContext::detached());
        let mut group = group();

        assert!(remover.remove(&mut group).succeeded);
        let result = remover.remove(&mut group);
        assert_eq!(result.errors["api"], json!("group.already.deleted"));
    }
}
