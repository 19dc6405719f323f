//! Rank services

use serde::Serialize;

use agora_common::{OpResult, Payload};
use agora_domain::{RecordForm, Removable};

use crate::envelope::{guard, saved, Committed, Op, ServiceContext};

const CREATE: Op = Op::new("rank", "create");
const EDIT: Op = Op::new("rank", "edit");
const REMOVE: Op = Op::new("rank", "remove");

fn name_within(data: &Payload, limit: usize) -> bool {
    data.get("name")
        .and_then(serde_json::Value::as_str)
        .map(|name| name.len() <= limit)
        .unwrap_or(true)
}

/// Creates and edits ranks
pub struct RankBuilder {
    ctx: ServiceContext,
}

impl RankBuilder {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn create<R>(&self, rank: &mut R, data: &Payload) -> OpResult
    where
        R: RecordForm + Serialize,
    {
        self.ctx.run(CREATE, || {
            guard(
                name_within(data, self.ctx.config.max_name_length),
                "rank.name.too.long",
            )?;
            let ok = rank.save_from(data)?;
            saved(ok, rank)?;
            Committed::of(rank)
        })
    }

    pub fn edit<R>(&self, rank: &mut R, data: &Payload) -> OpResult
    where
        R: RecordForm + Removable + Serialize,
    {
        self.ctx.run(EDIT, || {
            guard(!rank.is_deleted(), "rank.deleted")?;
            guard(
                name_within(data, self.ctx.config.max_name_length),
                "rank.name.too.long",
            )?;
            let ok = rank.save_from(data)?;
            saved(ok, rank)?;
            Committed::of(rank)
        })
    }
}

/// Removes ranks
pub struct RankRemover {
    ctx: ServiceContext,
}

impl RankRemover {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn remove<R>(&self, rank: &mut R) -> OpResult
    where
        R: Removable + Serialize,
    {
        self.ctx.run(REMOVE, || {
            guard(!rank.is_deleted(), "rank.already.deleted")?;
            let ok = rank.delete()?;
            saved(ok, rank)?;
            Committed::of(rank)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_domain::{Rank, RankId};
    use serde_json::json;

    #[test]
    fn test_create_and_remove_rank() {
        let builder = RankBuilder::new(ServiceContext::detached());
        let remover = RankRemover::new(ServiceContext::detached());
        let mut rank = Rank::new(RankId::new(1));

        let data: Payload = [
            ("name".to_string(), json!("Veteran")),
            ("min_posts".to_string(), json!(100)),
        ]
        .into_iter()
        .collect();
        assert!(builder.create(&mut rank, &data).succeeded);
        assert_eq!(rank.min_posts, 100);

        assert!(remover.remove(&mut rank).succeeded);
        let result = remover.remove(&mut rank);
        assert_eq!(result.errors["api"], json!("rank.already.deleted"));
    }

    #[test]
    fn test_edit_refuses_deleted_rank() {
        let builder = RankBuilder::new(ServiceContext::detached());
        let mut rank = Rank::new(RankId::new(1));
        let data: Payload = [("name".to_string(), json!("Veteran"))].into_iter().collect();
        rank.save_from(&data).unwrap();
        rank.delete().unwrap();

        let result = builder.edit(&mut rank, &data);
        assert_eq!(result.errors["api"], json!("rank.deleted"));
    }
}
