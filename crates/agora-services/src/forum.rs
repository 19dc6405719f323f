//! Forum services

use serde::Serialize;

use agora_common::{OpResult, Payload};
use agora_domain::{Category, Forum, Hideable, Movable, RecordForm, Removable, Sortable};

use crate::envelope::{applied, guard, saved, Committed, Op, ServiceContext};

const CREATE: Op = Op::new("forum", "create");
const EDIT: Op = Op::new("forum", "edit");
const REMOVE: Op = Op::new("forum", "remove");
const SORT: Op = Op::new("forum", "sort");
const HIDE: Op = Op::new("forum", "hide");
const REVEAL: Op = Op::new("forum", "reveal");
const MOVE: Op = Op::new("forum", "move");

fn name_within(data: &Payload, limit: usize) -> bool {
    data.get("name")
        .and_then(serde_json::Value::as_str)
        .map(|name| name.len() <= limit)
        .unwrap_or(true)
}

/// Creates and edits forums under a category
pub struct ForumBuilder {
    ctx: ServiceContext,
}

impl ForumBuilder {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn create(&self, forum: &mut Forum, category: &Category, data: &Payload) -> OpResult {
        self.ctx.run(CREATE, || {
            guard(!category.deleted, "category.deleted")?;
            guard(
                name_within(data, self.ctx.config.max_name_length),
                "forum.name.too.long",
            )?;
            let ok = forum.save_from(data)?;
            saved(ok, forum)?;
            Committed::of(forum)
        })
    }

    pub fn edit(&self, forum: &mut Forum, data: &Payload) -> OpResult {
        self.ctx.run(EDIT, || {
            guard(!forum.deleted, "forum.deleted")?;
            guard(
                name_within(data, self.ctx.config.max_name_length),
                "forum.name.too.long",
            )?;
            let ok = forum.save_from(data)?;
            saved(ok, forum)?;
            Committed::of(forum)
        })
    }
}

/// Removes empty forums
pub struct ForumRemover {
    ctx: ServiceContext,
}

impl ForumRemover {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn remove(&self, forum: &mut Forum) -> OpResult {
        self.ctx.run(REMOVE, || {
            guard(!forum.deleted, "forum.already.deleted")?;
            guard(forum.threads_count == 0, "forum.not.empty")?;
            let ok = forum.delete()?;
            saved(ok, forum)?;
            Committed::of(forum)
        })
    }
}

/// Rewrites forum ordering positions within a category
pub struct ForumSorter {
    ctx: ServiceContext,
}

impl ForumSorter {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn sort<F>(&self, forums: &mut [F]) -> OpResult
    where
        F: Sortable + Serialize,
    {
        self.ctx.run(SORT, || {
            for (index, forum) in forums.iter_mut().enumerate() {
                let ok = forum.set_position(index as i32)?;
                applied(ok, "forum position")?;
            }
            Committed::of(&*forums)
        })
    }
}

/// Hides and reveals forums
pub struct ForumHider {
    ctx: ServiceContext,
}

impl ForumHider {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn hide<F>(&self, forum: &mut F) -> OpResult
    where
        F: Hideable + Serialize,
    {
        self.ctx.run(HIDE, || {
            guard(!forum.is_hidden(), "forum.already.hidden")?;
            let ok = forum.hide()?;
            saved(ok, forum)?;
            Committed::of(forum)
        })
    }

    pub fn reveal<F>(&self, forum: &mut F) -> OpResult
    where
        F: Hideable + Serialize,
    {
        self.ctx.run(REVEAL, || {
            guard(forum.is_hidden(), "forum.not.hidden")?;
            let ok = forum.reveal()?;
            saved(ok, forum)?;
            Committed::of(forum)
        })
    }
}

/// Moves a forum to another category
pub struct ForumMover {
    ctx: ServiceContext,
}

impl ForumMover {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn move_to(&self, forum: &mut Forum, destination: &Category) -> OpResult {
        self.ctx.run(MOVE, || {
            guard(!forum.deleted, "forum.deleted")?;
            guard(!destination.deleted, "category.deleted")?;
            guard(forum.category_id != destination.id, "forum.move.same.category")?;
            let ok = forum.move_to(destination.id)?;
            saved(ok, forum)?;
            Committed::of(forum)
        })
    }
}
