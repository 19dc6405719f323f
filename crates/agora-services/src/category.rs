//! Category services

use serde::Serialize;

use agora_common::{OpResult, Payload};
use agora_domain::{Hideable, RecordForm, Removable, Sortable};

use crate::envelope::{applied, guard, saved, Committed, Op, ServiceContext};

const CREATE: Op = Op::new("category", "create");
const EDIT: Op = Op::new("category", "edit");
const REMOVE: Op = Op::new("category", "remove");
const SORT: Op = Op::new("category", "sort");
const HIDE: Op = Op::new("category", "hide");
const REVEAL: Op = Op::new("category", "reveal");

fn name_within(data: &Payload, limit: usize) -> bool {
    data.get("name")
        .and_then(serde_json::Value::as_str)
        .map(|name| name.len() <= limit)
        .unwrap_or(true)
}

/// Creates and edits categories
pub struct CategoryBuilder {
    ctx: ServiceContext,
}

impl CategoryBuilder {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn create<C>(&self, category: &mut C, data: &Payload) -> OpResult
    where
        C: RecordForm + Serialize,
    {
        self.ctx.run(CREATE, || {
            guard(
                name_within(data, self.ctx.config.max_name_length),
                "category.name.too.long",
            )?;
            let ok = category.save_from(data)?;
            saved(ok, category)?;
            Committed::of(category)
        })
    }

    pub fn edit<C>(&self, category: &mut C, data: &Payload) -> OpResult
    where
        C: RecordForm + Removable + Serialize,
    {
        self.ctx.run(EDIT, || {
            guard(!category.is_deleted(), "category.deleted")?;
            guard(
                name_within(data, self.ctx.config.max_name_length),
                "category.name.too.long",
            )?;
            let ok = category.save_from(data)?;
            saved(ok, category)?;
            Committed::of(category)
        })
    }
}

/// Removes categories
pub struct CategoryRemover {
    ctx: ServiceContext,
}

impl CategoryRemover {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn remove<C>(&self, category: &mut C) -> OpResult
    where
        C: Removable + Serialize,
    {
        self.ctx.run(REMOVE, || {
            guard(!category.is_deleted(), "category.already.deleted")?;
            let ok = category.delete()?;
            saved(ok, category)?;
            Committed::of(category)
        })
    }
}

/// Rewrites category ordering positions
///
/// The slice order is the desired display order; each entry's position is
/// rewritten to its index.
pub struct CategorySorter {
    ctx: ServiceContext,
}

impl CategorySorter {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn sort<C>(&self, categories: &mut [C]) -> OpResult
    where
        C: Sortable + Serialize,
    {
        self.ctx.run(SORT, || {
            for (index, category) in categories.iter_mut().enumerate() {
                let ok = category.set_position(index as i32)?;
                applied(ok, "category position")?;
            }
            Committed::of(&*categories)
        })
    }
}

/// Hides and reveals categories
pub struct CategoryHider {
    ctx: ServiceContext,
}

impl CategoryHider {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn hide<C>(&self, category: &mut C) -> OpResult
    where
        C: Hideable + Serialize,
    {
        self.ctx.run(HIDE, || {
            guard(!category.is_hidden(), "category.already.hidden")?;
            let ok = category.hide()?;
            saved(ok, category)?;
            Committed::of(category)
        })
    }

    pub fn reveal<C>(&self, category: &mut C) -> OpResult
    where
        C: Hideable + Serialize,
    {
        self.ctx.run(REVEAL, || {
            guard(category.is_hidden(), "category.not.hidden")?;
            let ok = category.reveal()?;
            saved(ok, category)?;
            Committed::of(category)
        })
    }
}
