//! Thread services

use serde::Serialize;

use agora_common::{OpResult, Payload};
use agora_domain::{
    Archivable, Bannable, Forum, Hideable, Lockable, Member, Movable, Pinnable, PostTally,
    RecordForm, Removable, Thread, ThreadTally,
};

use crate::envelope::{applied, guard, saved, Committed, Op, ServiceContext};

const CREATE: Op = Op::new("thread", "create");
const EDIT: Op = Op::new("thread", "edit");
const REMOVE: Op = Op::new("thread", "remove");
const ARCHIVE: Op = Op::new("thread", "archive");
const REVIVE: Op = Op::new("thread", "revive");
const HIDE: Op = Op::new("thread", "hide");
const REVEAL: Op = Op::new("thread", "reveal");
const MOVE: Op = Op::new("thread", "move");
const PIN: Op = Op::new("thread", "pin");
const UNPIN: Op = Op::new("thread", "unpin");
const LOCK: Op = Op::new("thread", "lock");
const UNLOCK: Op = Op::new("thread", "unlock");

fn name_within(data: &Payload, limit: usize) -> bool {
    data.get("name")
        .and_then(serde_json::Value::as_str)
        .map(|name| name.len() <= limit)
        .unwrap_or(true)
}

/// Creates and edits threads
pub struct ThreadBuilder {
    ctx: ServiceContext,
}

impl ThreadBuilder {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Open a new thread in a forum, updating the forum's thread tally
    pub fn create(
        &self,
        thread: &mut Thread,
        author: &Member,
        forum: &mut Forum,
        data: &Payload,
    ) -> OpResult {
        self.ctx.run(CREATE, || {
            guard(!author.is_deleted(), "member.deleted")?;
            guard(!author.is_banned(), "member.banned")?;
            guard(!forum.deleted, "forum.deleted")?;
            guard(!forum.hidden, "forum.hidden")?;
            guard(
                name_within(data, self.ctx.config.max_name_length),
                "thread.name.too.long",
            )?;
            let ok = thread.save_from(data)?;
            saved(ok, thread)?;
            let ok = forum.tally_thread(1)?;
            applied(ok, "forum thread tally")?;
            Committed::of(thread)
        })
    }

    pub fn edit(&self, thread: &mut Thread, data: &Payload) -> OpResult {
        self.ctx.run(EDIT, || {
            guard(!thread.deleted, "thread.deleted")?;
            guard(!thread.locked, "thread.locked")?;
            guard(!thread.archived, "thread.archived")?;
            guard(
                name_within(data, self.ctx.config.max_name_length),
                "thread.name.too.long",
            )?;
            let ok = thread.save_from(data)?;
            saved(ok, thread)?;
            Committed::of(thread)
        })
    }
}

/// Removes archived threads, settling the forum tallies
pub struct ThreadRemover {
    ctx: ServiceContext,
}

impl ThreadRemover {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn remove(&self, thread: &mut Thread, forum: &mut Forum) -> OpResult {
        self.ctx.run(REMOVE, || {
            guard(!thread.deleted, "thread.already.deleted")?;
            guard(thread.archived, "thread.not.archived")?;
            let posts = thread.posts_count;
            let ok = thread.delete()?;
            saved(ok, thread)?;
            let ok = forum.tally_thread(-1)?;
            applied(ok, "forum thread tally")?;
            let ok = forum.tally_post(-posts)?;
            applied(ok, "forum post tally")?;
            Committed::of(thread)
        })
    }
}

/// Archives and revives threads
pub struct ThreadArchiver {
    ctx: ServiceContext,
}

impl ThreadArchiver {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn archive<T>(&self, thread: &mut T) -> OpResult
    where
        T: Archivable + Serialize,
    {
        self.ctx.run(ARCHIVE, || {
            guard(!thread.is_archived(), "thread.already.archived")?;
            let ok = thread.archive()?;
            saved(ok, thread)?;
            Committed::of(thread)
        })
    }

    pub fn revive<T>(&self, thread: &mut T) -> OpResult
    where
        T: Archivable + Serialize,
    {
        self.ctx.run(REVIVE, || {
            guard(thread.is_archived(), "thread.not.archived")?;
            let ok = thread.revive()?;
            saved(ok, thread)?;
            Committed::of(thread)
        })
    }
}

/// Hides and reveals threads
pub struct ThreadHider {
    ctx: ServiceContext,
}

impl ThreadHider {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn hide<T>(&self, thread: &mut T) -> OpResult
    where
        T: Hideable + Serialize,
    {
        self.ctx.run(HIDE, || {
            guard(!thread.is_hidden(), "thread.already.hidden")?;
            let ok = thread.hide()?;
            saved(ok, thread)?;
            Committed::of(thread)
        })
    }

    pub fn reveal<T>(&self, thread: &mut T) -> OpResult
    where
        T: Hideable + Serialize,
    {
        self.ctx.run(REVEAL, || {
            guard(thread.is_hidden(), "thread.not.hidden")?;
            let ok = thread.reveal()?;
            saved(ok, thread)?;
            Committed::of(thread)
        })
    }
}

/// Moves a thread between forums, carrying its post tally along
pub struct ThreadMover {
    ctx: ServiceContext,
}

impl ThreadMover {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn move_to(&self, thread: &mut Thread, from: &mut Forum, to: &mut Forum) -> OpResult {
        self.ctx.run(MOVE, || {
            guard(!thread.deleted, "thread.deleted")?;
            guard(!to.deleted, "forum.deleted")?;
            guard(from.id != to.id, "thread.move.same.forum")?;
            let posts = thread.posts_count;
            let ok = thread.move_to(to.id)?;
            saved(ok, thread)?;
            let ok = from.tally_thread(-1)?;
            applied(ok, "source forum thread tally")?;
            let ok = from.tally_post(-posts)?;
            applied(ok, "source forum post tally")?;
            let ok = to.tally_thread(1)?;
            applied(ok, "destination forum thread tally")?;
            let ok = to.tally_post(posts)?;
            applied(ok, "destination forum post tally")?;
            Committed::of(thread)
        })
    }
}

/// Pins and unpins threads
pub struct ThreadPinner {
    ctx: ServiceContext,
}

impl ThreadPinner {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn pin<T>(&self, thread: &mut T) -> OpResult
    where
        T: Pinnable + Serialize,
    {
        self.ctx.run(PIN, || {
            guard(!thread.is_pinned(), "thread.already.pinned")?;
            let ok = thread.pin()?;
            saved(ok, thread)?;
            Committed::of(thread)
        })
    }

    pub fn unpin<T>(&self, thread: &mut T) -> OpResult
    where
        T: Pinnable + Serialize,
    {
        self.ctx.run(UNPIN, || {
            guard(thread.is_pinned(), "thread.not.pinned")?;
            let ok = thread.unpin()?;
            saved(ok, thread)?;
            Committed::of(thread)
        })
    }
}

/// Locks and unlocks threads against replies
pub struct ThreadLocker {
    ctx: ServiceContext,
}

impl ThreadLocker {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn lock<T>(&self, thread: &mut T) -> OpResult
    where
        T: Lockable + Serialize,
    {
        self.ctx.run(LOCK, || {
            guard(!thread.is_locked(), "thread.already.locked")?;
            let ok = thread.lock()?;
            saved(ok, thread)?;
            Committed::of(thread)
        })
    }

    pub fn unlock<T>(&self, thread: &mut T) -> OpResult
    where
        T: Lockable + Serialize,
    {
        self.ctx.run(UNLOCK, || {
            guard(thread.is_locked(), "thread.not.locked")?;
            let ok = thread.unlock()?;
            saved(ok, thread)?;
            Committed::of(thread)
        })
    }
}
