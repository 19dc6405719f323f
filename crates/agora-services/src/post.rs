//! Post services

use serde::Serialize;

use agora_common::{OpResult, Payload};
use agora_domain::{
    Archivable, Bannable, Forum, Likeable, Member, Movable, Post, PostTally, RecordForm,
    Removable, Thread, Thumb,
};

use crate::envelope::{applied, guard, saved, Committed, Op, ServiceContext};

const CREATE: Op = Op::new("post", "create");
const EDIT: Op = Op::new("post", "edit");
const REMOVE: Op = Op::new("post", "remove");
const ARCHIVE: Op = Op::new("post", "archive");
const REVIVE: Op = Op::new("post", "revive");
const MOVE: Op = Op::new("post", "move");
const THUMB_UP: Op = Op::new("post", "thumb_up");
const THUMB_DOWN: Op = Op::new("post", "thumb_down");
const THUMB_RESET: Op = Op::new("post", "thumb_reset");

fn content_within(data: &Payload, limit: usize) -> bool {
    data.get("content")
        .and_then(serde_json::Value::as_str)
        .map(|content| content.len() <= limit)
        .unwrap_or(true)
}

/// Creates and edits posts
pub struct PostBuilder {
    ctx: ServiceContext,
}

impl PostBuilder {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a post to a thread, updating the thread, forum and author post
    /// tallies
    pub fn create(
        &self,
        post: &mut Post,
        author: &mut Member,
        thread: &mut Thread,
        forum: &mut Forum,
        data: &Payload,
    ) -> OpResult {
        self.ctx.run(CREATE, || {
            guard(!author.is_deleted(), "member.deleted")?;
            guard(!author.is_banned(), "member.banned")?;
            guard(!thread.deleted, "thread.deleted")?;
            guard(!thread.locked, "thread.locked")?;
            guard(!thread.archived, "thread.archived")?;
            guard(
                content_within(data, self.ctx.config.max_content_length),
                "post.content.too.long",
            )?;
            let ok = post.save_from(data)?;
            saved(ok, post)?;
            let ok = thread.tally_post(1)?;
            applied(ok, "thread post tally")?;
            let ok = forum.tally_post(1)?;
            applied(ok, "forum post tally")?;
            let ok = author.tally_post(1)?;
            applied(ok, "member post tally")?;
            Committed::of(post)
        })
    }

    pub fn edit(&self, post: &mut Post, data: &Payload) -> OpResult {
        self.ctx.run(EDIT, || {
            guard(!post.deleted, "post.deleted")?;
            guard(!post.archived, "post.archived")?;
            guard(
                content_within(data, self.ctx.config.max_content_length),
                "post.content.too.long",
            )?;
            let ok = post.save_from(data)?;
            saved(ok, post)?;
            Committed::of(post)
        })
    }
}

/// Removes archived posts, settling every affected tally
pub struct PostRemover {
    ctx: ServiceContext,
}

impl PostRemover {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn remove(
        &self,
        post: &mut Post,
        author: &mut Member,
        thread: &mut Thread,
        forum: &mut Forum,
    ) -> OpResult {
        self.ctx.run(REMOVE, || {
            guard(!post.deleted, "post.already.deleted")?;
            guard(post.archived, "post.not.archived")?;
            let ok = post.delete()?;
            saved(ok, post)?;
            let ok = thread.tally_post(-1)?;
            applied(ok, "thread post tally")?;
            let ok = forum.tally_post(-1)?;
            applied(ok, "forum post tally")?;
            let ok = author.tally_post(-1)?;
            applied(ok, "member post tally")?;
            Committed::of(post)
        })
    }
}

/// Archives and revives posts
pub struct PostArchiver {
    ctx: ServiceContext,
}

impl PostArchiver {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn archive<P>(&self, post: &mut P) -> OpResult
    where
        P: Archivable + Serialize,
    {
        self.ctx.run(ARCHIVE, || {
            guard(!post.is_archived(), "post.already.archived")?;
            let ok = post.archive()?;
            saved(ok, post)?;
            Committed::of(post)
        })
    }

    pub fn revive<P>(&self, post: &mut P) -> OpResult
    where
        P: Archivable + Serialize,
    {
        self.ctx.run(REVIVE, || {
            guard(post.is_archived(), "post.not.archived")?;
            let ok = post.revive()?;
            saved(ok, post)?;
            Committed::of(post)
        })
    }
}

/// Moves a post to another thread within the same forum
///
/// Cross-forum moves go through the thread mover; keeping the forum fixed
/// means only the two thread tallies change.
pub struct PostMover {
    ctx: ServiceContext,
}

impl PostMover {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn move_to(&self, post: &mut Post, from: &mut Thread, to: &mut Thread) -> OpResult {
        self.ctx.run(MOVE, || {
            guard(!post.deleted, "post.deleted")?;
            guard(from.id != to.id, "post.move.same.thread")?;
            guard(from.forum_id == to.forum_id, "post.move.cross.forum")?;
            guard(!to.deleted, "thread.deleted")?;
            guard(!to.locked, "thread.locked")?;
            guard(!to.archived, "thread.archived")?;
            let ok = post.move_to((to.id, to.forum_id))?;
            saved(ok, post)?;
            let ok = from.tally_post(-1)?;
            applied(ok, "source thread post tally")?;
            let ok = to.tally_post(1)?;
            applied(ok, "destination thread post tally")?;
            Committed::of(post)
        })
    }
}

/// Records thumb votes on posts
pub struct PostLiker {
    ctx: ServiceContext,
}

impl PostLiker {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn thumb_up(&self, post: &mut Post, member: &Member) -> OpResult {
        self.ctx.run(THUMB_UP, || {
            guard(!member.is_banned(), "member.banned")?;
            guard(!post.deleted, "post.deleted")?;
            guard(post.author_id != member.id, "post.like.own")?;
            guard(
                post.current_thumb(member.id) != Some(Thumb::Up),
                "post.already.liked",
            )?;
            let ok = post.thumb_up(member.id)?;
            saved(ok, post)?;
            Committed::of(post)
        })
    }

    pub fn thumb_down(&self, post: &mut Post, member: &Member) -> OpResult {
        self.ctx.run(THUMB_DOWN, || {
            guard(!member.is_banned(), "member.banned")?;
            guard(!post.deleted, "post.deleted")?;
            guard(post.author_id != member.id, "post.like.own")?;
            guard(
                post.current_thumb(member.id) != Some(Thumb::Down),
                "post.already.disliked",
            )?;
            let ok = post.thumb_down(member.id)?;
            saved(ok, post)?;
            Committed::of(post)
        })
    }

    pub fn thumb_reset(&self, post: &mut Post, member: &Member) -> OpResult {
        self.ctx.run(THUMB_RESET, || {
            guard(!post.deleted, "post.deleted")?;
            guard(post.current_thumb(member.id).is_some(), "post.not.rated")?;
            let ok = post.thumb_reset(member.id)?;
            saved(ok, post)?;
            Committed::of(post)
        })
    }
}
