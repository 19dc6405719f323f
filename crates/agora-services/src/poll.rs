//! Poll services

use serde::Serialize;

use agora_common::{OpResult, Payload};
use agora_domain::{Bannable, Member, Poll, RecordForm, Removable, Thread, Votable};

use crate::envelope::{guard, saved, Committed, Op, ServiceContext};

const CREATE: Op = Op::new("poll", "create");
const EDIT: Op = Op::new("poll", "edit");
const REMOVE: Op = Op::new("poll", "remove");
const VOTE: Op = Op::new("poll", "vote");

fn answer_count_within(data: &Payload, limit: usize) -> bool {
    data.get("answers")
        .and_then(serde_json::Value::as_array)
        .map(|answers| answers.len() <= limit)
        .unwrap_or(true)
}

/// Creates and edits polls attached to threads
pub struct PollBuilder {
    ctx: ServiceContext,
}

impl PollBuilder {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn create(&self, poll: &mut Poll, thread: &Thread, data: &Payload) -> OpResult {
        self.ctx.run(CREATE, || {
            guard(!thread.deleted, "thread.deleted")?;
            guard(!thread.locked, "thread.locked")?;
            guard(
                answer_count_within(data, self.ctx.config.max_poll_answers),
                "poll.too.many.answers",
            )?;
            let ok = poll.save_from(data)?;
            saved(ok, poll)?;
            Committed::of(poll)
        })
    }

    pub fn edit(&self, poll: &mut Poll, data: &Payload) -> OpResult {
        self.ctx.run(EDIT, || {
            guard(!poll.deleted, "poll.deleted")?;
            guard(
                answer_count_within(data, self.ctx.config.max_poll_answers),
                "poll.too.many.answers",
            )?;
            let ok = poll.save_from(data)?;
            saved(ok, poll)?;
            Committed::of(poll)
        })
    }
}

/// Removes polls
pub struct PollRemover {
    ctx: ServiceContext,
}

impl PollRemover {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn remove<P>(&self, poll: &mut P) -> OpResult
    where
        P: Removable + Serialize,
    {
        self.ctx.run(REMOVE, || {
            guard(!poll.is_deleted(), "poll.already.deleted")?;
            let ok = poll.delete()?;
            saved(ok, poll)?;
            Committed::of(poll)
        })
    }
}

/// Registers ballots on open polls
pub struct PollVoter {
    ctx: ServiceContext,
}

impl PollVoter {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn vote(&self, poll: &mut Poll, voter: &Member, answers: &[u64]) -> OpResult {
        self.ctx.run(VOTE, || {
            guard(!voter.is_deleted(), "member.deleted")?;
            guard(!voter.is_banned(), "member.banned")?;
            guard(!poll.deleted, "poll.deleted")?;
            guard(!poll.is_closed(), "poll.closed")?;
            guard(!poll.has_voted(voter.id), "poll.already.voted")?;
            guard(!answers.is_empty(), "poll.vote.empty")?;
            guard(
                !poll.single_choice() || answers.len() == 1,
                "poll.vote.too.many",
            )?;
            guard(
                answers.iter().all(|answer| poll.has_answer(*answer)),
                "poll.vote.unknown.answer",
            )?;
            let ok = poll.register_vote(voter.id, answers)?;
            saved(ok, poll)?;
            Committed::of(poll)
        })
    }
}
