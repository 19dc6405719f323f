//! Private message services
//!
//! Message state is per participant side: archiving and removal act on the
//! acting member's copy only. A copy must be archived before it can be
//! removed.

use agora_common::{OpResult, Payload};
use agora_domain::{Bannable, Member, Message, MessageSide, RecordForm, Removable};

use crate::envelope::{guard, saved, Committed, Op, ServiceContext};

const SEND: Op = Op::new("message", "send");
const REPLY: Op = Op::new("message", "reply");
const ARCHIVE: Op = Op::new("message", "archive");
const REVIVE: Op = Op::new("message", "revive");
const REMOVE: Op = Op::new("message", "remove");

fn within(data: &Payload, key: &str, limit: usize) -> bool {
    data.get(key)
        .and_then(serde_json::Value::as_str)
        .map(|value| value.len() <= limit)
        .unwrap_or(true)
}

/// Sends private messages between members
pub struct Messenger {
    ctx: ServiceContext,
}

impl Messenger {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn send(
        &self,
        message: &mut Message,
        sender: &Member,
        receiver: &Member,
        data: &Payload,
    ) -> OpResult {
        self.ctx.run(SEND, || {
            self.deliverable(message, sender, receiver, data)?;
            let ok = message.save_from(data)?;
            saved(ok, message)?;
            Committed::of(message)
        })
    }

    /// Send a message linked to an earlier one in the conversation
    pub fn reply(
        &self,
        message: &mut Message,
        original: &Message,
        sender: &Member,
        receiver: &Member,
        data: &Payload,
    ) -> OpResult {
        self.ctx.run(REPLY, || {
            guard(original.involves(sender.id), "message.reply.foreign")?;
            self.deliverable(message, sender, receiver, data)?;
            let ok = message.save_from(data)?;
            saved(ok, message)?;
            let ok = message.mark_reply(original.id)?;
            saved(ok, message)?;
            Committed::of(message)
        })
    }

    fn deliverable(
        &self,
        message: &Message,
        sender: &Member,
        receiver: &Member,
        data: &Payload,
    ) -> crate::error::ServiceResult<()> {
        guard(message.sender_id == sender.id, "message.foreign")?;
        guard(message.receiver_id == receiver.id, "message.foreign")?;
        guard(sender.id != receiver.id, "message.self")?;
        guard(!sender.is_banned(), "member.banned")?;
        guard(!receiver.is_deleted(), "member.deleted")?;
        guard(
            !receiver.is_ignoring(sender.id),
            "message.receiver.ignoring",
        )?;
        guard(
            within(data, "subject", self.ctx.config.max_subject_length),
            "message.subject.too.long",
        )?;
        guard(
            within(data, "content", self.ctx.config.max_content_length),
            "message.content.too.long",
        )?;
        Ok(())
    }
}

/// Archives and revives a participant's copy of a message
pub struct MessageArchiver {
    ctx: ServiceContext,
}

impl MessageArchiver {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn archive(&self, message: &mut Message, participant: &Member) -> OpResult {
        self.ctx.run(ARCHIVE, || {
            let side = message.side_of(participant.id);
            guard(side.is_some(), "message.foreign")?;
            guard(side != Some(MessageSide::Deleted), "message.deleted")?;
            guard(side != Some(MessageSide::Archived), "message.already.archived")?;
            let ok = message.archive_side(participant.id)?;
            saved(ok, message)?;
            Committed::of(message)
        })
    }

    pub fn revive(&self, message: &mut Message, participant: &Member) -> OpResult {
        self.ctx.run(REVIVE, || {
            guard(
                message.side_of(participant.id) == Some(MessageSide::Archived),
                "message.not.archived",
            )?;
            let ok = message.revive_side(participant.id)?;
            saved(ok, message)?;
            Committed::of(message)
        })
    }
}

/// Removes a participant's copy of an archived message
pub struct MessageRemover {
    ctx: ServiceContext,
}

impl MessageRemover {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn remove(&self, message: &mut Message, participant: &Member) -> OpResult {
        self.ctx.run(REMOVE, || {
            let side = message.side_of(participant.id);
            guard(side.is_some(), "message.foreign")?;
            guard(side == Some(MessageSide::Archived), "message.not.archived")?;
            let ok = message.delete_side(participant.id)?;
            saved(ok, message)?;
            Committed::of(message)
        })
    }
}
