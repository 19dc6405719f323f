//! Forum domain entities for Agora
//!
//! The aggregates here own their own state transitions and validation; the
//! service layer drives them through the narrow capability contracts in
//! [`capabilities`]. Mutating methods follow one contract throughout:
//! `Ok(true)` is success, `Ok(false)` is a recoverable validation failure
//! with detail available via `errors()`, and `Err` is an unexpected failure.

pub mod capabilities;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use capabilities::{
    Archivable, Bannable, Hideable, Likeable, Lockable, MemberTally, Movable, Pinnable,
    PostTally, RecordForm, Removable, Reportable, Sortable, Thumb, ThreadTally, Votable,
};
pub use entities::{
    Category, Forum, Group, Member, MemberStatus, Message, MessageSide, Poll, PollAnswer,
    PollMode, Post, Rank, Role, RoleGrant, Thread,
};
pub use errors::{DomainError, DomainResult};
pub use value_objects::{
    CategoryId, ForumId, GroupId, MemberId, MessageId, PollId, PostId, RankId, RoleId, ThreadId,
};
