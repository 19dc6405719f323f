//! Transactional service operations for the Agora forum engine
//!
//! Every service wraps a single business operation in the same envelope:
//! a cancellable before-hook, a transactional scope, precondition checks
//! against the target entity, delegation to the entity's own mutating
//! method, commit or rollback, and an after-hook carrying a snapshot of
//! the mutated entity. The uniform [`agora_common::OpResult`] is the only
//! value returned; no failure escapes as an error.

pub mod category;
pub mod envelope;
pub mod error;
pub mod forum;
pub mod group;
pub mod member;
pub mod message;
pub mod poll;
pub mod post;
pub mod rank;
pub mod role;
pub mod thread;

pub use category::{CategoryBuilder, CategoryHider, CategoryRemover, CategorySorter};
pub use envelope::{Op, ServiceContext};
pub use error::{ServiceError, ServiceResult};
pub use forum::{ForumBuilder, ForumHider, ForumMover, ForumRemover, ForumSorter};
pub use group::{GroupBuilder, GroupKeeper, GroupRemover};
pub use member::{MemberAcquaintance, MemberBanisher, MemberBuilder, MemberRemover, RankGranter};
pub use message::{MessageArchiver, MessageRemover, Messenger};
pub use poll::{PollBuilder, PollRemover, PollVoter};
pub use post::{PostArchiver, PostBuilder, PostLiker, PostMover, PostRemover};
pub use rank::{RankBuilder, RankRemover};
pub use role::{RoleBuilder, RoleGranter, RoleRemover};
pub use thread::{
    ThreadArchiver, ThreadBuilder, ThreadHider, ThreadLocker, ThreadMover, ThreadPinner,
    ThreadRemover,
};
