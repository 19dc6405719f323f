//! Capability contracts entities expose to the service layer
//!
//! Services constrain their entity parameters with these traits, so an
//! entity that cannot satisfy an operation is rejected at compile time.
//! Every mutator follows the same contract: `Ok(true)` on success,
//! `Ok(false)` on a recoverable validation failure (detail via
//! [`Reportable::errors`]), `Err` on unexpected failure.

use serde::{Deserialize, Serialize};

use agora_common::{ErrorMap, Payload};

use crate::errors::DomainResult;
use crate::value_objects::MemberId;

/// Exposes the validation errors collected by the most recent mutator call
pub trait Reportable {
    fn errors(&self) -> ErrorMap;
}

/// Can populate itself from a create/edit payload
pub trait RecordForm: Reportable {
    fn save_from(&mut self, data: &Payload) -> DomainResult<bool>;
}

/// Can be soft-deleted
pub trait Removable: Reportable {
    fn is_deleted(&self) -> bool;
    fn delete(&mut self) -> DomainResult<bool>;
}

/// Can report and change archived state
pub trait Archivable: Reportable {
    fn is_archived(&self) -> bool;
    fn archive(&mut self) -> DomainResult<bool>;
    fn revive(&mut self) -> DomainResult<bool>;
}

/// Can report and change hidden state
pub trait Hideable: Reportable {
    fn is_hidden(&self) -> bool;
    fn hide(&mut self) -> DomainResult<bool>;
    fn reveal(&mut self) -> DomainResult<bool>;
}

/// Can be re-parented to a destination aggregate
pub trait Movable: Reportable {
    type Destination;
    fn move_to(&mut self, destination: Self::Destination) -> DomainResult<bool>;
}

/// Can be pinned to the top of its listing
pub trait Pinnable: Reportable {
    fn is_pinned(&self) -> bool;
    fn pin(&mut self) -> DomainResult<bool>;
    fn unpin(&mut self) -> DomainResult<bool>;
}

/// Can be locked against further replies
pub trait Lockable: Reportable {
    fn is_locked(&self) -> bool;
    fn lock(&mut self) -> DomainResult<bool>;
    fn unlock(&mut self) -> DomainResult<bool>;
}

/// Carries an ordering position within its parent
pub trait Sortable: Reportable {
    fn position(&self) -> i32;
    fn set_position(&mut self, position: i32) -> DomainResult<bool>;
}

/// Can be banned and reinstated
pub trait Bannable: Reportable {
    fn is_banned(&self) -> bool;
    fn ban(&mut self) -> DomainResult<bool>;
    fn unban(&mut self) -> DomainResult<bool>;
}

/// A member's thumb on a likeable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Thumb {
    Up,
    Down,
}

/// Carries per-member thumb votes
pub trait Likeable: Reportable {
    fn current_thumb(&self, member: MemberId) -> Option<Thumb>;
    fn thumb_up(&mut self, member: MemberId) -> DomainResult<bool>;
    fn thumb_down(&mut self, member: MemberId) -> DomainResult<bool>;
    fn thumb_reset(&mut self, member: MemberId) -> DomainResult<bool>;
}

/// Accepts votes on a fixed answer set
pub trait Votable: Reportable {
    fn is_closed(&self) -> bool;
    fn has_voted(&self, member: MemberId) -> bool;
    fn has_answer(&self, answer: u64) -> bool;
    fn single_choice(&self) -> bool;
    fn register_vote(&mut self, member: MemberId, answers: &[u64]) -> DomainResult<bool>;
}

/// Maintains a derived thread counter
pub trait ThreadTally {
    fn tally_thread(&mut self, delta: i64) -> DomainResult<bool>;
}

/// Maintains a derived post counter
pub trait PostTally {
    fn tally_post(&mut self, delta: i64) -> DomainResult<bool>;
}

/// Maintains a derived member counter
pub trait MemberTally {
    fn tally_member(&mut self, delta: i64) -> DomainResult<bool>;
}
