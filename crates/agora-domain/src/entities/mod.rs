//! Forum aggregates

mod category;
mod forum;
mod group;
mod member;
mod message;
mod poll;
mod post;
mod rank;
mod role;
mod thread;

pub use category::Category;
pub use forum::Forum;
pub use group::Group;
pub use member::{Member, MemberStatus};
pub use message::{Message, MessageSide};
pub use poll::{Poll, PollAnswer, PollMode};
pub use post::Post;
pub use rank::Rank;
pub use role::{Role, RoleGrant};
pub use thread::Thread;

use agora_common::{ErrorMap, Payload};
use serde_json::Value;

use crate::errors::{DomainError, DomainResult};

/// Insert a validation error for one field
pub(crate) fn field_error(map: &mut ErrorMap, field: &str, message: &str) {
    map.insert(field.to_string(), Value::String(message.to_string()));
}

pub(crate) fn payload_str<'a>(data: &'a Payload, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str)
}

pub(crate) fn payload_i64(data: &Payload, key: &str) -> Option<i64> {
    data.get(key).and_then(Value::as_i64)
}

pub(crate) fn payload_bool(data: &Payload, key: &str) -> Option<bool> {
    data.get(key).and_then(Value::as_bool)
}

/// Apply a delta to a derived counter, refusing to go negative
pub(crate) fn apply_delta(counter: &str, value: i64, delta: i64) -> DomainResult<i64> {
    let next = value + delta;
    if next < 0 {
        return Err(DomainError::CounterUnderflow {
            counter: counter.to_string(),
        });
    }
    Ok(next)
}

/// Derive a URL-safe slug from a display name
pub(crate) fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}
