//! Poll aggregate

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agora_common::{ErrorMap, Payload};

use crate::capabilities::{RecordForm, Removable, Reportable, Votable};
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{MemberId, PollId, ThreadId};

use super::{field_error, payload_bool, payload_str};

/// How many answers a single ballot may select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollMode {
    Single,
    Multiple,
}

/// One selectable poll answer with its running vote count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollAnswer {
    pub id: u64,
    pub text: String,
    pub votes: i64,
}

/// A poll attached to a thread
///
/// Voters are remembered by id so each member votes at most once; ballots
/// are anonymous beyond that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub id: PollId,
    pub thread_id: ThreadId,
    pub author_id: MemberId,
    pub question: String,
    pub mode: PollMode,
    pub answers: Vec<PollAnswer>,
    pub voter_ids: BTreeSet<MemberId>,
    pub closed: bool,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    errors: ErrorMap,
}

impl Poll {
    pub fn new(id: PollId, thread_id: ThreadId, author_id: MemberId) -> Self {
        let now = Utc::now();
        Self {
            id,
            thread_id,
            author_id,
            question: String::new(),
            mode: PollMode::Single,
            answers: Vec::new(),
            voter_ids: BTreeSet::new(),
            closed: false,
            deleted: false,
            created_at: now,
            updated_at: now,
            errors: ErrorMap::new(),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn live(&mut self) -> bool {
        if self.deleted {
            let mut errors = ErrorMap::new();
            field_error(&mut errors, "state", "poll is deleted");
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        true
    }
}

impl Reportable for Poll {
    fn errors(&self) -> ErrorMap {
        self.errors.clone()
    }
}

impl RecordForm for Poll {
    fn save_from(&mut self, data: &Payload) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        let mut errors = ErrorMap::new();

        let question = payload_str(data, "question")
            .unwrap_or(&self.question)
            .to_string();
        if question.trim().is_empty() {
            field_error(&mut errors, "question", "question cannot be empty");
        }

        let mut answers = self.answers.clone();
        if let Some(raw_answers) = data.get("answers").and_then(|v| v.as_array()) {
            // Replacing answers discards earlier ballots, so refuse once
            // voting has started.
            if !self.voter_ids.is_empty() {
                field_error(&mut errors, "answers", "answers cannot change after voting starts");
            } else {
                answers.clear();
                for (index, raw) in raw_answers.iter().enumerate() {
                    match raw.as_str() {
                        Some(text) if !text.trim().is_empty() => answers.push(PollAnswer {
                            id: index as u64 + 1,
                            text: text.to_string(),
                            votes: 0,
                        }),
                        _ => {
                            field_error(&mut errors, "answers", "answers must be non-empty strings");
                            break;
                        }
                    }
                }
            }
        }
        if answers.len() < 2 {
            field_error(&mut errors, "answers", "a poll needs at least two answers");
        }

        if !errors.is_empty() {
            self.errors = errors;
            return Ok(false);
        }

        self.question = question;
        self.answers = answers;
        if let Some(mode) = payload_str(data, "mode") {
            self.mode = match mode {
                "multiple" => PollMode::Multiple,
                _ => PollMode::Single,
            };
        }
        if let Some(closed) = payload_bool(data, "closed") {
            self.closed = closed;
        }
        self.touch();
        Ok(true)
    }
}

impl Removable for Poll {
    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn delete(&mut self) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        self.deleted = true;
        self.touch();
        Ok(true)
    }
}

impl Votable for Poll {
    fn is_closed(&self) -> bool {
        self.closed
    }

    fn has_voted(&self, member: MemberId) -> bool {
        self.voter_ids.contains(&member)
    }

    fn has_answer(&self, answer: u64) -> bool {
        self.answers.iter().any(|a| a.id == answer)
    }

    fn single_choice(&self) -> bool {
        self.mode == PollMode::Single
    }

    fn register_vote(&mut self, member: MemberId, answers: &[u64]) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        for answer_id in answers {
            let answer = self
                .answers
                .iter_mut()
                .find(|a| a.id == *answer_id)
                .ok_or_else(|| DomainError::InvalidState {
                    reason: format!("poll has no answer {answer_id}"),
                })?;
            answer.votes += 1;
        }
        self.voter_ids.insert(member);
        self.touch();
        Ok(true)
    }
}
