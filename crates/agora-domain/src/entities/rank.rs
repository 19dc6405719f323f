//! Rank aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agora_common::{ErrorMap, Payload};

use crate::capabilities::{RecordForm, Removable, Reportable};
use crate::errors::DomainResult;
use crate::value_objects::RankId;

use super::{field_error, payload_i64, payload_str};

/// A vanity rank earned by post count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rank {
    pub id: RankId,
    pub name: String,
    pub min_posts: i64,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    errors: ErrorMap,
}

impl Rank {
    pub fn new(id: RankId) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: String::new(),
            min_posts: 0,
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
            field_error(&mut errors, "state", "rank is deleted");
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        true
    }
}

impl Reportable for Rank {
    fn errors(&self) -> ErrorMap {
        self.errors.clone()
    }
}

impl RecordForm for Rank {
    fn save_from(&mut self, data: &Payload) -> DomainResult<bool> {
        if !self.live() {
            return Ok(false);
        }
        let mut errors = ErrorMap::new();

        let name = payload_str(data, "name").unwrap_or(&self.name).to_string();
        if name.trim().is_empty() {
            field_error(&mut errors, "name", "name cannot be empty");
        }

        let min_posts = payload_i64(data, "min_posts").unwrap_or(self.min_posts);
        if min_posts < 0 {
            field_error(&mut errors, "min_posts", "minimum post count cannot be negative");
        }

        if !errors.is_empty() {
            self.errors = errors;
            return Ok(false);
        }

        self.name = name;
        self.min_posts = min_posts;
        self.touch();
        Ok(true)
    }
}

impl Removable for Rank {
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_from_validates_min_posts() {
        let mut rank = Rank::new(RankId::new(1));
        let data: Payload = [
            ("name".to_string(), json!("Veteran")),
            ("min_posts".to_string(), json!(-5)),
        ]
        .into_iter()
        .collect();
        assert!(!rank.save_from(&data).unwrap());
        assert!(rank.errors().contains_key("min_posts"));
    }

    #[test]
    fn test_save_from_accepts_threshold() {
        let mut rank = Rank::new(RankId::new(1));
        let data: Payload = [
            ("name".to_string(), json!("Veteran")),
            ("min_posts".to_string(), json!(500)),
        ]
        .into_iter()
        .collect();
        assert!(rank.save_from(&data).unwrap());
        assert_eq!(rank.min_posts, 500);
    }
}
