//! Pre-resolved decider list assembly

use super::{AndDecider, Decider, OrDecider};

/// Assembles an ordered child list before a combinator ever sees it
///
/// Combinators accept only ready decider instances; this builder is the
/// place to collect them, preserving insertion order.
#[derive(Default)]
pub struct DeciderSet {
    children: Vec<Box<dyn Decider>>,
}

impl DeciderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decider, keeping insertion order
    pub fn with(mut self, decider: impl Decider + 'static) -> Self {
        self.children.push(Box::new(decider));
        self
    }

    /// Append an already-boxed decider
    pub fn with_boxed(mut self, decider: Box<dyn Decider>) -> Self {
        self.children.push(decider);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Build an all-must-pass combinator over the collected children
    pub fn into_and(self) -> AndDecider {
        AndDecider::new(self.children)
    }

    /// Build an any-may-pass combinator over the collected children
    pub fn into_or(self) -> OrDecider {
        OrDecider::new(self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decider::testing::ScriptedDecider;
    use crate::decider::{AuthorDecider, GroupDecider};
    use crate::Decision;

    #[test]
    fn test_collects_in_insertion_order() {
        let set = DeciderSet::new()
            .with(AuthorDecider::new())
            .with(GroupDecider::new());
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_into_and_preserves_children() {
        let mut decider = DeciderSet::new()
            .with(ScriptedDecider::new(Decision::Allow))
            .with(ScriptedDecider::new(Decision::Deny))
            .into_and();
        assert_eq!(decider.decide().unwrap(), Decision::Deny);
    }

    #[test]
    fn test_into_or_preserves_children() {
        let mut decider = DeciderSet::new()
            .with(ScriptedDecider::new(Decision::Abstain))
            .with(ScriptedDecider::new(Decision::Allow))
            .into_or();
        assert_eq!(decider.decide().unwrap(), Decision::Allow);
    }
}
