//! Cancellation and deadline checks for long-running traversals.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

/// External stop signal consulted on every traversal expansion step.
///
/// The default budget never runs out.
#[derive(Debug, Clone, Default)]
pub struct TraversalBudget {
    token: Option<CancellationToken>,
    deadline: Option<Instant>,
}

impl TraversalBudget {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn is_exhausted(&self) -> bool {
        if let Some(token) = &self.token {
            if token.is_cancelled() {
                return true;
            }
        }
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_never_exhausts() {
        assert!(!TraversalBudget::unbounded().is_exhausted());
    }

    #[test]
    fn test_cancelled_token_exhausts() {
        let token = CancellationToken::new();
        let budget = TraversalBudget::unbounded().with_token(token.clone());
        assert!(!budget.is_exhausted());
        token.cancel();
        assert!(budget.is_exhausted());
    }

    #[test]
    fn test_child_token_follows_parent() {
        let parent = CancellationToken::new();
        let budget = TraversalBudget::unbounded().with_token(parent.child_token());
        parent.cancel();
        assert!(budget.is_exhausted());
    }

    #[test]
    fn test_past_deadline_exhausts() {
        let budget = TraversalBudget::unbounded().with_deadline(Instant::now());
        assert!(budget.is_exhausted());
        let later = TraversalBudget::unbounded().with_timeout(Duration::from_secs(3600));
        assert!(!later.is_exhausted());
    }
}
