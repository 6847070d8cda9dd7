//! Shared guardrails for traversal bounds.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::errors::{CallScopeError, CallScopeResult};

pub const MAX_TRAVERSAL_DEPTH: i64 = 32;
pub const DEFAULT_TRAVERSAL_DEPTH: i64 = 5;
pub const MAX_PATHS: usize = 10_000;

pub fn clamp_int(value: i64, minimum: i64, maximum: i64) -> i64 {
    value.max(minimum).min(maximum)
}

pub fn clamp_depth(value: i64, maximum: i64) -> i64 {
    clamp_int(value, 1, maximum)
}

/// A validated traversal depth, in hops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MaxDepth(usize);

impl MaxDepth {
    /// Reject depths below 1 and clamp to [`MAX_TRAVERSAL_DEPTH`].
    pub fn new(value: i64) -> CallScopeResult<Self> {
        Self::with_ceiling(value, MAX_TRAVERSAL_DEPTH)
    }

    pub fn with_ceiling(value: i64, ceiling: i64) -> CallScopeResult<Self> {
        if value < 1 {
            return Err(CallScopeError::InvalidDepth(value));
        }
        Ok(Self(clamp_depth(value, ceiling.max(1)) as usize))
    }

    /// Like [`MaxDepth::new`], but clamps to the configured
    /// `max_depth_ceiling` (`CALLSCOPE_MAX_DEPTH`).
    pub fn from_config(value: i64, config: &EngineConfig) -> CallScopeResult<Self> {
        Self::with_ceiling(value, config.max_depth_ceiling)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for MaxDepth {
    fn default() -> Self {
        Self(DEFAULT_TRAVERSAL_DEPTH as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_depth() {
        assert_eq!(clamp_depth(0, 6), 1);
        assert_eq!(clamp_depth(4, 6), 4);
        assert_eq!(clamp_depth(40, 6), 6);
    }

    #[test]
    fn test_max_depth_rejects_below_one() {
        assert!(matches!(
            MaxDepth::new(0),
            Err(CallScopeError::InvalidDepth(0))
        ));
        assert!(matches!(
            MaxDepth::new(-3),
            Err(CallScopeError::InvalidDepth(-3))
        ));
    }

    #[test]
    fn test_max_depth_clamps_to_ceiling() {
        assert_eq!(MaxDepth::new(5).unwrap().get(), 5);
        assert_eq!(MaxDepth::new(1000).unwrap().get(), MAX_TRAVERSAL_DEPTH as usize);
        assert_eq!(MaxDepth::with_ceiling(9, 3).unwrap().get(), 3);
    }

    #[test]
    fn test_max_depth_from_config_uses_ceiling() {
        let config = EngineConfig {
            max_depth_ceiling: 3,
            ..EngineConfig::default()
        };
        assert_eq!(MaxDepth::from_config(10, &config).unwrap().get(), 3);
        assert_eq!(MaxDepth::from_config(2, &config).unwrap().get(), 2);
        assert!(MaxDepth::from_config(0, &config).is_err());
    }

    #[test]
    fn test_default_depth() {
        assert_eq!(MaxDepth::default().get(), DEFAULT_TRAVERSAL_DEPTH as usize);
    }
}
