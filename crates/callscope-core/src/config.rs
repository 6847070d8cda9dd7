//! Engine configuration with environment overrides.

use crate::query::guards::MAX_TRAVERSAL_DEPTH;

/// Default cap on dispatch-chain hops followed by the normalizer.
pub const DEFAULT_MAX_DISPATCH_HOPS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub max_dispatch_hops: usize,
    pub ingest_workers: usize,
    pub max_depth_ceiling: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_dispatch_hops: DEFAULT_MAX_DISPATCH_HOPS,
            ingest_workers: rayon::current_num_threads().max(1),
            max_depth_ceiling: MAX_TRAVERSAL_DEPTH,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `CALLSCOPE_MAX_DISPATCH_HOPS`,
    /// `CALLSCOPE_INGEST_WORKERS`, and `CALLSCOPE_MAX_DEPTH`.
    ///
    /// Unset, empty, unparsable, or non-positive values keep the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_dispatch_hops: env_positive("CALLSCOPE_MAX_DISPATCH_HOPS")
                .map(|v| v as usize)
                .unwrap_or(defaults.max_dispatch_hops),
            ingest_workers: env_positive("CALLSCOPE_INGEST_WORKERS")
                .map(|v| v as usize)
                .unwrap_or(defaults.ingest_workers),
            max_depth_ceiling: env_positive("CALLSCOPE_MAX_DEPTH")
                .unwrap_or(defaults.max_depth_ceiling),
        }
    }
}

fn env_positive(name: &str) -> Option<i64> {
    let raw = std::env::var(name).ok()?;
    parse_positive(&raw)
}

fn parse_positive(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(v) if v > 0 => Some(v),
        _ => None,
    }
}
