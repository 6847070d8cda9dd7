//! Error types for the callscope core library.

/// Top-level error enum for the callscope core library.
#[derive(Debug, thiserror::Error)]
pub enum CallScopeError {
    #[error("Malformed call fact: {}", .0.join("; "))]
    MalformedFact(Vec<String>),

    #[error("Dispatch chain for '{fqn}' exceeds {hops} hops")]
    NormalizationOverflow { fqn: String, hops: usize },

    #[error("Invalid traversal depth {0}: must be >= 1")]
    InvalidDepth(i64),

    #[error("Fact input error at line {line}: {message}")]
    FactInput { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CallScopeError {
    /// Short stable label used in ingestion reports.
    pub fn kind(&self) -> &'static str {
        match self {
            CallScopeError::MalformedFact(_) => "malformed_fact",
            CallScopeError::NormalizationOverflow { .. } => "normalization_overflow",
            CallScopeError::InvalidDepth(_) => "invalid_depth",
            CallScopeError::FactInput { .. } => "fact_input",
            CallScopeError::Io(_) => "io",
            CallScopeError::Json(_) => "json",
        }
    }
}

pub type CallScopeResult<T> = Result<T, CallScopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_fact_keeps_messages_apart() {
        let err = CallScopeError::MalformedFact(vec![
            "Required field 'caller' is missing or empty".to_string(),
            "note; with a semicolon".to_string(),
        ]);
        assert_eq!(err.kind(), "malformed_fact");
        assert_eq!(
            err.to_string(),
            "Malformed call fact: Required field 'caller' is missing or empty; note; with a semicolon"
        );
    }
}
