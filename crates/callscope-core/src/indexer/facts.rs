//! Loading raw call facts emitted by the semantic analyzer.
//!
//! Two layouts are accepted: a JSON array of facts, or JSON Lines (one fact
//! per line, blank lines ignored) for files ending in `.jsonl` / `.ndjson`.

use std::path::Path;

use crate::errors::{CallScopeError, CallScopeResult};
use crate::models::RawCallFact;

pub fn load_facts(path: &Path) -> CallScopeResult<Vec<RawCallFact>> {
    let content = std::fs::read_to_string(path)?;
    let is_lines = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("jsonl") | Some("ndjson")
    );
    if is_lines {
        parse_fact_lines(&content)
    } else {
        parse_facts(&content)
    }
}

pub fn parse_facts(content: &str) -> CallScopeResult<Vec<RawCallFact>> {
    Ok(serde_json::from_str(content)?)
}

pub fn parse_fact_lines(content: &str) -> CallScopeResult<Vec<RawCallFact>> {
    let mut facts = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let fact = serde_json::from_str(trimmed).map_err(|e| CallScopeError::FactInput {
            line: index + 1,
            message: e.to_string(),
        })?;
        facts.push(fact);
    }
    Ok(facts)
}
