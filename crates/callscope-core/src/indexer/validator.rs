//! Required-field validation for raw call facts.

use serde::Serialize;

use crate::models::{DispatchKind, RawCallFact, SymbolDescriptor};

/// Result of validating one fact.
///
/// `normalized` is always safe to inspect: strings are trimmed and the line
/// number is at least 1 even when `is_valid` is false.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub normalized: RawCallFact,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataValidator;

impl MetadataValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_and_normalize(&self, fact: &RawCallFact) -> ValidationOutcome {
        let mut errors = Vec::new();
        let mut normalized = RawCallFact {
            caller: trim_descriptor(&fact.caller),
            callee: trim_descriptor(&fact.callee),
            file_path: fact.file_path.trim().to_string(),
            line_number: fact.line_number,
        };

        require(&normalized.caller.fully_qualified_name, "caller", &mut errors);
        require(&normalized.callee.fully_qualified_name, "callee", &mut errors);
        require(&normalized.caller.containing_type, "caller_type", &mut errors);
        require(&normalized.callee.containing_type, "callee_type", &mut errors);
        require(&normalized.file_path, "file_path", &mut errors);

        if fact.line_number < 1 {
            errors.push(format!(
                "Invalid line number {}: must be >= 1",
                fact.line_number
            ));
            normalized.line_number = 1;
        }

        ValidationOutcome {
            is_valid: errors.is_empty(),
            errors,
            normalized,
        }
    }
}

fn require(value: &str, label: &str, errors: &mut Vec<String>) {
    if value.is_empty() {
        errors.push(format!("Required field '{label}' is missing or empty"));
    }
}

fn dispatch_children(symbol: &SymbolDescriptor) -> &[SymbolDescriptor] {
    match &symbol.dispatch {
        DispatchKind::Ordinary | DispatchKind::InterfaceMember => &[],
        DispatchKind::Override { base } => std::slice::from_ref(base.as_ref()),
        DispatchKind::ExplicitInterfaceImpl { targets } => targets,
        DispatchKind::ExtensionReduced { origin } => std::slice::from_ref(origin.as_ref()),
    }
}

/// Trim every descriptor in the dispatch tree without recursing, so chains
/// of any length are safe.
fn trim_descriptor(root: &SymbolDescriptor) -> SymbolDescriptor {
    // Pre-order: each descriptor precedes its dispatch children.
    let mut order: Vec<&SymbolDescriptor> = Vec::new();
    let mut pending = vec![root];
    while let Some(symbol) = pending.pop() {
        order.push(symbol);
        pending.extend(dispatch_children(symbol).iter().rev());
    }

    // Walking the pre-order backwards finishes every child before its
    // parent; a parent's children sit on top of `built` first-to-last.
    let mut built: Vec<SymbolDescriptor> = Vec::with_capacity(order.len());
    for symbol in order.into_iter().rev() {
        let dispatch = match &symbol.dispatch {
            DispatchKind::Ordinary => DispatchKind::Ordinary,
            DispatchKind::InterfaceMember => DispatchKind::InterfaceMember,
            DispatchKind::Override { .. } => DispatchKind::Override {
                base: Box::new(built.pop().unwrap_or_default()),
            },
            DispatchKind::ExplicitInterfaceImpl { targets } => {
                let trimmed = (0..targets.len())
                    .map(|_| built.pop().unwrap_or_default())
                    .collect();
                DispatchKind::ExplicitInterfaceImpl { targets: trimmed }
            }
            DispatchKind::ExtensionReduced { .. } => DispatchKind::ExtensionReduced {
                origin: Box::new(built.pop().unwrap_or_default()),
            },
        };
        built.push(SymbolDescriptor {
            fully_qualified_name: symbol.fully_qualified_name.trim().to_string(),
            containing_type: symbol.containing_type.trim().to_string(),
            containing_namespace: symbol.containing_namespace.trim().to_string(),
            dispatch,
        });
    }
    built.pop().unwrap_or_default()
}
