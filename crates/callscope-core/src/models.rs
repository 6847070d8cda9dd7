//! Shared typed models used across normalization, indexing, and query layers.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// 1. DispatchKind
// ---------------------------------------------------------------------------

/// How the semantic analyzer bound a method-like symbol.
///
/// `Override` and `ExtensionReduced` point at the symbol they resolve to,
/// so a descriptor can describe a multi-hop chain ending at the canonical
/// declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchKind {
    #[default]
    Ordinary,
    InterfaceMember,
    Override {
        base: Box<SymbolDescriptor>,
    },
    ExplicitInterfaceImpl {
        #[serde(default)]
        targets: Vec<SymbolDescriptor>,
    },
    ExtensionReduced {
        origin: Box<SymbolDescriptor>,
    },
}

impl DispatchKind {
    pub fn label(&self) -> &'static str {
        match self {
            DispatchKind::Ordinary => "ordinary",
            DispatchKind::InterfaceMember => "interface_member",
            DispatchKind::Override { .. } => "override",
            DispatchKind::ExplicitInterfaceImpl { .. } => "explicit_interface_impl",
            DispatchKind::ExtensionReduced { .. } => "extension_reduced",
        }
    }
}

// ---------------------------------------------------------------------------
// 2. SymbolDescriptor
// ---------------------------------------------------------------------------

/// Identity of a method-like entity as reported by the semantic analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolDescriptor {
    #[serde(default)]
    pub fully_qualified_name: String,
    #[serde(default)]
    pub containing_type: String,
    #[serde(default)]
    pub containing_namespace: String,
    #[serde(default)]
    pub dispatch: DispatchKind,
}

impl SymbolDescriptor {
    /// Build an ordinary descriptor for `Namespace.Type.Member`.
    ///
    /// An empty namespace yields `Type.Member`.
    pub fn method(namespace: &str, type_name: &str, member: &str) -> Self {
        let fully_qualified_name = if namespace.is_empty() {
            format!("{type_name}.{member}")
        } else {
            format!("{namespace}.{type_name}.{member}")
        };
        Self {
            fully_qualified_name,
            containing_type: type_name.to_string(),
            containing_namespace: namespace.to_string(),
            dispatch: DispatchKind::Ordinary,
        }
    }

    /// Split a dotted name into namespace, type, and member.
    ///
    /// `"Acme.Billing.Invoice.Total"` has namespace `Acme.Billing` and type
    /// `Invoice`. A name with fewer than two segments has no containing type.
    pub fn from_fqn(fqn: &str) -> Self {
        let parts: Vec<&str> = fqn.split('.').collect();
        let (containing_namespace, containing_type) = match parts.len() {
            0 | 1 => (String::new(), String::new()),
            2 => (String::new(), parts[0].to_string()),
            n => (parts[..n - 2].join("."), parts[n - 2].to_string()),
        };
        Self {
            fully_qualified_name: fqn.to_string(),
            containing_type,
            containing_namespace,
            dispatch: DispatchKind::Ordinary,
        }
    }

    pub fn interface_member(mut self) -> Self {
        self.dispatch = DispatchKind::InterfaceMember;
        self
    }

    pub fn overriding(mut self, base: SymbolDescriptor) -> Self {
        self.dispatch = DispatchKind::Override {
            base: Box::new(base),
        };
        self
    }

    pub fn explicit_impl_of(mut self, targets: Vec<SymbolDescriptor>) -> Self {
        self.dispatch = DispatchKind::ExplicitInterfaceImpl { targets };
        self
    }

    pub fn reduced_from(mut self, origin: SymbolDescriptor) -> Self {
        self.dispatch = DispatchKind::ExtensionReduced {
            origin: Box::new(origin),
        };
        self
    }
}

impl fmt::Display for SymbolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.fully_qualified_name, self.dispatch.label())
    }
}

// ---------------------------------------------------------------------------
// 3. RawCallFact
// ---------------------------------------------------------------------------

/// One observed call site, before normalization and validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCallFact {
    #[serde(default)]
    pub caller: SymbolDescriptor,
    #[serde(default)]
    pub callee: SymbolDescriptor,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub line_number: i64,
}

impl RawCallFact {
    pub fn new(
        caller: SymbolDescriptor,
        callee: SymbolDescriptor,
        file_path: impl Into<String>,
        line_number: i64,
    ) -> Self {
        Self {
            caller,
            callee,
            file_path: file_path.into(),
            line_number,
        }
    }
}

// ---------------------------------------------------------------------------
// 4. CallSite / CallEdge
// ---------------------------------------------------------------------------

/// Source location of a call expression. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CallSite {
    pub file_path: String,
    pub line_number: u32,
}

impl CallSite {
    pub fn new(file_path: impl Into<String>, line_number: u32) -> Self {
        Self {
            file_path: file_path.into(),
            line_number,
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_path, self.line_number)
    }
}

/// A canonical caller -> callee relationship observed at one site.
///
/// `callee_fqn` always names a dispatch-normalized symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallEdge {
    pub caller_fqn: String,
    pub callee_fqn: String,
    pub site: CallSite,
}

impl CallEdge {
    pub fn new(
        caller_fqn: impl Into<String>,
        callee_fqn: impl Into<String>,
        site: CallSite,
    ) -> Self {
        Self {
            caller_fqn: caller_fqn.into(),
            callee_fqn: callee_fqn.into(),
            site,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
