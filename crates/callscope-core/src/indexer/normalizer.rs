//! Dispatch normalization for call targets.
//!
//! Collapses override chains, explicit interface implementations, and
//! reduced extension calls onto one canonical callee so polymorphic call
//! sites land on a single graph node. Interface members are left alone:
//! every implementer's callers aggregate on the interface declaration.

use crate::config::DEFAULT_MAX_DISPATCH_HOPS;
use crate::errors::{CallScopeError, CallScopeResult};
use crate::models::{DispatchKind, SymbolDescriptor};

#[derive(Debug, Clone, Copy)]
pub struct SymbolNormalizer {
    max_hops: usize,
}

impl Default for SymbolNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISPATCH_HOPS)
    }
}

impl SymbolNormalizer {
    pub fn new(max_hops: usize) -> Self {
        Self {
            max_hops: max_hops.max(1),
        }
    }

    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Resolve `callee` to its canonical target.
    ///
    /// Rules, first match wins, repeated until nothing changes:
    ///
    /// 1. Explicit interface implementation with targets -> first target
    /// 2. Interface member -> itself
    /// 3. Reduced extension call -> original static definition
    /// 4. Override -> base declaration (walks to the top of the chain)
    /// 5. Anything else -> itself
    ///
    /// Following more than `max_hops` links yields
    /// [`CallScopeError::NormalizationOverflow`].
    pub fn normalize(&self, callee: &SymbolDescriptor) -> CallScopeResult<SymbolDescriptor> {
        let mut current = callee;
        let mut hops = 0usize;
        loop {
            let next = match &current.dispatch {
                DispatchKind::ExplicitInterfaceImpl { targets } => match targets.first() {
                    Some(target) => target,
                    None => return Ok(current.clone()),
                },
                DispatchKind::InterfaceMember => return Ok(current.clone()),
                DispatchKind::ExtensionReduced { origin } => origin.as_ref(),
                DispatchKind::Override { base } => base.as_ref(),
                DispatchKind::Ordinary => return Ok(current.clone()),
            };
            hops += 1;
            if hops > self.max_hops {
                return Err(CallScopeError::NormalizationOverflow {
                    fqn: callee.fully_qualified_name.clone(),
                    hops: self.max_hops,
                });
            }
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(fqn: &str) -> SymbolDescriptor {
        SymbolDescriptor::from_fqn(fqn)
    }

    #[test]
    fn test_ordinary_is_unchanged() {
        let callee = sym("App.Util.Log");
        let normalized = SymbolNormalizer::default().normalize(&callee).unwrap();
        assert_eq!(normalized, callee);
    }

    #[test]
    fn test_override_resolves_to_base() {
        // Base.Do is virtual, Derived.Do overrides it, the call goes through a
        // Base-typed reference holding a Derived instance.
        let callee = sym("App.Derived.Do").overriding(sym("App.Base.Do"));
        let normalized = SymbolNormalizer::default().normalize(&callee).unwrap();
        assert_eq!(normalized.fully_qualified_name, "App.Base.Do");
    }

    #[test]
    fn test_override_chain_reaches_topmost() {
        let callee = sym("App.Leaf.Run")
            .overriding(sym("App.Middle.Run").overriding(sym("App.Root.Run")));
        let normalized = SymbolNormalizer::default().normalize(&callee).unwrap();
        assert_eq!(normalized.fully_qualified_name, "App.Root.Run");
        assert_eq!(normalized.dispatch, DispatchKind::Ordinary);
    }

    #[test]
    fn test_explicit_interface_impl_resolves_to_interface_member() {
        let iface = sym("App.IStore.Save").interface_member();
        let callee = sym("App.FileStore.App.IStore.Save").explicit_impl_of(vec![
            iface.clone(),
            sym("App.IOther.Save").interface_member(),
        ]);
        let normalized = SymbolNormalizer::default().normalize(&callee).unwrap();
        assert_eq!(normalized, iface);
    }

    #[test]
    fn test_explicit_interface_impl_without_targets_is_unchanged() {
        let callee = sym("App.FileStore.Save").explicit_impl_of(Vec::new());
        let normalized = SymbolNormalizer::default().normalize(&callee).unwrap();
        assert_eq!(normalized.fully_qualified_name, "App.FileStore.Save");
    }

    #[test]
    fn test_interface_member_is_not_resolved_further() {
        let callee = sym("App.IFoo.Bar").interface_member();
        let normalized = SymbolNormalizer::default().normalize(&callee).unwrap();
        assert_eq!(normalized.fully_qualified_name, "App.IFoo.Bar");
    }

    #[test]
    fn test_extension_reduced_resolves_to_origin() {
        let origin = sym("App.StringExtensions.Slugify");
        let callee = sym("System.String.Slugify").reduced_from(origin.clone());
        let normalized = SymbolNormalizer::default().normalize(&callee).unwrap();
        assert_eq!(normalized, origin);
    }

    #[test]
    fn test_extension_origin_that_overrides_keeps_walking() {
        let callee = sym("App.Wrapper.Go")
            .reduced_from(sym("App.Impl.Go").overriding(sym("App.Base.Go")));
        let normalized = SymbolNormalizer::default().normalize(&callee).unwrap();
        assert_eq!(normalized.fully_qualified_name, "App.Base.Go");
    }

    #[test]
    fn test_chain_longer_than_cap_overflows() {
        let mut callee = sym("App.T0.M");
        for depth in 1..=10 {
            callee = sym(&format!("App.T{depth}.M")).overriding(callee);
        }
        let err = SymbolNormalizer::new(5).normalize(&callee).unwrap_err();
        match err {
            CallScopeError::NormalizationOverflow { fqn, hops } => {
                assert_eq!(fqn, "App.T10.M");
                assert_eq!(hops, 5);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_chain_at_cap_succeeds() {
        let mut callee = sym("App.T0.M");
        for depth in 1..=5 {
            callee = sym(&format!("App.T{depth}.M")).overriding(callee);
        }
        let normalized = SymbolNormalizer::new(5).normalize(&callee).unwrap();
        assert_eq!(normalized.fully_qualified_name, "App.T0.M");
    }
}
