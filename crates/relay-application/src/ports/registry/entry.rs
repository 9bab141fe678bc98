//! Shared shape of a registry entry and lookups over a slice of entries

use std::sync::Arc;

/// Factory signature shared by every provider kind
pub type ProviderFactory<C, P> = fn(&C) -> Result<Arc<P>, String>;

/// One registered provider factory
///
/// `C` is the configuration the factory reads, `P` the port it produces.
pub struct ProviderEntry<C: 'static, P: ?Sized + 'static> {
    /// Factory name referenced from configuration (e.g., "ollama")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Builds a provider instance
    pub factory: ProviderFactory<C, P>,
}

/// Run the factory registered as `name`
///
/// Unknown names produce an error listing every registered factory of
/// this `kind`.
pub(crate) fn resolve<C, P: ?Sized>(
    entries: &[ProviderEntry<C, P>],
    kind: &str,
    name: &str,
    config: &C,
) -> Result<Arc<P>, String> {
    match entries.iter().find(|entry| entry.name == name) {
        Some(entry) => (entry.factory)(config),
        None => {
            let mut available: Vec<&str> = entries.iter().map(|e| e.name).collect();
            available.sort_unstable();
            Err(format!(
                "Unknown {kind} provider '{name}'. Available providers: {available:?}"
            ))
        }
    }
}

/// (name, description) pairs sorted by name
pub(crate) fn describe<C, P: ?Sized>(
    entries: &[ProviderEntry<C, P>],
) -> Vec<(&'static str, &'static str)> {
    let mut described: Vec<_> = entries.iter().map(|e| (e.name, e.description)).collect();
    described.sort_unstable_by_key(|(name, _)| *name);
    described
}
