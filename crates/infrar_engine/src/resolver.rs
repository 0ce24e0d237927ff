//! Capability to child plugin resolution.

use std::collections::HashMap;

use tracing::debug;

/// Static mapping from capability identifiers to child plugin identifiers.
///
/// The table is explicit, passed-in configuration rather than an ambient
/// registry. A capability with no entry is dropped silently so
/// forward-compatible capability names do not produce warning noise;
/// multiple capabilities routed to the same child collapse to a single
/// invocation of that child.
#[derive(Debug, Clone)]
pub struct CapabilityTable {
    entries: Vec<(String, String)>,
}

impl CapabilityTable {
    /// Build a table from `(capability, child)` pairs.
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(capability, child)| (capability.to_string(), child.to_string()))
                .collect(),
        }
    }

    /// Child identifier for one capability, if mapped.
    pub fn child_for(&self, capability: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c == capability)
            .map(|(_, child)| child.as_str())
    }

    /// Resolve a request's capability list to the distinct children to
    /// invoke, grouped with the original capability strings that routed to
    /// each child.
    pub fn resolve(&self, capabilities: &[String]) -> Resolution {
        let mut groups: HashMap<String, Vec<String>> = HashMap::new();
        for capability in capabilities {
            match self.child_for(capability) {
                Some(child) => groups
                    .entry(child.to_string())
                    .or_default()
                    .push(capability.clone()),
                None => debug!("Dropping unmapped capability {:?}", capability),
            }
        }
        Resolution { groups }
    }
}

/// The distinct children one request resolves to.
///
/// Iteration order over the groups is unordered; the merge rules are
/// defined per iteration order, not per a fixed order.
#[derive(Debug, Clone)]
pub struct Resolution {
    groups: HashMap<String, Vec<String>>,
}

impl Resolution {
    /// Iterate over `(child, capabilities routed to it)`.
    pub fn children(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(child, capabilities)| (child.as_str(), capabilities.as_slice()))
    }

    /// Number of distinct children.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no capability resolved to a child.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CapabilityTable {
        CapabilityTable::new(&[("storage", "storage"), ("compute", "compute")])
    }

    fn caps(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolves_mapped_capabilities() {
        let resolution = table().resolve(&caps(&["storage", "compute"]));
        assert_eq!(resolution.len(), 2);

        let mut children: Vec<&str> = resolution.children().map(|(c, _)| c).collect();
        children.sort_unstable();
        assert_eq!(children, vec!["compute", "storage"]);
    }

    #[test]
    fn test_unknown_capability_dropped_silently() {
        let resolution = table().resolve(&caps(&["storage", "quantum"]));
        assert_eq!(resolution.len(), 1);
        let (child, routed) = resolution.children().next().unwrap();
        assert_eq!(child, "storage");
        assert_eq!(routed, ["storage".to_string()]);
    }

    #[test]
    fn test_duplicates_collapse_at_the_child() {
        let resolution = table().resolve(&caps(&["storage", "storage", "storage"]));
        assert_eq!(resolution.len(), 1);
        let (_, routed) = resolution.children().next().unwrap();
        // The grouping keeps every original capability string.
        assert_eq!(routed.len(), 3);
    }

    #[test]
    fn test_empty_capabilities_resolve_to_no_children() {
        let resolution = table().resolve(&[]);
        assert!(resolution.is_empty());
        assert_eq!(resolution.len(), 0);
    }
}
