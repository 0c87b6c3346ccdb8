//! Static registry of editor node types.
//!
//! The table is built once on first access and only ever handed out by
//! shared reference. Lookups by an unknown name fall back to the `wait`
//! entry instead of failing.

mod node_type;

use std::{collections::HashMap, str::FromStr, sync::LazyLock};

use tracing::warn;

pub use node_type::{ActionType, NodeTypeConfig};

static REGISTRY: LazyLock<NodeTypeRegistry> = LazyLock::new(NodeTypeRegistry::builtin);

/// Immutable table of node type configurations.
pub struct NodeTypeRegistry {
    entries: HashMap<ActionType, NodeTypeConfig>,
}

impl NodeTypeRegistry {
    fn builtin() -> Self {
        let entries = node_type::builtin().into_iter().map(|config| (config.node_type, config)).collect();
        Self {
            entries,
        }
    }

    /// Exact lookup by action or node type name.
    pub fn get(
        &self,
        name: &str,
    ) -> Option<&NodeTypeConfig> {
        ActionType::from_str(name).ok().and_then(|t| self.entries.get(&t))
    }

    /// Lookup with the `wait` entry as the fallback for unknown names.
    pub fn lookup(
        &self,
        name: &str,
    ) -> &NodeTypeConfig {
        match self.get(name) {
            Some(config) => config,
            None => {
                warn!(node_type = name, "unknown node type, falling back to wait");
                self.default_entry()
            }
        }
    }

    /// The fallback entry.
    pub fn default_entry(&self) -> &NodeTypeConfig {
        &self.entries[&ActionType::default()]
    }

    /// Step action for a node type; unregistered types map to themselves.
    pub fn action_for_node_type(
        &self,
        node_type: &str,
    ) -> String {
        match self.get(node_type) {
            Some(config) => config.action().unwrap_or(node_type).to_string(),
            None => node_type.to_string(),
        }
    }

    /// All entries, in declaration order of [`ActionType`].
    pub fn iter(&self) -> impl Iterator<Item = &NodeTypeConfig> {
        use strum::IntoEnumIterator;
        ActionType::iter().filter_map(|t| self.entries.get(&t))
    }
}

/// The process-wide registry.
pub fn registry() -> &'static NodeTypeRegistry {
    &REGISTRY
}

/// Shorthand for `registry().lookup(name)`.
pub fn lookup(name: &str) -> &'static NodeTypeConfig {
    registry().lookup(name)
}

#[cfg(test)]
mod tests {
    use super::{ActionType, lookup, registry};

    #[test]
    fn test_lookup_known_types() {
        assert_eq!(lookup("goto").node_type, ActionType::Goto);
        assert_eq!(lookup("activate_continuous_swipe").label, "Continuous Swipe");
        assert_eq!(lookup("add_prompt").default_data.get_bool("critical"), Some(true));
    }

    #[test]
    fn test_lookup_unknown_falls_back_to_wait() {
        let config = lookup("nonexistent_action");
        assert_eq!(config.node_type, ActionType::Wait);
        assert_eq!(config.label, "Wait");
        assert!(registry().get("nonexistent_action").is_none());
    }

    #[test]
    fn test_action_for_node_type() {
        let reg = registry();
        assert_eq!(reg.action_for_node_type("swipe_with_spectre"), "swipe_with_spectre");
        assert_eq!(reg.action_for_node_type("custom_action"), "custom_action");
        assert_eq!(reg.action_for_node_type("start"), "start");
    }

    #[test]
    fn test_iter_covers_every_type() {
        use strum::IntoEnumIterator;
        assert_eq!(registry().iter().count(), ActionType::iter().count());
        assert_eq!(registry().iter().next().unwrap().node_type, ActionType::Wait);
    }

    #[test]
    fn test_continuous_swipe_defaults_are_valid() {
        let data = &lookup("activate_continuous_swipe").default_data;
        assert!(data.get_u64("minIntervalMs").unwrap() >= 1000);
        assert!(data.get_u64("minSwipes").unwrap() <= data.get_u64("maxSwipes").unwrap());
    }
}
