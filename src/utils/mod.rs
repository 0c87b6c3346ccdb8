mod time;

pub use time::time_millis;

/// Id for a node added in the editor: `<type>_<unix millis>`.
///
/// `taken` is consulted so that two nodes added within the same
/// millisecond still get distinct ids.
pub fn node_id(
    node_type: &str,
    taken: impl Fn(&str) -> bool,
) -> String {
    let base = format!("{}_{}", node_type, time_millis());
    if !taken(&base) {
        return base;
    }

    (1..)
        .map(|n| format!("{}_{}", base, n))
        .find(|candidate| !taken(candidate))
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::node_id;

    #[test]
    fn test_node_id_prefix() {
        let id = node_id("wait", |_| false);
        assert!(id.starts_with("wait_"));
        assert!(id["wait_".len()..].parse::<i64>().is_ok());
    }

    #[test]
    fn test_node_id_avoids_collisions() {
        let first = node_id("goto", |_| false);
        let second = node_id("goto", |candidate| candidate.starts_with("goto_") && !candidate.ends_with("_2"));
        assert_ne!(first, second);
        assert!(second.ends_with("_2"));
    }
}
