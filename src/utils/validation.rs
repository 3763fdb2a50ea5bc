//! Identifier validation utilities.
//!
//! Container ids end up in docker service names, container names and image
//! tags, so they are restricted to a conservative character set. Mount names
//! are used as environment-variable style keys and follow a separate format.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn container_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9-]+$").unwrap())
}

fn mount_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z0-9_]+$").unwrap())
}

/// Check that a container id only uses lowercase alphanumerics and hyphens
///
/// # Examples
/// ```
/// use emulation_system::utils::validation::is_valid_container_id;
///
/// assert!(is_valid_container_id("my-heater-shaker-2"));
/// assert!(!is_valid_container_id("invalid name with spaces"));
/// assert!(!is_valid_container_id("Robot"));
/// ```
pub fn is_valid_container_id(id: &str) -> bool {
    container_id_regex().is_match(id)
}

/// Check that a mount name only uses uppercase alphanumerics and underscores
pub fn is_valid_mount_name(name: &str) -> bool {
    mount_name_regex().is_match(name)
}

/// Ids present in both collections, sorted and without repeats
///
/// # Examples
/// ```
/// use emulation_system::utils::validation::find_shared_ids;
///
/// let shared = find_shared_ids(["b", "a", "c"], ["c", "a", "d"]);
/// assert_eq!(shared, vec!["a".to_string(), "c".to_string()]);
/// ```
pub fn find_shared_ids<'a, L, R>(left: L, right: R) -> Vec<String>
where
    L: IntoIterator<Item = &'a str>,
    R: IntoIterator<Item = &'a str>,
{
    let left: BTreeSet<&str> = left.into_iter().collect();
    let right: BTreeSet<&str> = right.into_iter().collect();
    left.intersection(&right).map(|id| id.to_string()).collect()
}
