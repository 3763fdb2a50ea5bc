//! Shared utilities: identifier validation.

pub mod validation;

pub use validation::{find_shared_ids, is_valid_container_id, is_valid_mount_name};
