//! Id generation for tracks, clips and markers.

use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Generate a fresh id of the form `{prefix}-{unix_millis}-{8 alphanumerics}`.
pub fn generate_id(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let mut rng = rand::thread_rng();
    let suffix: String = (0..8)
        .map(|_| rng.sample(rand::distributions::Alphanumeric) as char)
        .collect();
    format!("{prefix}-{millis}-{suffix}")
}
