// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Deterministic names for auxiliary Azure resources

use crate::shared::error::{AzError, Result};
use tracing::warn;

/// Alphanumeric-filter `input`; when the result exceeds `max_len`, truncate it
/// and append the first `suffix_len` hex digits of the MD5 of the unfiltered input.
pub fn valid_name(input: &str, suffix_len: usize, max_len: usize) -> Result<String> {
    let normalized: String = input.chars().filter(|c| c.is_alphanumeric()).collect();
    if normalized.is_empty() {
        return Err(AzError::invalid_argument(format!(
            "Cannot derive a resource name from '{}'",
            input
        )));
    }

    let normalized_len = normalized.chars().count();
    if normalized_len <= max_len {
        return Ok(normalized);
    }

    let suffix_len = if suffix_len > max_len {
        warn!("suffix length is bigger than max length. Set suffix length to max length.");
        max_len
    } else {
        suffix_len
    };

    let digest = format!("{:x}", md5::compute(input.as_bytes()));
    let mut name: String = normalized.chars().take(max_len - suffix_len).collect();
    name.push_str(&digest[..suffix_len.min(digest.len())]);
    Ok(name)
}

/// `{cluster}-{subscription}-{resourceGroup}` with an optional `-{suffix}`.
pub fn cluster_scoped_id(
    cluster_name: &str,
    subscription_id: &str,
    resource_group: &str,
    suffix: Option<&str>,
) -> String {
    match suffix {
        Some(suffix) => format!(
            "{}-{}-{}-{}",
            cluster_name, subscription_id, resource_group, suffix
        ),
        None => format!("{}-{}-{}", cluster_name, subscription_id, resource_group),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_is_filtered_only() {
        assert_eq!(valid_name("my-cluster_01", 6, 50).unwrap(), "mycluster01");
    }

    #[test]
    fn test_name_at_max_len_is_unchanged() {
        let input = "a".repeat(50);
        assert_eq!(valid_name(&input, 6, 50).unwrap(), input);
    }

    #[test]
    fn test_long_name_is_truncated_with_hash() {
        let input = cluster_scoped_id(
            "arc-cluster",
            "00000000-1111-2222-3333-444444444444",
            "my-resource-group",
            Some("relay"),
        );
        let name = valid_name(&input, 6, 50).unwrap();
        let digest = format!("{:x}", md5::compute(input.as_bytes()));

        assert_eq!(name.len(), 50);
        assert!(name.ends_with(&digest[..6]));
        assert!(name.starts_with("arccluster000000001111"));
        assert_eq!(name, valid_name(&input, 6, 50).unwrap());
    }

    #[test]
    fn test_distinct_inputs_with_same_prefix_get_distinct_names() {
        let a = valid_name(&format!("{}-a", "x".repeat(60)), 6, 50).unwrap();
        let b = valid_name(&format!("{}-b", "x".repeat(60)), 6, 50).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_suffix_clamped_to_max_len() {
        let name = valid_name(&"z".repeat(40), 10, 4).unwrap();
        assert_eq!(name.len(), 4);
    }

    #[test]
    fn test_empty_normalized_name_is_rejected() {
        assert!(valid_name("---", 6, 50).is_err());
    }
}
