//! Configuration for the feature-toggles module.

use serde::{Deserialize, Deserializer, Serialize, de};
use std::time::Duration;

/// Width of the stored `feature_key` column.
pub const FEATURE_KEY_COLUMN_LENGTH: u32 = 255;

/// Feature-toggles module configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureTogglesConfig {
    /// How long a cached toggle stays valid after it was written.
    #[serde(default = "default_cache_ttl", with = "humantime_duration")]
    pub cache_ttl: Duration,

    /// Maximum number of cached toggles.
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: u64,

    /// Upper bound on the length of a feature key, in characters. Must lie
    /// within `1..=FEATURE_KEY_COLUMN_LENGTH`.
    #[serde(
        default = "default_max_feature_key_length",
        deserialize_with = "deserialize_key_length"
    )]
    pub max_feature_key_length: usize,

    /// What evaluation does when the toggle store cannot be reached.
    #[serde(default)]
    pub on_store_error: StoreFailurePolicy,
}

/// Evaluation outcome when the toggle store fails.
///
/// A toggle that is merely absent is always denied; this policy only covers
/// the case where the store could not answer at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreFailurePolicy {
    /// Return the store error to the caller.
    #[default]
    Propagate,
    /// Fail closed: treat the toggle as denied.
    Deny,
    /// Fail open: treat the toggle as allowed.
    Allow,
}

fn default_cache_ttl() -> Duration {
    Duration::from_secs(60)
}

fn default_cache_max_entries() -> u64 {
    500
}

fn default_max_feature_key_length() -> usize {
    50
}

fn deserialize_key_length<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = usize::deserialize(deserializer)?;
    let storable = u32::try_from(value)
        .is_ok_and(|length| (1..=FEATURE_KEY_COLUMN_LENGTH).contains(&length));
    if !storable {
        return Err(de::Error::invalid_value(
            de::Unexpected::Unsigned(u64::try_from(value).unwrap_or(u64::MAX)),
            &"a key length between 1 and 255",
        ));
    }
    Ok(value)
}

impl Default for FeatureTogglesConfig {
    fn default() -> Self {
        Self {
            cache_ttl: default_cache_ttl(),
            cache_max_entries: default_cache_max_entries(),
            max_feature_key_length: default_max_feature_key_length(),
            on_store_error: StoreFailurePolicy::default(),
        }
    }
}

/// Serde adapter reading durations such as `"30s"` or `"1m"` via `humantime`.
pub mod humantime_duration {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de};

    /// # Errors
    ///
    /// Returns the serializer's error if the string cannot be written.
    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    /// # Errors
    ///
    /// Returns an error if the value is not a string `humantime` can parse.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw)
            .map_err(|_| de::Error::invalid_value(de::Unexpected::Str(&raw), &"a duration"))
    }
}
