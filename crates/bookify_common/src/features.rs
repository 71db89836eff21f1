//! Runtime feature flags.
//!
//! A feature is on when its `use_*` flag is set and its config section is
//! present. The Google Calendar part is always on.

use bookify_config::AppConfig;

/// Check if a feature is enabled at runtime based on configuration.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if EmailJS notifications are enabled.
pub fn is_emailjs_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_emailjs, config.emailjs.as_ref())
}

/// Check if the conversational webhook is enabled.
///
/// The `fulfillment` section is optional, so only the flag counts here.
pub fn is_fulfillment_enabled(config: &AppConfig) -> bool {
    config.use_fulfillment
}
