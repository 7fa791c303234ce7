//! Client configuration.
//!
//! Defaults match the production deployment. On native builds a handful of
//! environment variables override them; the web build has no environment
//! and always runs with defaults plus whatever the auth session persisted.

use std::time::Duration;

use alm_shared::REALTIME_PATH;

/// Reconnect delay policy: start at `floor`, multiply by `factor` after each
/// failed attempt, never exceed `ceiling`.
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    pub floor: Duration,
    pub ceiling: Duration,
    pub factor: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            floor: Duration::from_millis(2000),
            ceiling: Duration::from_millis(30000),
            factor: 1.5,
        }
    }
}

impl BackoffPolicy {
    /// Delay scheduled after `attempt` consecutive failures (0-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(i32::MAX as u32) as i32;
        let scaled = self.floor.as_secs_f64() * self.factor.powi(exponent);
        if !scaled.is_finite() || scaled >= self.ceiling.as_secs_f64() {
            self.ceiling
        } else {
            Duration::from_secs_f64(scaled)
        }
    }
}

/// Realtime endpoint settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RealtimeConfig {
    /// Path of the socket endpoint on the API host.
    pub path: String,
    pub backoff: BackoffPolicy,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            path: REALTIME_PATH.to_string(),
            backoff: BackoffPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API base URL. `None` means "same origin as the page".
    pub api_base: Option<String>,
    pub realtime: RealtimeConfig,
    /// How long a toast stays on screen.
    pub notification_ttl: Duration,
    /// Oldest toasts are dropped beyond this many.
    pub max_notifications: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            realtime: RealtimeConfig::default(),
            notification_ttl: Duration::from_millis(5000),
            max_notifications: 4,
        }
    }
}

impl ClientConfig {
    /// Read overrides from the process environment.
    ///
    /// Environment variables:
    /// - `ALM_API_BASE`: API base URL (default: same origin)
    /// - `ALM_WS_PATH`: realtime endpoint path (default: `/api/v1/ws`)
    /// - `ALM_BACKOFF_FLOOR_MS`: first reconnect delay (default: 2000)
    /// - `ALM_BACKOFF_CEILING_MS`: reconnect delay cap (default: 30000)
    /// - `ALM_TOAST_MS`: notification lifetime (default: 5000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base) = lookup("ALM_API_BASE").filter(|v| !v.trim().is_empty()) {
            config.api_base = Some(base.trim().trim_end_matches('/').to_string());
        }
        if let Some(path) = lookup("ALM_WS_PATH").filter(|v| !v.trim().is_empty()) {
            config.realtime.path = path.trim().to_string();
        }
        if let Some(ms) = millis(&lookup, "ALM_BACKOFF_FLOOR_MS") {
            config.realtime.backoff.floor = ms;
        }
        if let Some(ms) = millis(&lookup, "ALM_BACKOFF_CEILING_MS") {
            config.realtime.backoff.ceiling = ms;
        }
        if let Some(ms) = millis(&lookup, "ALM_TOAST_MS") {
            config.notification_ttl = ms;
        }

        let backoff = &mut config.realtime.backoff;
        if backoff.ceiling < backoff.floor {
            tracing::warn!(
                floor_ms = backoff.floor.as_millis() as u64,
                ceiling_ms = backoff.ceiling.as_millis() as u64,
                "backoff ceiling below floor, raising it to the floor"
            );
            backoff.ceiling = backoff.floor;
        }

        config
    }
}

fn millis(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring invalid millisecond setting");
            None
        }
        Ok(ms) => Some(Duration::from_millis(ms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_realtime_contract() {
        let config = ClientConfig::default();
        assert_eq!(config.realtime.path, "/api/v1/ws");
        assert_eq!(config.realtime.backoff.floor, Duration::from_millis(2000));
        assert_eq!(config.realtime.backoff.ceiling, Duration::from_millis(30000));
        assert_eq!(config.realtime.backoff.factor, 1.5);
        assert_eq!(config.api_base, None);
    }

    #[test]
    fn environment_overrides_apply() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("ALM_API_BASE", "https://alm.example.com/"),
            ("ALM_WS_PATH", "/realtime"),
            ("ALM_BACKOFF_FLOOR_MS", "500"),
            ("ALM_TOAST_MS", "1200"),
        ]));
        assert_eq!(config.api_base.as_deref(), Some("https://alm.example.com"));
        assert_eq!(config.realtime.path, "/realtime");
        assert_eq!(config.realtime.backoff.floor, Duration::from_millis(500));
        assert_eq!(config.notification_ttl, Duration::from_millis(1200));
    }

    #[test]
    fn invalid_values_fall_back_and_ceiling_is_clamped() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("ALM_BACKOFF_FLOOR_MS", "40000"),
            ("ALM_TOAST_MS", "soon"),
        ]));
        assert_eq!(config.realtime.backoff.floor, Duration::from_millis(40000));
        assert_eq!(config.realtime.backoff.ceiling, Duration::from_millis(40000));
        assert_eq!(config.notification_ttl, Duration::from_millis(5000));
    }

    #[test]
    fn attempt_delays_grow_then_cap() {
        let policy = BackoffPolicy::default();
        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(2000));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(3000));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(4500));
        assert_eq!(policy.delay_for_attempt(7), Duration::from_millis(30000));
        assert_eq!(policy.delay_for_attempt(u32::MAX), Duration::from_millis(30000));
    }
}
