use std::time::Duration;

use zonectl_client::poller::DEFAULT_POLL_INTERVAL;
use zonectl_core::error::ConfigError;

const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_HOURS_OPTIONS: &[u32] = &[1, 2, 4, 8];

/// Panel configuration loaded from environment variables.
///
/// All fields have defaults suitable for a panel running on the
/// controller host itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// Base URL of the irrigation controller's HTTP API.
    pub server_url: String,
    /// Time between status polls.
    pub poll_interval: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Durations offered as buttons, in hours.
    pub hours_options: Vec<u32>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            hours_options: DEFAULT_HOURS_OPTIONS.to_vec(),
        }
    }
}

impl PanelConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                 |
    /// |--------------------------------|-------------------------|
    /// | `ZONECTL_SERVER_URL`           | `http://localhost:5000` |
    /// | `ZONECTL_POLL_INTERVAL_SECS`   | `30`                    |
    /// | `ZONECTL_REQUEST_TIMEOUT_SECS` | `10`                    |
    /// | `ZONECTL_HOURS_OPTIONS`        | `1,2,4,8`               |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let server_url = match lookup("ZONECTL_SERVER_URL") {
            Some(url) if url.trim().is_empty() => {
                return Err(ConfigError::Missing("ZONECTL_SERVER_URL"))
            }
            Some(url) => url.trim().to_string(),
            None => defaults.server_url,
        };

        let poll_interval = match lookup("ZONECTL_POLL_INTERVAL_SECS") {
            Some(raw) => Duration::from_secs(parse_positive("ZONECTL_POLL_INTERVAL_SECS", &raw)?),
            None => defaults.poll_interval,
        };

        let request_timeout = match lookup("ZONECTL_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                Duration::from_secs(parse_positive("ZONECTL_REQUEST_TIMEOUT_SECS", &raw)?)
            }
            None => defaults.request_timeout,
        };

        let hours_options = match lookup("ZONECTL_HOURS_OPTIONS") {
            Some(raw) => parse_hours_options(&raw)?,
            None => defaults.hours_options,
        };

        Ok(Self {
            server_url,
            poll_interval,
            request_timeout,
            hours_options,
        })
    }
}

fn parse_positive(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        var,
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let value: u64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("expected a whole number of seconds"))?;
    if value == 0 {
        return Err(invalid("must be greater than zero"));
    }
    Ok(value)
}

/// Parse a comma-separated list such as `"1, 2,4"`. Duplicates are
/// dropped and the result is sorted.
fn parse_hours_options(raw: &str) -> Result<Vec<u32>, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: "ZONECTL_HOURS_OPTIONS",
        value: raw.to_string(),
        reason,
    };

    let mut options = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let hours: u32 = part
            .parse()
            .map_err(|_| invalid(format!("'{part}' is not a whole number of hours")))?;
        if hours == 0 {
            return Err(invalid("durations must be at least one hour".to_string()));
        }
        options.push(hours);
    }

    if options.is_empty() {
        return Err(invalid("at least one duration is required".to_string()));
    }

    options.sort_unstable();
    options.dedup();
    Ok(options)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<PanelConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PanelConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config, PanelConfig::default());
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.hours_options, vec![1, 2, 4, 8]);
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("ZONECTL_SERVER_URL", " http://irrigation1:5000 "),
            ("ZONECTL_POLL_INTERVAL_SECS", "5"),
            ("ZONECTL_REQUEST_TIMEOUT_SECS", "3"),
            ("ZONECTL_HOURS_OPTIONS", "6, 3,3,12"),
        ])
        .unwrap();

        assert_eq!(config.server_url, "http://irrigation1:5000");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.hours_options, vec![3, 6, 12]);
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert_matches!(
            load(&[("ZONECTL_POLL_INTERVAL_SECS", "0")]),
            Err(ConfigError::Invalid { var: "ZONECTL_POLL_INTERVAL_SECS", .. })
        );
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        assert_matches!(
            load(&[("ZONECTL_REQUEST_TIMEOUT_SECS", "soon")]),
            Err(ConfigError::Invalid { var: "ZONECTL_REQUEST_TIMEOUT_SECS", .. })
        );
    }

    #[test]
    fn blank_server_url_is_missing() {
        assert_matches!(
            load(&[("ZONECTL_SERVER_URL", "  ")]),
            Err(ConfigError::Missing("ZONECTL_SERVER_URL"))
        );
    }

    #[test]
    fn bad_hours_options_are_rejected() {
        assert_matches!(
            load(&[("ZONECTL_HOURS_OPTIONS", "1,two")]),
            Err(ConfigError::Invalid { ref reason, .. }) if reason.contains("'two'")
        );
        assert_matches!(
            load(&[("ZONECTL_HOURS_OPTIONS", "0,1")]),
            Err(ConfigError::Invalid { .. })
        );
        assert_matches!(
            load(&[("ZONECTL_HOURS_OPTIONS", " , ")]),
            Err(ConfigError::Invalid { .. })
        );
    }
}
