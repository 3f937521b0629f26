//! Job status payload returned by `GET /status`.

use serde::{Deserialize, Deserializer, Serialize};

/// Status string reported while the job is actively watering.
pub const STATUS_RUNNING: &str = "RUNNING";

/// Status string reported when no job is active.
pub const STATUS_OFF: &str = "OFF";

/// Body of the `GET /status` response.
///
/// Only `status` is required. The server omits `message` and `percent`
/// for some states, or sends them as `null`; both fall back to their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub percent: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Classification of a [`StatusPayload::status`] string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// A job is running and `percent` is meaningful.
    Running,
    /// No job is active.
    Off,
    /// Any other status text. Treated as an indeterminate state, typically
    /// the controller initialising valves before the run proper starts.
    Other(String),
}

impl JobStatus {
    /// Whether this status counts as an active job.
    pub fn is_active(&self) -> bool {
        !matches!(self, JobStatus::Off)
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        match s {
            STATUS_RUNNING => JobStatus::Running,
            STATUS_OFF => JobStatus::Off,
            other => JobStatus::Other(other.to_string()),
        }
    }
}

impl StatusPayload {
    pub fn job_status(&self) -> JobStatus {
        JobStatus::from(self.status.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_statuses() {
        assert_eq!(JobStatus::from("RUNNING"), JobStatus::Running);
        assert_eq!(JobStatus::from("OFF"), JobStatus::Off);
    }

    #[test]
    fn status_match_is_case_sensitive() {
        assert_eq!(JobStatus::from("off"), JobStatus::Other("off".into()));
        assert!(JobStatus::from("off").is_active());
    }

    #[test]
    fn only_off_is_inactive() {
        assert!(!JobStatus::Off.is_active());
        assert!(JobStatus::Running.is_active());
        assert!(JobStatus::Other("Priming".into()).is_active());
    }

    #[test]
    fn missing_message_and_percent_default() {
        let payload: StatusPayload = serde_json::from_str(r#"{"status":"OFF"}"#).unwrap();
        assert_eq!(payload.message, "");
        assert_eq!(payload.percent, 0.0);
        assert_eq!(payload.job_status(), JobStatus::Off);
    }

    #[test]
    fn null_message_and_percent_default() {
        let payload: StatusPayload =
            serde_json::from_str(r#"{"status":"Priming","message":"Filling","percent":null}"#)
                .unwrap();
        assert_eq!(payload.message, "Filling");
        assert_eq!(payload.percent, 0.0);

        let payload: StatusPayload =
            serde_json::from_str(r#"{"status":"RUNNING","message":null,"percent":30}"#).unwrap();
        assert_eq!(payload.message, "");
        assert_eq!(payload.percent, 30.0);
    }

    #[test]
    fn missing_status_is_rejected() {
        let result = serde_json::from_str::<StatusPayload>(r#"{"message":"x","percent":3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn fractional_percent_is_kept() {
        let payload: StatusPayload =
            serde_json::from_str(r#"{"status":"RUNNING","message":"Zone 2","percent":12.5}"#)
                .unwrap();
        assert_eq!(payload.percent, 12.5);
        assert_eq!(payload.message, "Zone 2");
    }
}
