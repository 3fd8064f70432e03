//! Probe result types.
//!
//! A probe can find something, find nothing, or fail to find out. The
//! third case is kept distinct everywhere so that "unknown" is never
//! rendered as "absent".

use serde::Serialize;
use std::path::PathBuf;

/// Three-valued probe outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Presence<T> {
    /// The probe found a value.
    Present(T),
    /// The probe ran and found nothing.
    Absent,
    /// The probe could not run to completion.
    Unknown(String),
}

impl<T> Presence<T> {
    /// Borrow the found value, if any.
    pub fn as_present(&self) -> Option<&T> {
        match self {
            Presence::Present(value) => Some(value),
            _ => None,
        }
    }

    /// Whether the probe found a value.
    pub fn is_present(&self) -> bool {
        matches!(self, Presence::Present(_))
    }

    /// Whether the probe could not determine the answer.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Presence::Unknown(_))
    }
}

/// Whether the tracked native executable is reachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyStatus {
    /// Executable name that was searched for.
    pub name: String,
    /// Resolved location, when found.
    pub path: Option<PathBuf>,
}

impl DependencyStatus {
    /// A found dependency.
    pub fn found(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: Some(path.into()),
        }
    }

    /// A dependency that is not on the search path.
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
        }
    }

    /// Whether the executable was found.
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }
}

/// Result of asking the index whether the backend can be updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateCheck {
    /// No check has been run in this cycle.
    NotChecked,
    /// The check ran and the backend is current.
    UpToDate,
    /// A newer version is available.
    Available { latest: String },
    /// The check could not be completed.
    Failed { reason: String },
}

impl UpdateCheck {
    /// Whether a check was attempted (successfully or not).
    pub fn was_checked(&self) -> bool {
        !matches!(self, UpdateCheck::NotChecked)
    }

    /// Newest version, when an update is known to exist.
    pub fn latest(&self) -> Option<&str> {
        match self {
            UpdateCheck::Available { latest } => Some(latest),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_accessors() {
        let present = Presence::Present("1.1.0".to_string());
        assert!(present.is_present());
        assert_eq!(present.as_present().map(String::as_str), Some("1.1.0"));

        let absent: Presence<String> = Presence::Absent;
        assert!(!absent.is_present());
        assert!(!absent.is_unknown());

        let unknown: Presence<String> = Presence::Unknown("import failed".into());
        assert!(unknown.is_unknown());
        assert!(unknown.as_present().is_none());
    }

    #[test]
    fn dependency_status_found_and_missing() {
        assert!(DependencyStatus::found("msms", "/usr/bin/msms").is_found());
        assert!(!DependencyStatus::missing("msms").is_found());
    }

    #[test]
    fn update_check_distinguishes_failure_from_up_to_date() {
        assert!(!UpdateCheck::NotChecked.was_checked());
        assert!(UpdateCheck::UpToDate.was_checked());
        let failed = UpdateCheck::Failed {
            reason: "offline".into(),
        };
        assert!(failed.was_checked());
        assert_ne!(failed, UpdateCheck::UpToDate);
        assert_eq!(failed.latest(), None);

        let available = UpdateCheck::Available {
            latest: "1.1.0".into(),
        };
        assert_eq!(available.latest(), Some("1.1.0"));
    }

    #[test]
    fn presence_serializes_with_status_tag() {
        let json = serde_json::to_value(Presence::Present("1.1.0")).unwrap();
        assert_eq!(json["status"], "present");
        assert_eq!(json["value"], "1.1.0");

        let json = serde_json::to_value(UpdateCheck::Available {
            latest: "1.1.0".into(),
        })
        .unwrap();
        assert_eq!(json["status"], "available");
        assert_eq!(json["latest"], "1.1.0");
    }
}
