//! Consent gate for privacy-sensitive actions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::env_bool;

/// Privacy-sensitive actions a user can allow or forbid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyAction {
    /// Keep identity data and use it to fill request forms
    SaveIdData,
    /// Keep a log of sent requests
    SaveMyRequests,
    /// Send error reports
    ReportErrors,
}

impl PrivacyAction {
    pub fn all() -> &'static [PrivacyAction] {
        &[
            PrivacyAction::SaveIdData,
            PrivacyAction::SaveMyRequests,
            PrivacyAction::ReportErrors,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyAction::SaveIdData => "save_id_data",
            PrivacyAction::SaveMyRequests => "save_my_requests",
            PrivacyAction::ReportErrors => "report_errors",
        }
    }

    /// Value used when the user has not decided
    pub fn default_allowed(&self) -> bool {
        match self {
            PrivacyAction::SaveIdData | PrivacyAction::SaveMyRequests => true,
            PrivacyAction::ReportErrors => false,
        }
    }

    fn env_key(&self) -> String {
        format!("DSR_PRIVACY_{}", self.as_str().to_uppercase())
    }
}

/// Decides whether a privacy-sensitive action is currently permitted
pub trait ConsentGate: Send + Sync {
    fn is_allowed(&self, action: PrivacyAction) -> bool;
}

/// User privacy settings, one switch per action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyControls {
    #[serde(default)]
    settings: HashMap<PrivacyAction, bool>,
}

impl PrivacyControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every action forbidden
    pub fn deny_all() -> Self {
        let mut controls = Self::new();
        for action in PrivacyAction::all() {
            controls.set(*action, false);
        }
        controls
    }

    /// Read `DSR_PRIVACY_<ACTION>` booleans, keeping defaults for unset ones
    pub fn from_env() -> Self {
        let mut controls = Self::new();
        for action in PrivacyAction::all() {
            let key = action.env_key();
            if std::env::var_os(&key).is_some() {
                controls.set(*action, env_bool(&key, action.default_allowed()));
            }
        }
        controls
    }

    pub fn set(&mut self, action: PrivacyAction, allowed: bool) {
        self.settings.insert(action, allowed);
    }

    pub fn with(mut self, action: PrivacyAction, allowed: bool) -> Self {
        self.set(action, allowed);
        self
    }
}

impl ConsentGate for PrivacyControls {
    fn is_allowed(&self, action: PrivacyAction) -> bool {
        self.settings
            .get(&action)
            .copied()
            .unwrap_or_else(|| action.default_allowed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for action in PrivacyAction::all() {
            std::env::remove_var(action.env_key());
        }
    }

    #[test]
    fn test_defaults() {
        let controls = PrivacyControls::new();
        assert!(controls.is_allowed(PrivacyAction::SaveIdData));
        assert!(!controls.is_allowed(PrivacyAction::ReportErrors));
    }

    #[test]
    fn test_overrides() {
        let controls = PrivacyControls::new().with(PrivacyAction::SaveIdData, false);
        assert!(!controls.is_allowed(PrivacyAction::SaveIdData));
        assert!(controls.is_allowed(PrivacyAction::SaveMyRequests));
    }

    #[test]
    fn test_deny_all() {
        let controls = PrivacyControls::deny_all();
        assert!(PrivacyAction::all()
            .iter()
            .all(|a| !controls.is_allowed(*a)));
    }

    #[test]
    fn test_env_key() {
        assert_eq!(
            PrivacyAction::SaveIdData.env_key(),
            "DSR_PRIVACY_SAVE_ID_DATA"
        );
    }

    #[test]
    #[serial(env)]
    fn test_from_env_overrides_set_actions_only() {
        clear_env();
        std::env::set_var("DSR_PRIVACY_SAVE_ID_DATA", "false");
        std::env::set_var("DSR_PRIVACY_REPORT_ERRORS", "1");
        let controls = PrivacyControls::from_env();
        clear_env();

        assert!(!controls.is_allowed(PrivacyAction::SaveIdData));
        assert!(controls.is_allowed(PrivacyAction::ReportErrors));
        assert!(controls.is_allowed(PrivacyAction::SaveMyRequests));
    }

    #[test]
    #[serial(env)]
    fn test_from_env_without_vars_matches_defaults() {
        clear_env();
        assert_eq!(PrivacyControls::from_env(), PrivacyControls::new());
    }
}
