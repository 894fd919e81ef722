//! Feature flag vocabulary and the flag snapshot table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the flag store
#[derive(Debug, Error)]
pub enum FlagError {
    /// The flag name is not part of the closed flag set.
    ///
    /// Unknown names fail loudly at the string boundary instead of being
    /// silently ignored.
    #[error("unknown feature flag: {0}")]
    UnknownFlag(String),

    /// Flag mutation attempted by a non-dev identity
    #[error("flag mutation requires the dev role, not {0}")]
    MutationDenied(String),
}

/// The closed set of feature flags.
///
/// Capability gates switch individual actions on and off; beta gates are
/// capability gates for features that ship dark; emergency switches override
/// everything for non-dev identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    Registrations,
    JoinRequests,
    BlogPosting,
    EventCreation,
    TaskSubmissions,
    Announcements,
    Leaderboard,
    ProjectSystem,
    AiFeatures,
    Certificates,
    InternalChat,
    MaintenanceMode,
    LoginDisabled,
    DashboardsFrozen,
}

impl Flag {
    /// Every flag, in the order the settings panel lists them
    pub const ALL: [Flag; 14] = [
        Flag::Registrations,
        Flag::JoinRequests,
        Flag::BlogPosting,
        Flag::EventCreation,
        Flag::TaskSubmissions,
        Flag::Announcements,
        Flag::Leaderboard,
        Flag::ProjectSystem,
        Flag::AiFeatures,
        Flag::Certificates,
        Flag::InternalChat,
        Flag::MaintenanceMode,
        Flag::LoginDisabled,
        Flag::DashboardsFrozen,
    ];

    /// The stable name used in config files and snapshots
    pub fn name(&self) -> &'static str {
        match self {
            Flag::Registrations => "registrations_enabled",
            Flag::JoinRequests => "join_requests_enabled",
            Flag::BlogPosting => "blog_posting_enabled",
            Flag::EventCreation => "event_creation_enabled",
            Flag::TaskSubmissions => "task_submissions_enabled",
            Flag::Announcements => "announcements_enabled",
            Flag::Leaderboard => "leaderboard_enabled",
            Flag::ProjectSystem => "project_system_enabled",
            Flag::AiFeatures => "ai_features_enabled",
            Flag::Certificates => "certificates_enabled",
            Flag::InternalChat => "internal_chat_enabled",
            Flag::MaintenanceMode => "maintenance_mode",
            Flag::LoginDisabled => "login_disabled",
            Flag::DashboardsFrozen => "dashboards_frozen",
        }
    }

    /// Site-wide override switches (maintenance, login-disable, freeze)
    pub fn is_emergency(&self) -> bool {
        matches!(
            self,
            Flag::MaintenanceMode | Flag::LoginDisabled | Flag::DashboardsFrozen
        )
    }

    /// Gates for features that ship disabled by default
    pub fn is_beta(&self) -> bool {
        matches!(
            self,
            Flag::Leaderboard
                | Flag::ProjectSystem
                | Flag::AiFeatures
                | Flag::Certificates
                | Flag::InternalChat
        )
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Flag {
    type Err = FlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flag::ALL
            .iter()
            .copied()
            .find(|flag| flag.name() == s)
            .ok_or_else(|| FlagError::UnknownFlag(s.to_string()))
    }
}

/// A point-in-time view of every flag.
///
/// `Copy` on purpose: the permission evaluator takes a snapshot per call, so
/// a mutation landing mid-evaluation cannot produce a torn read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(default = "enabled")]
    pub registrations_enabled: bool,
    #[serde(default = "enabled")]
    pub join_requests_enabled: bool,
    #[serde(default = "enabled")]
    pub blog_posting_enabled: bool,
    #[serde(default = "enabled")]
    pub event_creation_enabled: bool,
    #[serde(default = "enabled")]
    pub task_submissions_enabled: bool,
    #[serde(default = "enabled")]
    pub announcements_enabled: bool,

    #[serde(default)]
    pub leaderboard_enabled: bool,
    #[serde(default)]
    pub project_system_enabled: bool,
    #[serde(default)]
    pub ai_features_enabled: bool,
    #[serde(default)]
    pub certificates_enabled: bool,
    #[serde(default)]
    pub internal_chat_enabled: bool,

    #[serde(default)]
    pub maintenance_mode: bool,
    #[serde(default)]
    pub login_disabled: bool,
    #[serde(default)]
    pub dashboards_frozen: bool,
}

fn enabled() -> bool {
    true
}

impl Default for FeatureFlags {
    /// The documented defaults table: capability gates on, beta gates and
    /// emergency switches off.
    fn default() -> Self {
        Self {
            registrations_enabled: true,
            join_requests_enabled: true,
            blog_posting_enabled: true,
            event_creation_enabled: true,
            task_submissions_enabled: true,
            announcements_enabled: true,
            leaderboard_enabled: false,
            project_system_enabled: false,
            ai_features_enabled: false,
            certificates_enabled: false,
            internal_chat_enabled: false,
            maintenance_mode: false,
            login_disabled: false,
            dashboards_frozen: false,
        }
    }
}

impl FeatureFlags {
    /// Read one flag
    pub fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::Registrations => self.registrations_enabled,
            Flag::JoinRequests => self.join_requests_enabled,
            Flag::BlogPosting => self.blog_posting_enabled,
            Flag::EventCreation => self.event_creation_enabled,
            Flag::TaskSubmissions => self.task_submissions_enabled,
            Flag::Announcements => self.announcements_enabled,
            Flag::Leaderboard => self.leaderboard_enabled,
            Flag::ProjectSystem => self.project_system_enabled,
            Flag::AiFeatures => self.ai_features_enabled,
            Flag::Certificates => self.certificates_enabled,
            Flag::InternalChat => self.internal_chat_enabled,
            Flag::MaintenanceMode => self.maintenance_mode,
            Flag::LoginDisabled => self.login_disabled,
            Flag::DashboardsFrozen => self.dashboards_frozen,
        }
    }

    /// Write one flag in place
    pub fn set(&mut self, flag: Flag, value: bool) {
        match flag {
            Flag::Registrations => self.registrations_enabled = value,
            Flag::JoinRequests => self.join_requests_enabled = value,
            Flag::BlogPosting => self.blog_posting_enabled = value,
            Flag::EventCreation => self.event_creation_enabled = value,
            Flag::TaskSubmissions => self.task_submissions_enabled = value,
            Flag::Announcements => self.announcements_enabled = value,
            Flag::Leaderboard => self.leaderboard_enabled = value,
            Flag::ProjectSystem => self.project_system_enabled = value,
            Flag::AiFeatures => self.ai_features_enabled = value,
            Flag::Certificates => self.certificates_enabled = value,
            Flag::InternalChat => self.internal_chat_enabled = value,
            Flag::MaintenanceMode => self.maintenance_mode = value,
            Flag::LoginDisabled => self.login_disabled = value,
            Flag::DashboardsFrozen => self.dashboards_frozen = value,
        }
    }
}
