// challenge.rs
use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Estados aceptados por el servicio de autoría de challenges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChallengeStatus {
    Draft,
    Active,
    Completed,
    Archived,
}

impl ChallengeStatus {
    pub const ALL: [ChallengeStatus; 4] = [Self::Draft, Self::Active, Self::Completed, Self::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl FromStr for ChallengeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter()
                 .copied()
                 .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                 .ok_or_else(|| DomainError::UnknownChoice { field: "status",
                                                             value: s.to_string() })
    }
}

impl fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prioridades aceptadas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChallengePriority {
    High,
    Medium,
    Low,
}

impl ChallengePriority {
    pub const ALL: [ChallengePriority; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl FromStr for ChallengePriority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter()
                 .copied()
                 .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                 .ok_or_else(|| DomainError::UnknownChoice { field: "priority",
                                                             value: s.to_string() })
    }
}

impl fmt::Display for ChallengePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Valida que una URL de video sea absoluta (http/https) y apunte a
/// YouTube o Vimeo.
pub fn is_valid_video_url(raw: &str) -> bool {
    let Ok(parsed) = url::Url::parse(raw.trim()) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    ["youtube.com", "youtu.be", "vimeo.com"].iter()
                                             .any(|d| host == *d || host.ends_with(&format!(".{d}")))
}
