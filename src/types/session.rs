use serde::{Deserialize, Serialize};

/// Lifecycle of an audited SSH session.
///
/// A session starts `Active` and moves forward exactly once, to `Closed` or
/// `Unknown`. Whether a closed session ended cleanly, with an error or through
/// crash recovery is carried by its error message, not by the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Closed,
    Unknown,
}

impl SessionStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "closed" => Some(Self::Closed),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
            Self::Unknown => "unknown",
        }
    }
}
