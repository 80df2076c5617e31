use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_CANDIDATES: usize = 1;
pub const MAX_CANDIDATES: usize = 3;
/// Local hour every freshly added candidate starts at.
pub const DEFAULT_CANDIDATE_HOUR: u32 = 19;

macro_rules! opaque_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Blank input is treated the same as an absent parameter.
            pub fn from_param(raw: Option<&str>) -> Option<Self> {
                raw.map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(Self::new)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_newtype!(EventId);
opaque_newtype!(AccessToken);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    Available,
    Unavailable,
    #[default]
    #[serde(rename = "MAYBE")]
    Undecided,
}

impl Availability {
    pub const ALL: [Availability; 3] = [
        Availability::Available,
        Availability::Unavailable,
        Availability::Undecided,
    ];

    /// Flag sent on the wire. `Undecided` collapses to `false`, so the backend
    /// cannot tell it apart from `Unavailable`.
    pub fn as_submitted(self) -> bool {
        matches!(self, Availability::Available)
    }

    pub fn label(self) -> &'static str {
        match self {
            Availability::Available => "参加可能",
            Availability::Unavailable => "不参加",
            Availability::Undecided => "どちらでもよい",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown availability '{0}', expected available, unavailable or undecided")]
pub struct ParseAvailabilityError(pub String);

impl FromStr for Availability {
    type Err = ParseAvailabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" | "yes" | "y" => Ok(Availability::Available),
            "unavailable" | "no" | "n" => Ok(Availability::Unavailable),
            "undecided" | "maybe" | "?" => Ok(Availability::Undecided),
            _ => Err(ParseAvailabilityError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerRole {
    Organizer,
    Participant,
}

impl ViewerRole {
    pub fn label(self) -> &'static str {
        match self {
            ViewerRole::Organizer => "主催者",
            ViewerRole::Participant => "参加者",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role '{0}', expected organizer or participant")]
pub struct ParseRoleError(pub String);

impl FromStr for ViewerRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "organizer" => Ok(ViewerRole::Organizer),
            "participant" => Ok(ViewerRole::Participant),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}
