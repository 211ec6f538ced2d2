//! Reply tone.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tone requested for a generated reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Funny,
    Sarcastic,
    Mild,
}

impl Tone {
    /// All tones in menu order.
    pub const ALL: [Tone; 3] = [Tone::Funny, Tone::Sarcastic, Tone::Mild];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Funny => "funny",
            Self::Sarcastic => "sarcastic",
            Self::Mild => "mild",
        }
    }

    /// Capitalized menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Funny => "Funny",
            Self::Sarcastic => "Sarcastic",
            Self::Mild => "Mild",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Funny => "🎭",
            Self::Sarcastic => "😏",
            Self::Mild => "😌",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "funny" => Ok(Self::Funny),
            "sarcastic" => Ok(Self::Sarcastic),
            "mild" => Ok(Self::Mild),
            other => Err(format!("unknown tone '{}'", other)),
        }
    }
}
