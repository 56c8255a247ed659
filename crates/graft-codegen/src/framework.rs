//! Target frameworks.

use std::fmt;
use std::str::FromStr;

use graft_core::UnsupportedFrameworkError;
use serde::{Deserialize, Serialize};

/// A UI framework the synthesiser can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Vue,
    Angular,
}

impl Framework {
    pub const ALL: [Framework; 3] = [Self::React, Self::Vue, Self::Angular];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Vue => "vue",
            Self::Angular => "angular",
        }
    }

    /// Language tag of the emitted source.
    pub fn language(&self) -> &'static str {
        match self {
            Self::React => "tsx",
            Self::Vue => "vue",
            Self::Angular => "typescript",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = UnsupportedFrameworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "react" => Ok(Self::React),
            "vue" => Ok(Self::Vue),
            "angular" => Ok(Self::Angular),
            _ => Err(UnsupportedFrameworkError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_framework() {
        assert_eq!("react".parse::<Framework>().unwrap(), Framework::React);
        assert_eq!(" Vue ".parse::<Framework>().unwrap(), Framework::Vue);
        assert_eq!("ANGULAR".parse::<Framework>().unwrap(), Framework::Angular);
    }

    #[test]
    fn test_unknown_framework() {
        let err = "svelte".parse::<Framework>().unwrap_err();
        assert_eq!(err, UnsupportedFrameworkError("svelte".to_string()));
    }

    #[test]
    fn test_language_tags() {
        let tags: Vec<_> = Framework::ALL.iter().map(|f| f.language()).collect();
        assert_eq!(tags, vec!["tsx", "vue", "typescript"]);
    }
}
