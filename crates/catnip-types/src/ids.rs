//! Type-safe identifier wrappers.
//!
//! Agents and trees are keyed by caller-visible strings (`cat_001`,
//! `player_cat_42_3`, a tagged world object name). Humans are keyed by the
//! numeric account id handed over by the session layer.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from anything string-like.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_string_id! {
    /// Unique identifier for a simulated cat.
    AgentId
}

define_string_id! {
    /// Identifier of a tagged climbable object (cat tree) in the world.
    TreeId
}

/// Identifier of a connected human player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct HumanId(pub u64);

impl HumanId {
    /// Return the raw numeric id.
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for HumanId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for HumanId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
