/// Identifier generation for screens, components and edges
/// Ids look like "screen_01j9x4m2k8...": a prefix, an underscore, then a
/// lower-cased ULID (millisecond timestamp followed by random bits)

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Generate a process-unique id with the given prefix
pub fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Ulid::new().to_string().to_ascii_lowercase())
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used by freshly generated ids
            pub const PREFIX: &'static str = $prefix;

            /// Generate a fresh id
            pub fn generate() -> Self {
                Self(generate_id(Self::PREFIX))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

    };
}

string_id!(
    /// Identifier of a screen node
    ScreenId,
    "screen"
);

string_id!(
    /// Identifier of a component, stable across reorders within its screen
    ComponentId,
    "component"
);

string_id!(
    /// Identifier of a navigation edge
    EdgeId,
    "edge"
);
