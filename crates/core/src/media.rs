//! Media kinds, watch statuses and the field rules for media items.
//!
//! `kind` and `status` are stored as TEXT codes. Known codes decode into
//! their variant; anything else is kept verbatim in an `Unknown` variant so
//! legacy rows still load and display as their raw code.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lowest accepted rating.
pub const RATING_MIN: i16 = 1;

/// Highest accepted rating.
pub const RATING_MAX: i16 = 10;

macro_rules! define_code_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal, $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A stored code outside the known set, kept as-is.
            Unknown(String),
        }

        impl $name {
            /// Every known code, in display order.
            pub const CODES: &'static [&'static str] = &[$($code),+];

            /// The code stored in the database and sent over the wire.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $code, )+
                    Self::Unknown(raw) => raw.as_str(),
                }
            }

            /// Human-readable label. Unknown codes display as themselves.
            pub fn label(&self) -> &str {
                match self {
                    $( Self::$variant => $label, )+
                    Self::Unknown(raw) => raw.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Unknown(_))
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                match code {
                    $( $code => Self::$variant, )+
                    other => Self::Unknown(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                match Self::from(code.as_str()) {
                    Self::Unknown(_) => Self::Unknown(code),
                    known => known,
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Unknown(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_code_enum! {
    /// What sort of media an item is.
    MediaKind {
        Movie => "movie", "Movie",
        Series => "series", "Series",
        Other => "other", "Other",
    }
}

define_code_enum! {
    /// Where the owner is with an item.
    WatchStatus {
        WantToWatch => "want_to_watch", "Want to watch",
        Watching => "watching", "Watching",
        Watched => "watched", "Watched",
    }
}

impl Default for MediaKind {
    fn default() -> Self {
        Self::Movie
    }
}

impl Default for WatchStatus {
    fn default() -> Self {
        Self::WantToWatch
    }
}

/// Trim a text value and collapse empty input to `None`.
pub fn normalize_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Check that title, kind and status are all present.
///
/// The error names every missing field, e.g. `"title and status are required"`.
pub fn validate_required(
    title: Option<&str>,
    kind: Option<&str>,
    status: Option<&str>,
) -> Result<(), CoreError> {
    let missing: Vec<&str> = [("title", title), ("kind", kind), ("status", status)]
        .into_iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect();

    match missing.as_slice() {
        [] => Ok(()),
        [only] => Err(CoreError::Validation(format!("{only} is required"))),
        [init @ .., last] => Err(CoreError::Validation(format!(
            "{} and {last} are required",
            init.join(", ")
        ))),
    }
}

/// Check a rating against the accepted range and the item's status.
///
/// Ratings are only kept for watched items.
pub fn validate_rating(rating: Option<i16>, status: &WatchStatus) -> Result<(), CoreError> {
    let Some(rating) = rating else {
        return Ok(());
    };

    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "rating must be between {RATING_MIN} and {RATING_MAX}, got {rating}"
        )));
    }

    if *status != WatchStatus::Watched {
        return Err(CoreError::Validation(format!(
            "rating is only allowed when status is '{}', got '{status}'",
            WatchStatus::Watched
        )));
    }

    Ok(())
}
