//! Optional message bodies.

use std::fmt;

/// State of an [`OptionalBody`], without its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyState {
    /// Body was given but is zero-length
    Empty,
    /// No body was specified
    Missing,
    /// Body was explicitly null
    Null,
    /// Body has content
    Present,
}

/// A message body that distinguishes absent, null, empty and present content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OptionalBody {
    /// Zero-length body
    Empty,
    /// No body
    #[default]
    Missing,
    /// Explicit null body
    Null,
    /// Body content
    Present(String),
}

impl OptionalBody {
    /// Create an empty body.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// Create a missing body.
    #[must_use]
    pub const fn missing() -> Self {
        Self::Missing
    }

    /// Create a null body.
    #[must_use]
    pub const fn null() -> Self {
        Self::Null
    }

    /// Create a body from content. Zero-length content yields [`OptionalBody::Empty`].
    #[must_use]
    pub fn body(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Present(value)
        }
    }

    /// Create a body from optional content. `None` yields [`OptionalBody::Missing`].
    #[must_use]
    pub fn from_option(value: Option<String>) -> Self {
        value.map_or(Self::Missing, Self::body)
    }

    /// Get the body state.
    #[must_use]
    pub const fn state(&self) -> BodyState {
        match self {
            Self::Empty => BodyState::Empty,
            Self::Missing => BodyState::Missing,
            Self::Null => BodyState::Null,
            Self::Present(_) => BodyState::Present,
        }
    }

    /// Get the body content, if present.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    /// Get the body content, or an empty string.
    #[must_use]
    pub fn value_or_empty(&self) -> &str {
        self.value().unwrap_or_default()
    }

    /// Check if the body has content.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Check if the body is missing.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Check if the body is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Check if the body is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for OptionalBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Missing => f.write_str("Missing"),
            Self::Null => f.write_str("Null"),
            Self::Present(value) => write!(f, "Present({} bytes)", value.len()),
        }
    }
}

impl From<&str> for OptionalBody {
    fn from(value: &str) -> Self {
        Self::body(value)
    }
}

impl From<String> for OptionalBody {
    fn from(value: String) -> Self {
        Self::body(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_constructor() {
        assert_eq!(OptionalBody::body(""), OptionalBody::Empty);
        assert_eq!(
            OptionalBody::body("{}"),
            OptionalBody::Present("{}".to_string())
        );
        assert_eq!(OptionalBody::from_option(None), OptionalBody::Missing);
        assert_eq!(
            OptionalBody::from_option(Some("x".to_string())).state(),
            BodyState::Present
        );
    }

    #[test]
    fn test_states() {
        assert_eq!(OptionalBody::empty().state(), BodyState::Empty);
        assert_eq!(OptionalBody::missing().state(), BodyState::Missing);
        assert_eq!(OptionalBody::null().state(), BodyState::Null);
        assert!(OptionalBody::null().is_null());
        assert!(OptionalBody::default().is_missing());
        assert_eq!(OptionalBody::null().value(), None);
        assert_eq!(OptionalBody::null().value_or_empty(), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(OptionalBody::body("abc").to_string(), "Present(3 bytes)");
        assert_eq!(OptionalBody::missing().to_string(), "Missing");
    }
}
