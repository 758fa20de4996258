//! # Value Objects
//!
//! Identifiers and validated names used by the posts domain.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::ValueError;

/// Maximum slug length (Django `SlugField` default).
pub const MAX_SLUG_LEN: usize = 50;

/// Maximum username length.
pub const MAX_USERNAME_LEN: usize = 150;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw numeric value.
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }
    };
}

numeric_id!(
    /// User identifier, assigned by the identity provider's table.
    UserId
);
numeric_id!(
    /// Group identifier.
    GroupId
);
numeric_id!(
    /// Post identifier. Monotonic: a larger id was inserted later.
    PostId
);

/// URL-safe group slug.
///
/// Letters, digits, hyphens and underscores only.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate and wrap a slug.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValueError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValueError::EmptySlug);
        }
        if raw.chars().count() > MAX_SLUG_LEN {
            return Err(ValueError::SlugTooLong {
                len: raw.chars().count(),
                max: MAX_SLUG_LEN,
            });
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(ValueError::InvalidSlugChar(bad));
        }
        Ok(Self(raw))
    }

    /// Borrow the slug text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique username.
///
/// Letters, digits and `@ . + - _`, as accepted by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and wrap a username.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValueError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValueError::EmptyUsername);
        }
        if raw.chars().count() > MAX_USERNAME_LEN {
            return Err(ValueError::UsernameTooLong {
                len: raw.chars().count(),
                max: MAX_USERNAME_LEN,
            });
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')))
        {
            return Err(ValueError::InvalidUsernameChar(bad));
        }
        Ok(Self(raw))
    }

    /// Borrow the username text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
