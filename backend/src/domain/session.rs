//! Session tokens carried by the `token` cookie.

use std::fmt;

use uuid::Uuid;

/// Opaque, unguessable session token (random UUID v4).
///
/// # Examples
/// ```
/// use service_station::domain::SessionToken;
///
/// let token = SessionToken::generate();
/// assert_eq!(SessionToken::parse(&token.to_string()), Some(token));
/// assert_eq!(SessionToken::parse("not-a-token"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Draw a fresh 122-bit random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a token presented by a client. Malformed input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    /// Wrap a token read back from storage.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
