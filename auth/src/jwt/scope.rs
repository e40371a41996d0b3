use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Tag separating access tokens from refresh tokens.
///
/// Serialized into the `scope` claim as `access_token` / `refresh_token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenScope {
    AccessToken,
    RefreshToken,
}

impl TokenScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenScope::AccessToken => "access_token",
            TokenScope::RefreshToken => "refresh_token",
        }
    }
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
