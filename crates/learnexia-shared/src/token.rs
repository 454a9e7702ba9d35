use std::fmt::Debug;

/// Opaque session token issued by the server at login
///
/// Deliberately does not implement `Display` and redacts itself in `Debug` so
/// it does not end up in traces
#[derive(serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for AuthToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AuthToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("is_empty", &self.is_empty())
            .finish()
    }
}
