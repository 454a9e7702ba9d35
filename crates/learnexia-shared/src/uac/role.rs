use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The kind of account a user has
///
/// Role strings the client does not know about become [`Role::Unknown`] so
/// that a newer server cannot break deserialization of the cached user. No
/// page ever requires [`Role::Unknown`].
#[derive(
    Debug,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Instructor,
    Admin,
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Returns `true` if a session holding `self` may open a page that
    /// requires `required`
    ///
    /// Roles are not hierarchical, an admin session does not satisfy a page
    /// that requires a user
    #[must_use]
    pub fn satisfies(self, required: Role) -> bool {
        self != Role::Unknown && self == required
    }
}
