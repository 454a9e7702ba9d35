use std::fmt::Display;

use crate::{const_config::password::PASSWORD_MIN_LENGTH, errors::ConversionError};

use super::{ChangePasswordError, Role};

#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct UserId(String);

/// The name a user chooses to be shown with
///
/// Values received from the server are taken as is, values typed by the user
/// go through [`TryFrom`] which trims and rejects blank names. Any other
/// limit is left to the server
#[derive(Default, Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Email(String);

/// The user record as owned by the server and cached by the client
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<DisplayName>,
    pub email: Email,
    pub role: Role,
}

impl TryFrom<String> for DisplayName {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        Ok(Self(value.to_string()))
    }
}

impl TryFrom<&str> for DisplayName {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Email {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Email {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl User {
    /// The name if one is set. An empty name from the server counts as not set
    pub fn name(&self) -> Option<&DisplayName> {
        self.name.as_ref().filter(|name| !name.0.trim().is_empty())
    }

    /// Name to show in headers, falls back to the email
    pub fn display_label(&self) -> &str {
        match self.name() {
            Some(name) => name.as_ref(),
            None => self.email.as_ref(),
        }
    }

    /// Upper cased first letter of [`Self::display_label`]
    pub fn avatar_initial(&self) -> Option<char> {
        self.display_label()
            .trim()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
    }

    pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name().map(|name| name.as_ref()).unwrap_or(fallback)
    }
}

/// Checks a new password against the rules enforced before anything is sent
///
/// The confirmation check runs first so a mismatch is reported even when the
/// password is also too short. Length is counted in UTF-16 code units, the
/// same way browsers count it, so a character outside the BMP counts twice.
pub fn validate_new_password(
    new_password: &str,
    new_password_check: &str,
) -> Result<(), ChangePasswordError> {
    if new_password != new_password_check {
        return Err(ChangePasswordError::PasswordsDoNotMatch);
    }
    let actual = new_password.encode_utf16().count();
    if actual < PASSWORD_MIN_LENGTH {
        return Err(ChangePasswordError::TooShort {
            min: PASSWORD_MIN_LENGTH,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn user_with_name(name: Option<&str>) -> User {
        User {
            id: "65f0c0ffee".into(),
            name: name.map(|x| DisplayName(x.to_string())),
            email: "asha@example.com".into(),
            role: Role::User,
        }
    }

    #[rstest]
    #[case::empty("", ConversionError::Empty)]
    #[case::only_spaces("   ", ConversionError::Empty)]
    fn illegal_display_name(#[case] name: String, #[case] expect: ConversionError) {
        // Act
        let actual: Result<DisplayName, ConversionError> = name.try_into();

        // Assert
        assert_eq!(actual.unwrap_err(), expect);
    }

    #[test]
    fn long_display_name_is_left_to_the_server() {
        let actual: DisplayName = "a".repeat(120).try_into().unwrap();
        assert_eq!(actual.as_ref().len(), 120);
    }

    #[test]
    fn display_name_is_trimmed() {
        let actual: DisplayName = "  Asha Rao ".try_into().unwrap();
        assert_eq!(actual.as_ref(), "Asha Rao");
    }

    #[test]
    fn user_deserializes_from_server_shape() {
        // Arrange
        let json = r#"{"_id":"65f0c0ffee","name":"Asha","email":"asha@example.com","role":"user","createdAt":"2024-01-01"}"#;

        // Act
        let actual: User = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(actual, user_with_name(Some("Asha")));
    }

    #[test]
    fn user_without_name_deserializes() {
        let json = r#"{"_id":"65f0c0ffee","email":"asha@example.com","role":"user"}"#;
        let actual: User = serde_json::from_str(json).unwrap();
        assert_eq!(actual, user_with_name(None));
    }

    #[rstest]
    #[case::named(Some("asha"), "asha", Some('A'))]
    #[case::no_name(None, "asha@example.com", Some('A'))]
    #[case::empty_name(Some(""), "asha@example.com", Some('A'))]
    fn labels_fall_back_to_email(
        #[case] name: Option<&str>,
        #[case] expected_label: &str,
        #[case] expected_initial: Option<char>,
    ) {
        // Arrange
        let user = user_with_name(name);

        // Act
        let label = user.display_label();
        let initial = user.avatar_initial();

        // Assert
        assert_eq!(label, expected_label);
        assert_eq!(initial, expected_initial);
    }

    #[test]
    fn name_or_uses_fallback_for_blank_name() {
        assert_eq!(user_with_name(Some("  ")).name_or("Student"), "Student");
        assert_eq!(user_with_name(Some("Asha")).name_or("Student"), "Asha");
    }

    #[rstest]
    #[case::mismatch("bbbbbb", "bbbbbc", Err(ChangePasswordError::PasswordsDoNotMatch))]
    #[case::mismatch_reported_before_length("b", "c", Err(ChangePasswordError::PasswordsDoNotMatch))]
    #[case::too_short("bbbbb", "bbbbb", Err(ChangePasswordError::TooShort { min: 6, actual: 5 }))]
    #[case::empty("", "", Err(ChangePasswordError::TooShort { min: 6, actual: 0 }))]
    #[case::accented_is_one_unit_each("ééééé", "ééééé", Err(ChangePasswordError::TooShort { min: 6, actual: 5 }))]
    #[case::surrogate_pairs_count_twice("😀😀😀", "😀😀😀", Ok(()))]
    #[case::single_surrogate_pair_too_short("😀", "😀", Err(ChangePasswordError::TooShort { min: 6, actual: 2 }))]
    #[case::exactly_min("bbbbbb", "bbbbbb", Ok(()))]
    fn new_password_rules(
        #[case] new_password: &str,
        #[case] check: &str,
        #[case] expected: Result<(), ChangePasswordError>,
    ) {
        assert_eq!(validate_new_password(new_password, check), expected);
    }
}
