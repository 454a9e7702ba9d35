use learnexia_client_core::{ProfileApi, UiCallBack};
use learnexia_shared::{
    const_config::{
        messages::{MSG_CHANGE_PASSWORD_FAILED, MSG_PASSWORD_CHANGED},
        password::PASSWORD_SUCCESS_AUTO_CLOSE,
    },
    req_args::api::ChangePasswordReqArgs,
    uac::ChangePasswordError,
};
use secrecy::{ExposeSecret as _, SecretString};
use tracing::info;
use web_time::Instant;

use super::data_state::{error_message_or, AwaitingType};

/// Where the dialog is in its life cycle
///
/// `Closed -> Open -> Submitting -> Succeeded -> Closed`, a failed attempt
/// goes back to `Open` with the error message set
#[derive(Debug, Default)]
enum DialogStatus {
    #[default]
    Closed,
    Open,
    Submitting(AwaitingType<()>),
    Succeeded {
        closes_at: Instant,
    },
}

/// Change password dialog on the profile page
#[derive(Debug)]
pub struct UiChangePassword {
    status: DialogStatus,
    current_password: SecretString,
    new_password: SecretString,
    confirmation_password: SecretString,
    error_message: Option<String>,
    success_message: Option<String>,
}

impl UiChangePassword {
    pub fn is_open(&self) -> bool {
        !matches!(self.status, DialogStatus::Closed)
    }

    /// The busy flag. While set the submit action is disabled
    pub fn is_submitting(&self) -> bool {
        matches!(self.status, DialogStatus::Submitting(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    /// When the dialog will close itself after a successful change
    pub fn closes_at(&self) -> Option<Instant> {
        match self.status {
            DialogStatus::Succeeded { closes_at } => Some(closes_at),
            _ => None,
        }
    }

    /// Controls if the submit button should be enabled (all fields are
    /// required)
    pub fn is_ready_to_send(&self) -> bool {
        matches!(self.status, DialogStatus::Open)
            && !self.current_password.expose_secret().is_empty()
            && !self.new_password.expose_secret().is_empty()
            && !self.confirmation_password.expose_secret().is_empty()
    }

    /// Fields can only be edited while the form is shown and idle
    fn is_editable(&self) -> bool {
        matches!(self.status, DialogStatus::Open)
    }

    pub fn set_current_password(&mut self, value: SecretString) {
        if self.is_editable() {
            self.current_password = value;
        }
    }

    pub fn set_new_password(&mut self, value: SecretString) {
        if self.is_editable() {
            self.new_password = value;
        }
    }

    pub fn set_confirmation_password(&mut self, value: SecretString) {
        if self.is_editable() {
            self.confirmation_password = value;
        }
    }

    /// True once all three fields have been cleared
    pub fn all_fields_empty(&self) -> bool {
        self.current_password.expose_secret().is_empty()
            && self.new_password.expose_secret().is_empty()
            && self.confirmation_password.expose_secret().is_empty()
    }

    pub fn open(&mut self) {
        if !self.is_open() {
            info!("open change password dialog");
            self.status = DialogStatus::Open;
        }
    }

    /// Closes from any state, clearing all fields and messages
    ///
    /// Closing while a request is outstanding discards its outcome
    pub fn close(&mut self) {
        info!("close change password dialog");
        *self = Self::default();
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Validates the fields and if they pass sends the request
    ///
    /// A validation failure is also shown as the dialog's error message and
    /// nothing is sent
    #[tracing::instrument(skip(api, ui_notify))]
    pub fn submit<A, F>(&mut self, api: &A, ui_notify: F) -> Result<(), ChangePasswordError>
    where
        A: ProfileApi,
        F: UiCallBack,
    {
        match self.status {
            DialogStatus::Open => {}
            DialogStatus::Submitting(_) => return Err(ChangePasswordError::Busy),
            DialogStatus::Closed | DialogStatus::Succeeded { .. } => {
                return Err(ChangePasswordError::NotOpen)
            }
        }
        let args = ChangePasswordReqArgs {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
            new_password_check: self.confirmation_password.clone(),
        };
        if let Err(e) = args.validate() {
            info!(?e, "change password rejected before sending");
            self.success_message = None;
            self.error_message = Some(e.to_string());
            return Err(e);
        }
        self.error_message = None;
        self.success_message = None;
        self.status = DialogStatus::Submitting(AwaitingType(api.change_password(&args, ui_notify)));
        Ok(())
    }

    /// Call once per frame. Takes the response if it arrived and closes the
    /// dialog once the success message has been shown long enough
    pub fn poll(&mut self, now: Instant) {
        match &mut self.status {
            DialogStatus::Submitting(rx) => {
                if let Some(outcome) = rx.try_outcome() {
                    self.apply_outcome(outcome, now);
                }
            }
            DialogStatus::Succeeded { closes_at } => {
                if now >= *closes_at {
                    self.close();
                }
            }
            DialogStatus::Closed | DialogStatus::Open => {}
        }
    }

    /// Waits for an outstanding request, if any
    pub async fn settle(&mut self) {
        if let DialogStatus::Submitting(rx) = &mut self.status {
            let outcome = rx.outcome().await;
            self.apply_outcome(outcome, Instant::now());
        }
    }

    fn apply_outcome(&mut self, outcome: anyhow::Result<()>, now: Instant) {
        match outcome {
            Ok(()) => {
                info!("password changed");
                self.current_password = SecretString::from("");
                self.new_password = SecretString::from("");
                self.confirmation_password = SecretString::from("");
                self.error_message = None;
                self.success_message = Some(MSG_PASSWORD_CHANGED.to_string());
                self.status = DialogStatus::Succeeded {
                    closes_at: now + PASSWORD_SUCCESS_AUTO_CLOSE,
                };
            }
            Err(e) => {
                info!(?e, "change password failed");
                self.success_message = None;
                self.error_message = Some(error_message_or(&e, MSG_CHANGE_PASSWORD_FAILED));
                self.status = DialogStatus::Open;
            }
        }
    }
}

impl Default for UiChangePassword {
    fn default() -> Self {
        Self {
            status: Default::default(),
            current_password: SecretString::from(""),
            new_password: SecretString::from(""),
            confirmation_password: SecretString::from(""),
            error_message: None,
            success_message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
        time::Duration,
    };

    use learnexia_shared::uac::Role;

    use super::*;
    use crate::test_helpers::{no_cb, sample_user, FakeApi};

    fn filled_dialog(current: &str, new: &str, confirm: &str) -> UiChangePassword {
        let mut result = UiChangePassword::default();
        result.open();
        result.set_current_password(current.to_string().into());
        result.set_new_password(new.to_string().into());
        result.set_confirmation_password(confirm.to_string().into());
        result
    }

    fn api() -> FakeApi {
        FakeApi::new(Some(sample_user(Role::User)))
    }

    #[test]
    fn mismatch_never_calls_backend() {
        // Arrange
        let api = api();
        let mut dialog = filled_dialog("a", "bbbbbb", "bbbbbc");

        // Act
        let actual = dialog.submit(&api, no_cb);

        // Assert
        assert_eq!(actual, Err(ChangePasswordError::PasswordsDoNotMatch));
        assert_eq!(dialog.error_message(), Some("New passwords do not match"));
        assert_eq!(dialog.success_message(), None);
        assert_eq!(api.count("change_password"), 0);
        assert!(!dialog.is_submitting());
    }

    #[test]
    fn too_short_never_calls_backend() {
        // Arrange
        let api = api();
        let mut dialog = filled_dialog("a", "bbbbb", "bbbbb");

        // Act
        let actual = dialog.submit(&api, no_cb);

        // Assert
        assert_eq!(
            actual,
            Err(ChangePasswordError::TooShort { min: 6, actual: 5 })
        );
        assert_eq!(
            dialog.error_message(),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(api.count("change_password"), 0);
    }

    #[test]
    fn success_clears_fields_and_closes_after_delay() {
        // Arrange
        let api = api();
        let mut dialog = filled_dialog("a", "bbbbbb", "bbbbbb");
        let start = Instant::now();

        // Act - Submit and receive the response
        dialog.submit(&api, no_cb).unwrap();
        dialog.poll(start);

        // Assert - Success shown, fields cleared
        assert_eq!(dialog.success_message(), Some("Password changed successfully!"));
        assert_eq!(dialog.error_message(), None);
        assert!(dialog.all_fields_empty());
        assert_eq!(dialog.closes_at(), Some(start + Duration::from_millis(2000)));
        assert_eq!(api.count("change_password"), 1);

        // Act - Just before the delay
        dialog.poll(start + Duration::from_millis(1999));

        // Assert - Still open
        assert!(dialog.is_open());

        // Act - Delay reached
        dialog.poll(start + Duration::from_millis(2000));

        // Assert - Closed and cleared
        assert!(!dialog.is_open());
        assert_eq!(dialog.success_message(), None);
    }

    #[test]
    fn backend_failure_keeps_fields_for_retry() {
        // Arrange
        let mut api = api();
        api.change_password = Err("Old password is incorrect".to_string());
        let mut dialog = filled_dialog("wrong", "bbbbbb", "bbbbbb");

        // Act
        dialog.submit(&api, no_cb).unwrap();
        dialog.poll(Instant::now());

        // Assert - Error shown, back to open with fields kept
        assert_eq!(dialog.error_message(), Some("Old password is incorrect"));
        assert_eq!(dialog.success_message(), None);
        assert!(dialog.is_ready_to_send());

        // Act - Retry succeeds
        api.change_password = Ok(());
        dialog.submit(&api, no_cb).unwrap();
        dialog.poll(Instant::now());

        // Assert - Exactly one message set
        assert_eq!(dialog.error_message(), None);
        assert!(dialog.success_message().is_some());
    }

    #[test]
    fn empty_backend_message_uses_fallback() {
        let mut api = api();
        api.change_password = Err(String::new());
        let mut dialog = filled_dialog("a", "bbbbbb", "bbbbbb");

        dialog.submit(&api, no_cb).unwrap();
        dialog.poll(Instant::now());

        assert_eq!(dialog.error_message(), Some("Failed to change password"));
    }

    #[test]
    fn second_submit_while_busy_is_rejected() {
        // Arrange
        let mut api = api();
        api.hold_change_password = true;
        let mut dialog = filled_dialog("a", "bbbbbb", "bbbbbb");
        let notified = Arc::new(AtomicBool::new(false));
        let ui_notify = {
            let notified = Arc::clone(&notified);
            move || notified.store(true, Ordering::SeqCst)
        };

        // Act
        dialog.submit(&api, ui_notify).unwrap();
        dialog.poll(Instant::now());
        let second = dialog.submit(&api, no_cb);

        // Assert - Still outstanding
        assert!(!notified.load(Ordering::SeqCst));
        assert!(dialog.is_submitting());
        assert!(!dialog.is_ready_to_send());
        assert_eq!(second, Err(ChangePasswordError::Busy));
        assert_eq!(api.count("change_password"), 1);

        // Act - Response arrives
        api.release_change_password(Ok(()));
        dialog.poll(Instant::now());

        // Assert
        assert!(notified.load(Ordering::SeqCst));
        assert!(!dialog.is_submitting());
        assert!(dialog.success_message().is_some());
    }

    #[test]
    fn manual_close_after_failure_clears_everything() {
        // Arrange
        let api = api();
        let mut dialog = filled_dialog("a", "bbbbbb", "x");
        dialog.submit(&api, no_cb).unwrap_err();

        // Act
        dialog.close();

        // Assert
        assert!(!dialog.is_open());
        assert!(dialog.all_fields_empty());
        assert_eq!(dialog.error_message(), None);
        assert_eq!(dialog.success_message(), None);

        // Assert - Reopening starts fresh
        dialog.open();
        assert!(dialog.all_fields_empty());
        assert_eq!(dialog.error_message(), None);
    }

    #[test]
    fn closed_dialog_does_not_submit_or_accept_input() {
        let api = api();
        let mut dialog = UiChangePassword::default();

        dialog.set_new_password("bbbbbb".to_string().into());

        assert!(dialog.all_fields_empty());
        assert_eq!(dialog.submit(&api, no_cb), Err(ChangePasswordError::NotOpen));
        assert_eq!(api.count("change_password"), 0);
    }

    #[test]
    fn closing_while_submitting_discards_the_response() {
        // Arrange
        let mut api = api();
        api.hold_change_password = true;
        let mut dialog = filled_dialog("a", "bbbbbb", "bbbbbb");
        dialog.submit(&api, no_cb).unwrap();

        // Act
        dialog.close();
        api.release_change_password(Ok(()));
        dialog.poll(Instant::now());

        // Assert
        assert!(!dialog.is_open());
        assert!(!dialog.is_submitting());
        assert!(dialog.all_fields_empty());
        assert_eq!(dialog.success_message(), None);
        assert_eq!(dialog.error_message(), None);
        assert_eq!(dialog.closes_at(), None);
    }

    #[test]
    fn toggle_opens_and_closes() {
        let mut dialog = UiChangePassword::default();
        dialog.toggle();
        assert!(dialog.is_open());
        dialog.toggle();
        assert!(!dialog.is_open());
    }

    #[tokio::test]
    async fn settle_waits_for_response() {
        let api = api();
        let mut dialog = filled_dialog("a", "bbbbbb", "bbbbbb");

        dialog.submit(&api, no_cb).unwrap();
        dialog.settle().await;

        assert_eq!(dialog.success_message(), Some("Password changed successfully!"));
        assert!(dialog.closes_at().is_some());
    }
}
