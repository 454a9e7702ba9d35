use learnexia_client_core::{ProfileApi, SessionStore, UiCallBack};
use learnexia_shared::{
    const_config::messages::{
        MSG_LOAD_PROFILE_FAILED, MSG_NAME_FALLBACK, MSG_NAME_NOT_SET, MSG_SAVE_PROFILE_FAILED,
    },
    errors::ConversionError,
    profile::{CourseId, CourseSummary, ProfileSummary},
    req_args::api::UpdateMeReqArgs,
    uac::{DisplayName, Role, User},
};
use tracing::{info, warn};
use web_time::Instant;

use super::{
    change_password::UiChangePassword,
    data_state::{error_message_or, settle_or_default, AwaitingType},
};
use crate::{ensure_session, format::format_inr, Navigator, ProtectedPage, Route};

/// Everything the profile page shows once loaded
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileData {
    pub user: User,
    pub summary: ProfileSummary,
    pub balance: f64,
    pub courses: Vec<CourseSummary>,
}

impl ProfileData {
    /// Name in the header card
    pub fn header_name(&self) -> &str {
        self.user.name_or(MSG_NAME_FALLBACK)
    }

    /// Name in the details section
    pub fn details_name(&self) -> &str {
        self.user.name_or(MSG_NAME_NOT_SET)
    }

    pub fn formatted_balance(&self) -> String {
        format_inr(self.balance)
    }
}

#[derive(Debug, Default)]
pub enum PageState {
    #[default]
    Loading,
    Ready(ProfileData),
    /// Shown as a banner instead of the data
    Failed(String),
}

#[derive(Debug, Default)]
pub struct ProfileEditState {
    name: String,
    is_editing: bool,
    saving: Option<AwaitingType<User>>,
    error_message: Option<String>,
}

impl ProfileEditState {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    #[error("Invalid name: {0}")]
    InvalidName(#[from] ConversionError),
    #[error("a save is already in progress")]
    Busy,
    #[error("not editing")]
    NotEditing,
    #[error("profile has not been loaded")]
    NotLoaded,
}

#[derive(Debug, Default)]
pub struct ProfilePage {
    state: PageState,
    edit: ProfileEditState,
    password: UiChangePassword,
}

impl ProtectedPage for ProfilePage {
    fn required_role() -> Role {
        Role::User
    }
}

impl ProfilePage {
    /// Runs the session guard then loads the page
    ///
    /// Returns `None` if the guard redirected, in that case no request is
    /// made
    #[tracing::instrument(skip_all)]
    pub async fn mount<S, N, A, F>(
        store: &S,
        navigator: &mut N,
        api: &A,
        ui_notify: F,
    ) -> Option<Self>
    where
        S: SessionStore + ?Sized,
        N: Navigator + ?Sized,
        A: ProfileApi,
        F: UiCallBack + Clone,
    {
        ensure_session(store, navigator, Self::required_role()).ok()?;
        let mut result = Self::default();
        result.load(api, ui_notify).await;
        Some(result)
    }

    /// Reads the cached user then waits for the summary, balance and course
    /// list which are requested together
    #[tracing::instrument(skip_all)]
    pub async fn load<A, F>(&mut self, api: &A, ui_notify: F)
    where
        A: ProfileApi,
        F: UiCallBack + Clone,
    {
        self.state = PageState::Loading;
        let Some(user) = api.get_current_user() else {
            warn!("no cached user available for the profile page");
            self.state = PageState::Failed(MSG_LOAD_PROFILE_FAILED.to_string());
            return;
        };
        let (summary, balance, courses) = futures::join!(
            settle_or_default(api.get_profile_summary(ui_notify.clone()), "profile summary"),
            settle_or_default(api.get_wallet_balance(ui_notify.clone()), "wallet balance"),
            settle_or_default(api.get_my_courses(ui_notify), "enrolled courses"),
        );
        self.state = PageState::Ready(ProfileData {
            user,
            summary,
            balance: balance.amount(),
            courses,
        });
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn data(&self) -> Option<&ProfileData> {
        match &self.state {
            PageState::Ready(data) => Some(data),
            PageState::Loading | PageState::Failed(_) => None,
        }
    }

    pub fn error_banner(&self) -> Option<&str> {
        match &self.state {
            PageState::Failed(msg) => Some(msg),
            PageState::Loading | PageState::Ready(_) => None,
        }
    }

    pub fn edit(&self) -> &ProfileEditState {
        &self.edit
    }

    /// Enters edit mode with the current name filled in
    pub fn start_editing(&mut self) -> Result<(), EditError> {
        if self.edit.is_saving() {
            return Err(EditError::Busy);
        }
        let data = self.data().ok_or(EditError::NotLoaded)?;
        let name = data.user.name().map(ToString::to_string).unwrap_or_default();
        self.edit = ProfileEditState {
            name,
            is_editing: true,
            saving: None,
            error_message: None,
        };
        Ok(())
    }

    /// Ignored unless editing and idle
    pub fn set_name(&mut self, name: impl Into<String>) {
        if self.edit.is_editing && !self.edit.is_saving() {
            self.edit.name = name.into();
        }
    }

    /// Leaves edit mode. A save in flight is discarded
    pub fn cancel_editing(&mut self) {
        self.edit = ProfileEditState::default();
    }

    /// Validates the typed name and sends it
    #[tracing::instrument(skip(api, ui_notify))]
    pub fn save<A, F>(&mut self, api: &A, ui_notify: F) -> Result<(), EditError>
    where
        A: ProfileApi,
        F: UiCallBack,
    {
        if !self.edit.is_editing {
            return Err(EditError::NotEditing);
        }
        if self.edit.is_saving() {
            return Err(EditError::Busy);
        }
        let name = match DisplayName::try_from(self.edit.name.as_str()) {
            Ok(name) => name,
            Err(e) => {
                let e = EditError::from(e);
                self.edit.error_message = Some(e.to_string());
                return Err(e);
            }
        };
        self.edit.error_message = None;
        let rx = api.update_me(&UpdateMeReqArgs { name }, ui_notify);
        self.edit.saving = Some(AwaitingType(rx));
        Ok(())
    }

    /// Call once per frame to pick up responses and run timers
    pub fn poll(&mut self, now: Instant) {
        let outcome = match &mut self.edit.saving {
            Some(rx) => rx.try_outcome(),
            None => None,
        };
        if let Some(outcome) = outcome {
            self.apply_save(outcome);
        }
        self.password.poll(now);
    }

    /// Waits for an outstanding save, if any
    pub async fn settle_save(&mut self) {
        let Some(rx) = &mut self.edit.saving else {
            return;
        };
        let outcome = rx.outcome().await;
        self.apply_save(outcome);
    }

    fn apply_save(&mut self, outcome: anyhow::Result<User>) {
        self.edit.saving = None;
        match outcome {
            Ok(user) => {
                info!(?user, "profile saved");
                if let PageState::Ready(data) = &mut self.state {
                    data.user = user;
                }
                self.edit = ProfileEditState::default();
            }
            Err(e) => {
                warn!(?e, "profile save failed");
                self.edit.error_message = Some(error_message_or(&e, MSG_SAVE_PROFILE_FAILED));
            }
        }
    }

    pub fn password(&self) -> &UiChangePassword {
        &self.password
    }

    pub fn password_mut(&mut self) -> &mut UiChangePassword {
        &mut self.password
    }

    pub fn toggle_password_dialog(&mut self) {
        self.password.toggle();
    }

    pub fn open_course<N: Navigator + ?Sized>(&self, course_id: &CourseId, navigator: &mut N) {
        navigator.navigate_to(&Route::Learn(course_id.clone()).path());
    }
}
