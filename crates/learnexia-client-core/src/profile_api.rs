use futures::channel::oneshot;
use learnexia_shared::{
    profile::{CourseSummary, ProfileSummary, WalletBalance},
    req_args::api::{ChangePasswordReqArgs, UpdateMeReqArgs},
    uac::User,
};

use crate::UiCallBack;

/// Receives the outcome of a request that was started in the background
pub type ResponseReceiver<T> = oneshot::Receiver<anyhow::Result<T>>;

/// The backend operations the profile workflow depends on
///
/// Every asynchronous operation starts immediately and hands back a receiver.
/// `ui_notify` is called after the outcome has been sent so an event loop
/// knows to poll again.
pub trait ProfileApi {
    /// Reads the locally cached user, no network call is made
    fn get_current_user(&self) -> Option<User>;

    fn get_profile_summary<F: UiCallBack>(&self, ui_notify: F) -> ResponseReceiver<ProfileSummary>;

    fn get_wallet_balance<F: UiCallBack>(&self, ui_notify: F) -> ResponseReceiver<WalletBalance>;

    fn get_my_courses<F: UiCallBack>(&self, ui_notify: F) -> ResponseReceiver<Vec<CourseSummary>>;

    /// On success the returned user is the server's authoritative record and
    /// has already replaced the cached user
    fn update_me<F: UiCallBack>(&self, args: &UpdateMeReqArgs, ui_notify: F)
        -> ResponseReceiver<User>;

    fn change_password<F: UiCallBack>(
        &self,
        args: &ChangePasswordReqArgs,
        ui_notify: F,
    ) -> ResponseReceiver<()>;

    /// Clears the persisted session synchronously
    fn logout(&self);
}
