use futures::channel::oneshot;
use learnexia_shared::{
    const_config::path::{
        PATH_API_CHANGE_PASSWORD, PATH_API_MY_COURSES, PATH_API_PROFILE_SUMMARY,
        PATH_API_UPDATE_ME, PATH_API_WALLET_BALANCE,
    },
    log_err_as_warn,
    profile::{CourseSummary, ProfileSummary, WalletBalance},
    req_args::api::{ChangePasswordReqArgs, UpdateMeReqArgs},
    uac::User,
};
use secrecy::ExposeSecret as _;

use super::{process_update_me, send_outcome, NO_ARGS};
use crate::{client::UiCallBack, Client, ProfileApi, ResponseReceiver};

impl ProfileApi for Client {
    fn get_current_user(&self) -> Option<User> {
        self.session_store.cached_user()
    }

    #[tracing::instrument(skip(ui_notify))]
    fn get_profile_summary<F: UiCallBack>(&self, ui_notify: F) -> ResponseReceiver<ProfileSummary> {
        self.send_request_expect_json(PATH_API_PROFILE_SUMMARY, &NO_ARGS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    fn get_wallet_balance<F: UiCallBack>(&self, ui_notify: F) -> ResponseReceiver<WalletBalance> {
        self.send_request_expect_json(PATH_API_WALLET_BALANCE, &NO_ARGS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    fn get_my_courses<F: UiCallBack>(&self, ui_notify: F) -> ResponseReceiver<Vec<CourseSummary>> {
        self.send_request_expect_json(PATH_API_MY_COURSES, &NO_ARGS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    fn update_me<F: UiCallBack>(
        &self,
        args: &UpdateMeReqArgs,
        ui_notify: F,
    ) -> ResponseReceiver<User> {
        let (tx, rx) = oneshot::channel();
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_update_me(resp, client).await;
            send_outcome(tx, msg);
            ui_notify();
        };
        self.initiate_request(PATH_API_UPDATE_ME, args, on_done);
        rx
    }

    #[tracing::instrument(skip(ui_notify))]
    fn change_password<F: UiCallBack>(
        &self,
        args: &ChangePasswordReqArgs,
        ui_notify: F,
    ) -> ResponseReceiver<()> {
        let body = change_password_body(args);
        self.send_request_expect_empty(PATH_API_CHANGE_PASSWORD, &body, ui_notify)
    }

    #[tracing::instrument]
    fn logout(&self) {
        log_err_as_warn!(self.session_store.clear());
    }
}

/// The server only takes the current and the new password, the confirmation
/// never leaves the client
fn change_password_body(args: &ChangePasswordReqArgs) -> serde_json::Value {
    serde_json::json!({
        "oldPassword": args.current_password.expose_secret(),
        "newPassword": args.new_password.expose_secret(),
    })
}
