use std::sync::Mutex;

use anyhow::anyhow;
use futures::channel::oneshot;
use learnexia_client_core::{ProfileApi, ResponseReceiver, UiCallBack};
use learnexia_shared::{
    profile::{CourseSummary, ProfileSummary, WalletBalance},
    req_args::api::{ChangePasswordReqArgs, UpdateMeReqArgs},
    uac::{Role, User},
};

use crate::Navigator;

pub fn no_cb() {}

pub fn sample_user(role: Role) -> User {
    User {
        id: "65f0c0ffee".into(),
        name: Some("Asha".try_into().unwrap()),
        email: "asha@example.com".into(),
        role,
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub visited: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&mut self, path: &str) {
        self.visited.push(path.to_string());
    }
}

/// A response that is only sent when the test releases it
struct Held<T> {
    tx: oneshot::Sender<anyhow::Result<T>>,
    ui_notify: Box<dyn FnOnce() + Send>,
}

impl<T> Held<T> {
    fn new<F: UiCallBack>(ui_notify: F) -> (Self, ResponseReceiver<T>) {
        let (tx, rx) = oneshot::channel();
        let held = Self {
            tx,
            ui_notify: Box::new(ui_notify),
        };
        (held, rx)
    }

    fn release(self, outcome: Result<T, String>) {
        let _ = self.tx.send(outcome.map_err(|e| anyhow!(e)));
        (self.ui_notify)();
    }
}

impl<T> std::fmt::Debug for Held<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Held").finish_non_exhaustive()
    }
}

/// Backend stand in with canned replies. Every reply is sent before the
/// receiver is returned unless it is held
#[derive(Debug)]
pub struct FakeApi {
    pub summary: Result<ProfileSummary, String>,
    pub balance: Result<WalletBalance, String>,
    pub courses: Result<Vec<CourseSummary>, String>,
    /// `None` echoes the requested name back on the cached user
    pub update_me: Option<Result<User, String>>,
    pub change_password: Result<(), String>,
    pub hold_change_password: bool,
    pub hold_update_me: bool,
    current_user: Mutex<Option<User>>,
    calls: Mutex<Vec<&'static str>>,
    held_change_password: Mutex<Vec<Held<()>>>,
    held_update_me: Mutex<Vec<Held<User>>>,
    last_update_name: Mutex<Option<String>>,
}

impl FakeApi {
    pub fn new(current_user: Option<User>) -> Self {
        Self {
            summary: Ok(ProfileSummary::default()),
            balance: Ok(WalletBalance::default()),
            courses: Ok(Vec::new()),
            update_me: None,
            change_password: Ok(()),
            hold_change_password: false,
            hold_update_me: false,
            current_user: Mutex::new(current_user),
            calls: Default::default(),
            held_change_password: Default::default(),
            held_update_me: Default::default(),
            last_update_name: Default::default(),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|x| **x == call).count()
    }

    pub fn last_update_name(&self) -> Option<String> {
        self.last_update_name.lock().unwrap().clone()
    }

    /// Answers every held change password request
    pub fn release_change_password(&self, outcome: Result<(), String>) {
        for held in self.held_change_password.lock().unwrap().drain(..) {
            held.release(outcome.clone());
        }
    }

    /// Answers every held profile update
    pub fn release_update_me(&self, outcome: Result<User, String>) {
        for held in self.held_update_me.lock().unwrap().drain(..) {
            held.release(outcome.clone());
        }
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

fn reply<T, F: UiCallBack>(value: Result<T, String>, ui_notify: F) -> ResponseReceiver<T> {
    let (tx, rx) = oneshot::channel();
    let _ = tx.send(value.map_err(|e| anyhow!(e)));
    ui_notify();
    rx
}

impl ProfileApi for FakeApi {
    fn get_current_user(&self) -> Option<User> {
        self.record("get_current_user");
        self.current_user.lock().unwrap().clone()
    }

    fn get_profile_summary<F: UiCallBack>(&self, ui_notify: F) -> ResponseReceiver<ProfileSummary> {
        self.record("get_profile_summary");
        reply(self.summary.clone(), ui_notify)
    }

    fn get_wallet_balance<F: UiCallBack>(&self, ui_notify: F) -> ResponseReceiver<WalletBalance> {
        self.record("get_wallet_balance");
        reply(self.balance.clone(), ui_notify)
    }

    fn get_my_courses<F: UiCallBack>(&self, ui_notify: F) -> ResponseReceiver<Vec<CourseSummary>> {
        self.record("get_my_courses");
        reply(self.courses.clone(), ui_notify)
    }

    fn update_me<F: UiCallBack>(
        &self,
        args: &UpdateMeReqArgs,
        ui_notify: F,
    ) -> ResponseReceiver<User> {
        self.record("update_me");
        *self.last_update_name.lock().unwrap() = Some(args.name.to_string());
        if self.hold_update_me {
            let (held, rx) = Held::new(ui_notify);
            self.held_update_me.lock().unwrap().push(held);
            return rx;
        }
        let outcome = match &self.update_me {
            Some(canned) => canned.clone(),
            None => self
                .current_user
                .lock()
                .unwrap()
                .clone()
                .map(|mut user| {
                    user.name = Some(args.name.clone());
                    user
                })
                .ok_or_else(|| "no user".to_string()),
        };
        if let Ok(user) = &outcome {
            *self.current_user.lock().unwrap() = Some(user.clone());
        }
        reply(outcome, ui_notify)
    }

    fn change_password<F: UiCallBack>(
        &self,
        _args: &ChangePasswordReqArgs,
        ui_notify: F,
    ) -> ResponseReceiver<()> {
        self.record("change_password");
        if self.hold_change_password {
            let (held, rx) = Held::new(ui_notify);
            self.held_change_password.lock().unwrap().push(held);
            return rx;
        }
        reply(self.change_password.clone(), ui_notify)
    }

    fn logout(&self) {
        self.record("logout");
        *self.current_user.lock().unwrap() = None;
    }
}
