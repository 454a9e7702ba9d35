//! Drives the page state machines from the command line

use std::{
    io::{BufRead, Write as _},
    sync::Arc,
};

use anyhow::{bail, Context as _};
use learnexia_client_core::{Client, FileSessionStore, SessionStore};
use learnexia_shared::{log_err_as_error, req_args::LoginReqArgs};
use secrecy::SecretString;
use tracing::info;
use web_time::Instant;

use crate::{
    cli::Command, configuration::Configuration, pages::data_state::AwaitingType, Navigator,
    ProfileData, ProfilePage, Route, Shell,
};

/// Prints where a browser would have gone
#[derive(Debug, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate_to(&mut self, path: &str) {
        info!(path, "navigate");
        if path == Route::Login.path() {
            println!("Please log in first (learnexia login <email>)");
        }
    }
}

fn no_cb() {}

#[tracing::instrument(skip(config))]
pub async fn run(command: Command, config: Configuration) -> anyhow::Result<()> {
    let store = Arc::new(FileSessionStore::new(config.storage.session_dir.clone()));
    let client = Client::new(config.server.base_url.clone(), store.clone());
    let mut navigator = ConsoleNavigator;
    match command {
        Command::Login { email } => {
            let password = prompt_secret("Password")?;
            let rx = client.login(LoginReqArgs::new(email, password), no_cb);
            let user = AwaitingType(rx).outcome().await.context("login failed")?;
            println!("Logged in as {}", user.display_label());
        }
        Command::Profile => {
            let page = mount_profile(store.as_ref(), &mut navigator, &client).await?;
            print!("{}", render_profile(&page));
        }
        Command::Rename { name } => {
            let mut page = mount_profile(store.as_ref(), &mut navigator, &client).await?;
            page.start_editing()?;
            page.set_name(name);
            page.save(&client, no_cb)?;
            page.settle_save().await;
            if let Some(msg) = page.edit().error_message() {
                bail!("{msg}");
            }
            if let Some(data) = page.data() {
                println!("Name is now {}", data.details_name());
            }
        }
        Command::ChangePassword => {
            let mut page = mount_profile(store.as_ref(), &mut navigator, &client).await?;
            page.toggle_password_dialog();
            let dialog = page.password_mut();
            dialog.set_current_password(prompt_secret("Current password")?);
            dialog.set_new_password(prompt_secret("New password")?);
            dialog.set_confirmation_password(prompt_secret("Confirm new password")?);
            dialog.submit(&client, no_cb)?;
            dialog.settle().await;
            if let Some(msg) = dialog.error_message() {
                bail!("{msg}");
            }
            if let Some(msg) = dialog.success_message() {
                println!("{msg}");
            }
            if let Some(closes_at) = dialog.closes_at() {
                tokio::time::sleep(closes_at.saturating_duration_since(Instant::now())).await;
            }
            page.poll(Instant::now());
            debug_assert!(!page.password().is_open());
        }
        Command::Logout => {
            Shell::default().logout(&client, &mut navigator);
            println!("Logged out");
        }
    }
    Ok(())
}

async fn mount_profile(
    store: &dyn SessionStore,
    navigator: &mut ConsoleNavigator,
    client: &Client,
) -> anyhow::Result<ProfilePage> {
    match ProfilePage::mount(store, navigator, client, no_cb).await {
        Some(page) => Ok(page),
        None => bail!("no valid session"),
    }
}

/// Reads one line from stdin, the prompt goes to stderr
fn prompt_secret(label: &str) -> anyhow::Result<SecretString> {
    eprint!("{label}: ");
    std::io::stderr().flush().context("failed to flush stderr")?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(SecretString::from(
        line.trim_end_matches(['\r', '\n']).to_string(),
    ))
}

pub fn render_profile(page: &ProfilePage) -> String {
    let Some(data) = page.data() else {
        return format!("{}\n", page.error_banner().unwrap_or("Loading..."));
    };
    let mut result = String::new();
    log_err_as_error!(write_profile(&mut result, data));
    result
}

fn write_profile(out: &mut impl std::fmt::Write, data: &ProfileData) -> std::fmt::Result {
    let user = &data.user;
    let initial = user.avatar_initial().map(String::from).unwrap_or_default();
    writeln!(out, "[{initial}] {}", data.header_name())?;
    writeln!(out, "Enrolled Courses: {}", data.courses.len())?;
    for course in &data.courses {
        writeln!(out, "  - {} ({})", course.title, course.id)?;
    }
    if data.courses.is_empty() {
        writeln!(out, "  No courses found.")?;
    }
    writeln!(out, "Wallet Balance: {}", data.formatted_balance())?;
    writeln!(out, "Watch Time: {}", data.summary.total_watch_time)?;
    writeln!(out, "Completed Lectures: {}", data.summary.completed_lectures)?;
    writeln!(out, "Full Name: {}", data.details_name())?;
    writeln!(out, "Email Address: {}", user.email)?;
    writeln!(out, "Account Type: {}", user.role)?;
    writeln!(out, "Member ID: {}", user.id)
}
