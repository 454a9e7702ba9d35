//! Gate that runs before any protected page is shown

use learnexia_client_core::SessionStore;
use learnexia_shared::{
    const_config::client::CLIENT_LOGIN_ROUTE,
    log_err_as_error,
    uac::{GuardError, Role, User},
};
use tracing::info;

use crate::Navigator;

/// Implemented by pages that may only be shown to a logged in user
pub trait ProtectedPage {
    /// Role the cached user must have. Fixed per page
    fn required_role() -> Role;
}

/// Returns the cached user if the persisted session may see a page requiring
/// `required`
///
/// On failure the persisted session is cleared and the navigator is sent to
/// the login route. No network call is made in either case so an expired
/// token is only noticed when a later request is rejected.
#[tracing::instrument(skip(store, navigator))]
pub fn ensure_session<S, N>(store: &S, navigator: &mut N, required: Role) -> Result<User, GuardError>
where
    S: SessionStore + ?Sized,
    N: Navigator + ?Sized,
{
    let session = store.load();
    match session.authenticated_user(required) {
        Ok(user) => Ok(user.clone()),
        Err(reason) => {
            info!(%reason, "session not valid, redirecting to login");
            log_err_as_error!(store.clear());
            navigator.navigate_to(CLIENT_LOGIN_ROUTE);
            Err(reason)
        }
    }
}
