//! Routes and the shell that wraps every protected page

use learnexia_client_core::{ProfileApi, SessionStore};
use learnexia_shared::{
    const_config::client::CLIENT_LOGIN_ROUTE,
    profile::CourseId,
    uac::{GuardError, Role, User},
};
use strum::{EnumIter, IntoEnumIterator as _};
use tracing::info;

use crate::ensure_session;

/// Side effect of changing the current location
pub trait Navigator {
    fn navigate_to(&mut self, path: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    Courses,
    MyLearning,
    Wallet,
    Profile,
    Learn(CourseId),
}

/// Entries of the side bar, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, strum::Display)]
pub enum NavItem {
    Home,
    Courses,
    #[strum(to_string = "My Learning")]
    MyLearning,
    Wallet,
    Profile,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => CLIENT_LOGIN_ROUTE.to_string(),
            Route::Home => "/home".to_string(),
            Route::Courses => "/courses".to_string(),
            Route::MyLearning => "/my-courses".to_string(),
            Route::Wallet => "/wallet".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Learn(course_id) => format!("/learn/{course_id}"),
        }
    }

    /// Returns `None` for paths the client does not know
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        Some(match path {
            CLIENT_LOGIN_ROUTE => Route::Login,
            "/home" => Route::Home,
            "/courses" => Route::Courses,
            "/my-courses" => Route::MyLearning,
            "/wallet" => Route::Wallet,
            "/profile" => Route::Profile,
            other => {
                let course_id = other.strip_prefix("/learn/")?;
                if course_id.is_empty() || course_id.contains('/') {
                    return None;
                }
                Route::Learn(course_id.into())
            }
        })
    }

    /// `None` means the route is public
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::Login => None,
            Route::Home
            | Route::Courses
            | Route::MyLearning
            | Route::Wallet
            | Route::Profile
            | Route::Learn(_) => Some(Role::User),
        }
    }
}

impl NavItem {
    pub fn route(self) -> Route {
        match self {
            NavItem::Home => Route::Home,
            NavItem::Courses => Route::Courses,
            NavItem::MyLearning => Route::MyLearning,
            NavItem::Wallet => Route::Wallet,
            NavItem::Profile => Route::Profile,
        }
    }

    pub fn all() -> impl Iterator<Item = NavItem> {
        Self::iter()
    }
}

/// Layout around the protected pages
///
/// The guard runs again on every route change so a session cleared in another
/// window is caught on the next navigation.
#[derive(Debug, Default)]
pub struct Shell {
    current: Option<Route>,
    user: Option<User>,
}

impl Shell {
    /// The user shown in the header, only set while on a protected route
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn current(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    #[tracing::instrument(skip(store, navigator))]
    pub fn navigate<S, N>(
        &mut self,
        route: Route,
        store: &S,
        navigator: &mut N,
    ) -> Result<(), GuardError>
    where
        S: SessionStore + ?Sized,
        N: Navigator + ?Sized,
    {
        let Some(required) = route.required_role() else {
            self.user = None;
            navigator.navigate_to(&route.path());
            self.current = Some(route);
            return Ok(());
        };
        match ensure_session(store, navigator, required) {
            Ok(user) => {
                self.user = Some(user);
                navigator.navigate_to(&route.path());
                self.current = Some(route);
                Ok(())
            }
            Err(e) => {
                self.user = None;
                self.current = Some(Route::Login);
                Err(e)
            }
        }
    }

    #[tracing::instrument(skip(api, navigator))]
    pub fn logout<A, N>(&mut self, api: &A, navigator: &mut N)
    where
        A: ProfileApi,
        N: Navigator + ?Sized,
    {
        info!("logout requested");
        api.logout();
        self.user = None;
        self.current = Some(Route::Login);
        navigator.navigate_to(CLIENT_LOGIN_ROUTE);
    }
}
