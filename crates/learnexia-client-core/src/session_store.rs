use anyhow::Context as _;
use learnexia_shared::{
    const_config::client::{CLIENT_STORAGE_KEY_TOKEN, CLIENT_STORAGE_KEY_USER},
    session::Session,
    token::AuthToken,
    uac::User,
};
use std::{
    fmt::Debug,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{info, warn};

/// Client local persistence of the session token and the cached user
///
/// Passed explicitly to whatever needs the session so that tests can supply
/// their own.
pub trait SessionStore: Debug + Send + Sync {
    /// Reads whatever is currently persisted. Unreadable entries are treated
    /// as absent
    fn load(&self) -> Session;

    /// Persists a freshly created session (login)
    fn store(&self, token: &AuthToken, user: &User) -> anyhow::Result<()>;

    /// Overwrites the cached user, leaving the token as is
    fn set_cached_user(&self, user: &User) -> anyhow::Result<()>;

    /// Removes the token and the cached user
    fn clear(&self) -> anyhow::Result<()>;

    fn token(&self) -> Option<AuthToken> {
        self.load().token
    }

    fn cached_user(&self) -> Option<User> {
        self.load().cached_user
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Session>,
}

impl MemorySessionStore {
    pub fn new(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Session {
        self.session.lock().expect("mutex poisoned").clone()
    }

    fn store(&self, token: &AuthToken, user: &User) -> anyhow::Result<()> {
        *self.session.lock().expect("mutex poisoned") = Session::new(token.clone(), user.clone());
        Ok(())
    }

    fn set_cached_user(&self, user: &User) -> anyhow::Result<()> {
        self.session.lock().expect("mutex poisoned").cached_user = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.session.lock().expect("mutex poisoned") = Session::default();
        Ok(())
    }
}

/// Keeps each storage key as a file inside a folder
///
/// The token is stored as plain text and the user as JSON
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    folder: PathBuf,
}

impl FileSessionStore {
    pub fn new<P: Into<PathBuf>>(folder: P) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.folder.join(key)
    }

    /// Returns `None` if the key has never been written
    fn read_key(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {path:?}")),
        }
    }

    fn write_key(&self, key: &str, content: &str) -> anyhow::Result<()> {
        fs::create_dir_all(&self.folder)
            .with_context(|| format!("failed to create session folder {:?}", self.folder))?;
        let path = self.key_path(key);
        fs::write(&path, content).with_context(|| format!("failed to write {path:?}"))
    }

    fn remove_key(&self, key: &str) -> anyhow::Result<()> {
        let path = self.key_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {path:?}")),
        }
    }

    fn load_token(&self) -> anyhow::Result<Option<AuthToken>> {
        Ok(self
            .read_key(CLIENT_STORAGE_KEY_TOKEN)?
            .map(|x| AuthToken::from(x.trim().to_string())))
    }

    fn load_user(&self) -> anyhow::Result<Option<User>> {
        let Some(content) = self.read_key(CLIENT_STORAGE_KEY_USER)? else {
            return Ok(None);
        };
        let user = serde_json::from_str(&content).context("cached user is not valid json")?;
        Ok(Some(user))
    }
}

impl SessionStore for FileSessionStore {
    #[tracing::instrument]
    fn load(&self) -> Session {
        let token = self.load_token().unwrap_or_else(|e| {
            warn!(?e, "unable to load session token");
            None
        });
        let cached_user = self.load_user().unwrap_or_else(|e| {
            warn!(?e, "unable to load cached user");
            None
        });
        Session { token, cached_user }
    }

    #[tracing::instrument(skip(token))]
    fn store(&self, token: &AuthToken, user: &User) -> anyhow::Result<()> {
        self.write_key(CLIENT_STORAGE_KEY_TOKEN, token.expose())?;
        self.set_cached_user(user)
    }

    #[tracing::instrument]
    fn set_cached_user(&self, user: &User) -> anyhow::Result<()> {
        let content = serde_json::to_string(user).context("failed to serialize user")?;
        self.write_key(CLIENT_STORAGE_KEY_USER, &content)
    }

    #[tracing::instrument]
    fn clear(&self) -> anyhow::Result<()> {
        info!("clearing persisted session");
        // Attempt both even if the first fails
        let token_result = self.remove_key(CLIENT_STORAGE_KEY_TOKEN);
        let user_result = self.remove_key(CLIENT_STORAGE_KEY_USER);
        token_result.and(user_result)
    }
}
