//! # Session and Role Store
//!
//! The signed-in state of one person: the backend bearer token, a snapshot
//! of their user record, and the email of a guest registration waiting to be
//! linked after sign-up.
//!
//! A [`Session`] is an explicit value passed to every call that needs it.
//! [`SessionStore`] persists it between runs under three fixed keys:
//! `jwt_token`, `user_data` and `pendingDriverEmail`. Writes replace the whole
//! document; the last write wins.
//!
//! The cached user is for display only. Access decisions always come from a
//! fresh profile fetch (see [`crate::auth::AuthClient::gate`]).

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use d24_core::{Role, User};

use crate::error::ClientError;

/// Where the presentation layer should send the person next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// No identity: sign in first.
    SignIn,
    /// Signed in without a role.
    SelectRole,
    /// Signed in with a role that does not match the requested screen.
    Home,
    /// The dashboard of the given role.
    Dashboard(Role),
}

impl Route {
    /// The web path of this route.
    pub fn path(&self) -> &'static str {
        match self {
            Self::SignIn => "/sign-in",
            Self::SelectRole => "/select-role",
            Self::Home => "/",
            Self::Dashboard(role) => role.dashboard_path(),
        }
    }

    /// Route for a freshly fetched profile. Without a role the person must
    /// select one first.
    pub fn for_profile(user: Option<&User>) -> Self {
        match user.and_then(|u| u.role) {
            Some(role) => Self::Dashboard(role),
            None => Self::SelectRole,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Check that a freshly fetched profile may open the `required` dashboard.
///
/// # Errors
///
/// Returns the redirect: [`Route::SelectRole`] without a profile or role,
/// [`Route::Home`] for any other role.
pub fn require_role(required: Role, user: Option<&User>) -> Result<&User, Route> {
    let user = user.ok_or(Route::SelectRole)?;
    match user.role {
        None => Err(Route::SelectRole),
        Some(role) if role == required => Ok(user),
        Some(_) => Err(Route::Home),
    }
}

/// Signed-in state.
///
/// Custom `Debug` implementation redacts the token.
#[derive(Clone, Default)]
pub struct Session {
    token: Option<Zeroizing<String>>,
    user: Option<User>,
    pending_driver_email: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user.as_ref().map(|u| &u.email))
            .field("pending_driver_email", &self.pending_driver_email)
            .finish()
    }
}

impl Session {
    /// An empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the token and user returned by a successful sign-in step.
    pub fn sign_in(&mut self, token: impl Into<String>, user: User) {
        self.token = Some(Zeroizing::new(token.into()));
        self.user = Some(user);
    }

    /// Whether a bearer token is held.
    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer token for authenticated calls.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NoSession`] when no token is held, so no
    /// request is sent.
    pub fn bearer(&self) -> Result<&str, ClientError> {
        self.token
            .as_deref()
            .map(String::as_str)
            .ok_or(ClientError::NoSession)
    }

    /// The cached user snapshot.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Replace the cached user snapshot.
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// The cached role, for display only.
    pub fn display_role(&self) -> Option<Role> {
        self.user.as_ref().and_then(|u| u.role)
    }

    /// The cached home city, if any.
    pub fn city(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.city.as_deref())
    }

    /// Email of a guest registration awaiting sign-up.
    pub fn pending_driver_email(&self) -> Option<&str> {
        self.pending_driver_email.as_deref()
    }

    /// Remember a guest registration's email for the auth callback.
    pub fn set_pending_driver_email(&mut self, email: impl Into<String>) {
        self.pending_driver_email = Some(email.into());
    }

    /// Forget the pending guest registration.
    pub fn clear_pending_driver_email(&mut self) {
        self.pending_driver_email = None;
    }

    /// Drop the token and user. A pending guest registration survives
    /// sign-out.
    pub fn sign_out(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// On-disk shape of a session. Field names are the fixed storage keys.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    jwt_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_data: Option<User>,
    #[serde(
        rename = "pendingDriverEmail",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pending_driver_email: Option<String>,
}

impl From<&Session> for StoredSession {
    fn from(s: &Session) -> Self {
        Self {
            jwt_token: s.token.as_ref().map(|t| t.as_str().to_string()),
            user_data: s.user.clone(),
            pending_driver_email: s.pending_driver_email.clone(),
        }
    }
}

impl From<StoredSession> for Session {
    fn from(s: StoredSession) -> Self {
        Self {
            token: s.jwt_token.map(Zeroizing::new),
            user: s.user_data,
            pending_driver_email: s.pending_driver_email,
        }
    }
}

/// Session store errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading or writing the session file failed.
    #[error("session file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The session file is not valid JSON of the expected shape.
    #[error("session file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Persistence for a [`Session`].
pub trait SessionStore: Send + Sync {
    /// Load the stored session, or an empty one if nothing is stored.
    fn load(&self) -> Result<Session, SessionError>;

    /// Replace the stored session.
    fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Sign out: drop the token and user, keeping a pending registration.
    fn clear(&self) -> Result<(), SessionError> {
        let mut session = self.load()?;
        session.sign_out();
        self.save(&session)
    }
}

/// In-process store, for tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Session>,
}

impl MemorySessionStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Session, SessionError> {
        Ok(self.inner.lock().clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.inner.lock() = session.clone();
        Ok(())
    }
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// A store backed by `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `D24_SESSION_FILE`, else `$HOME/.d24/session.json`,
    /// else `.d24-session.json` in the working directory.
    pub fn default_path() -> PathBuf {
        if let Ok(p) = std::env::var("D24_SESSION_FILE") {
            if !p.trim().is_empty() {
                return PathBuf::from(p);
            }
        }
        match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(".d24").join("session.json"),
            None => PathBuf::from(".d24-session.json"),
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Session::new()),
            Err(e) => return Err(self.io_err(e)),
        };
        if raw.trim().is_empty() {
            return Ok(Session::new());
        }
        let stored: StoredSession = serde_json::from_str(&raw).map_err(|source| SessionError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(stored.into())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| self.io_err(e))?;
        }
        let body = serde_json::to_string_pretty(&StoredSession::from(session)).map_err(|source| {
            SessionError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, body).map_err(|e| self.io_err(e))?;
        restrict_permissions(&self.path).map_err(|e| self.io_err(e))?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }
}

// The file holds a bearer token.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
