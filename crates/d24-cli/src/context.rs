//! Shared state for one `d24` invocation: the client, the session store and
//! the loaded session.

use std::path::PathBuf;

use anyhow::{Context, Result};

use d24_client::{ApiConfig, D24Client, FileSessionStore, Session, SessionStore};
use d24_core::Role;

/// Global options that shape the context.
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    /// Backend base URL; overrides `D24_API_URL`.
    pub api_url: Option<String>,
    /// Session file; overrides `D24_SESSION_FILE`.
    pub session_file: Option<PathBuf>,
}

/// Client, store and session for the running command.
#[derive(Debug)]
pub struct CliContext {
    /// Backend client.
    pub client: D24Client,
    /// Where the session is persisted.
    pub store: FileSessionStore,
    /// The session loaded at start-up.
    pub session: Session,
}

impl CliContext {
    /// Build the client and load the session.
    pub fn load(opts: &ContextOptions) -> Result<Self> {
        let config = match &opts.api_url {
            Some(url) => {
                let timeout = ApiConfig::from_env()
                    .map(|c| c.timeout_secs)
                    .context("invalid D24_TIMEOUT_SECS")?;
                ApiConfig::new(url)
                    .context("invalid --api-url")?
                    .with_timeout(timeout)
            }
            None => ApiConfig::from_env().context("invalid API configuration")?,
        };
        let client = D24Client::new(config)?;

        let path = opts
            .session_file
            .clone()
            .unwrap_or_else(FileSessionStore::default_path);
        let store = FileSessionStore::new(path);
        let session = store.load()?;
        tracing::debug!(path = %store.path().display(), signed_in = session.is_signed_in(), "session loaded");

        Ok(Self {
            client,
            store,
            session,
        })
    }

    /// Write the session back. Last write wins.
    pub fn persist(&self) -> Result<()> {
        self.store
            .save(&self.session)
            .with_context(|| format!("failed to save session to {}", self.store.path().display()))
    }

    /// The account's role as the backend sees it now.
    ///
    /// The cached role is never trusted for permission checks; the profile
    /// is fetched again using the cached identity-provider id.
    pub async fn fresh_role(&mut self) -> Result<Role> {
        let clerk_id = self
            .session
            .user()
            .and_then(|u| u.clerk_id.clone())
            .context("no signed-in account; run `d24 login` first")?;
        let profile = self.client.auth().profile(&clerk_id).await?.data;
        let role = profile.user.role.context("account has no role; run `d24 login --role ...`")?;
        self.session.set_user(profile.user);
        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_explicit_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        let ctx = CliContext::load(&ContextOptions {
            api_url: Some("http://127.0.0.1:9".into()),
            session_file: Some(path.clone()),
        })
        .unwrap();
        assert_eq!(ctx.store.path(), path.as_path());
        assert!(!ctx.session.is_signed_in());
        ctx.persist().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn bad_api_url_is_rejected() {
        let err = CliContext::load(&ContextOptions {
            api_url: Some("not a url".into()),
            session_file: None,
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("--api-url"));
    }
}
