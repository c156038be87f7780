use crate::client::{GithubClient, RepoClient};
use crate::config;
use crate::error::{Error, Result};
use crate::remote::RemoteDescriptor;
use async_trait::async_trait;
use rustyline::{error::ReadlineError, Editor};
use std::{collections::HashMap, env, fmt, sync::Arc, time::Duration};
use tokio::sync::RwLock;
use tracing::{debug, info};

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// An authenticated GitHub session.
#[derive(Clone)]
pub struct GitHub {
    client: Arc<dyn RepoClient>,
}

impl GitHub {
    pub fn new(client: Arc<dyn RepoClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &dyn RepoClient {
        self.client.as_ref()
    }
}

impl fmt::Debug for GitHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHub").finish_non_exhaustive()
    }
}

/// Hands out sessions for a remote, logging the user in when needed.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn has_session(&self, remote: &RemoteDescriptor) -> bool;
    async fn get_session(&self, remote: &RemoteDescriptor) -> Result<GitHub>;
    /// Interactive login; `None` when the user declines.
    async fn login_with_confirmation(&self, remote: &RemoteDescriptor) -> Result<Option<GitHub>>;
    /// Non-interactive login; `None` when no credentials are available.
    async fn login(&self, remote: &RemoteDescriptor) -> Result<Option<GitHub>>;
}

/// User interaction needed by the interactive login.
pub trait Prompter: Send + Sync {
    fn confirm(&self, message: &str) -> Result<bool>;
    fn read_token(&self, message: &str) -> Result<String>;
}

/// Prompts on the controlling terminal.
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn readline(prompt: &str) -> Result<Option<String>> {
        let mut editor = Editor::<()>::new();
        match editor.readline(prompt) {
            Ok(line) => Ok(Some(line.trim().to_string())),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(Error::Prompt(e.to_string())),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> Result<bool> {
        let answer = Self::readline(&format!("{} [y/N] ", message))?;
        Ok(matches!(
            answer.as_deref().map(str::to_lowercase).as_deref(),
            Some("y") | Some("yes")
        ))
    }

    fn read_token(&self, message: &str) -> Result<String> {
        Ok(Self::readline(&format!("{}: ", message))?.unwrap_or_default())
    }
}

/// Gives the same answers every time, for non-interactive runs.
#[derive(Debug, Clone, Default)]
pub struct FixedPrompter {
    pub confirm: bool,
    pub token: String,
}

impl FixedPrompter {
    pub fn decline() -> Self {
        Self::default()
    }
}

impl Prompter for FixedPrompter {
    fn confirm(&self, _message: &str) -> Result<bool> {
        Ok(self.confirm)
    }

    fn read_token(&self, _message: &str) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// In-memory session store, one session per host.
pub struct CredentialStore {
    opts: config::Github,
    timeout: Duration,
    token_env: String,
    prompter: Arc<dyn Prompter>,
    sessions: RwLock<HashMap<String, GitHub>>,
}

impl CredentialStore {
    pub fn new(opts: config::Github, timeout: Duration, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            opts,
            timeout,
            token_env: TOKEN_ENV.to_string(),
            prompter,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Reads the fallback token from `name` instead of `GITHUB_TOKEN`.
    pub fn with_token_env(mut self, name: &str) -> Self {
        self.token_env = name.to_string();
        self
    }

    async fn create_session(&self, remote: &RemoteDescriptor, token: &str) -> Result<GitHub> {
        let client = GithubClient::new(&self.opts, token, self.timeout)?;
        let hub = GitHub::new(Arc::new(client));

        let mut sessions = self.sessions.write().await;
        sessions.insert(remote.host().to_string(), hub.clone());
        info!("signed in to '{}'", remote.host());
        Ok(hub)
    }

    async fn prompt<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn Prompter) -> Result<T> + Send + 'static,
    {
        let prompter = self.prompter.clone();
        tokio::task::spawn_blocking(move || f(prompter.as_ref()))
            .await
            .map_err(|e| Error::Prompt(e.to_string()))?
    }
}

#[async_trait]
impl SessionProvider for CredentialStore {
    async fn has_session(&self, remote: &RemoteDescriptor) -> bool {
        self.sessions.read().await.contains_key(remote.host())
    }

    async fn get_session(&self, remote: &RemoteDescriptor) -> Result<GitHub> {
        self.sessions
            .read()
            .await
            .get(remote.host())
            .cloned()
            .ok_or_else(|| Error::NoSession {
                host: remote.host().to_string(),
            })
    }

    async fn login_with_confirmation(&self, remote: &RemoteDescriptor) -> Result<Option<GitHub>> {
        let target = match remote.protocol.nwo() {
            nwo if nwo.is_empty() => remote.url.clone(),
            nwo => nwo,
        };
        let message = format!("Sign in to GitHub to access {}?", target);
        if !self.prompt(move |p| p.confirm(&message)).await? {
            debug!("sign in to '{}' declined", remote.host());
            return Ok(None);
        }

        let token = self
            .prompt(|p| p.read_token("GitHub personal access token"))
            .await?;
        if token.is_empty() {
            return Ok(None);
        }
        self.create_session(remote, &token).await.map(Some)
    }

    async fn login(&self, remote: &RemoteDescriptor) -> Result<Option<GitHub>> {
        let token = self
            .opts
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| env::var(&self.token_env).ok().filter(|t| !t.is_empty()));

        match token {
            Some(token) => self.create_session(remote, &token).await.map(Some),
            None => {
                debug!("no token configured and ${} is unset", self.token_env);
                Ok(None)
            }
        }
    }
}
