use crate::credentials::{GitHub, SessionProvider};
use crate::error::{Error, Result};
use crate::remote::RemoteDescriptor;
use crate::source::{as_remote_sources, RemoteSource};
use async_trait::async_trait;
use std::{collections::HashSet, sync::Arc};
use tokio::{sync::RwLock, time};
use tracing::{debug, info, warn};

/// Capability a host source-control UI queries for clone candidates.
#[async_trait]
pub trait RemoteSourceProvider: Send + Sync {
    fn name(&self) -> &str;
    fn supports_query(&self) -> bool;
    async fn get_remote_sources(&self, query: Option<&str>) -> Result<Vec<RemoteSource>>;
}

/// Offers the user's own GitHub repositories, plus search hits when a
/// query is given.
///
/// The unfiltered listing is remembered so that typing a query keeps the
/// user's repositories on top without listing them again. Search hits
/// sharing a name with one of them are dropped.
pub struct GithubRemoteSourceProvider {
    credential_store: Arc<dyn SessionProvider>,
    remote: RemoteDescriptor,
    user_repos_cache: RwLock<Vec<RemoteSource>>,
}

impl GithubRemoteSourceProvider {
    /// `remote` is the remote sessions are requested for.
    pub fn new(credential_store: Arc<dyn SessionProvider>, remote: RemoteDescriptor) -> Self {
        Self {
            credential_store,
            remote,
            user_repos_cache: RwLock::new(vec![]),
        }
    }

    /// Snapshot of the last unfiltered listing.
    pub async fn cached_user_sources(&self) -> Vec<RemoteSource> {
        self.user_repos_cache.read().await.clone()
    }

    async fn user_remote_sources(
        &self,
        hub: &GitHub,
        query: Option<&str>,
    ) -> Result<Vec<RemoteSource>> {
        if query.is_none() {
            let raw = hub.client().list_my_repositories().await?;
            let sources = as_remote_sources(raw)?;
            *self.user_repos_cache.write().await = sources.clone();
            debug!("cached {} user repos", sources.len());
            return Ok(sources);
        }

        Ok(self.cached_user_sources().await)
    }

    async fn query_remote_sources(
        &self,
        hub: &GitHub,
        query: Option<&str>,
    ) -> Result<Vec<RemoteSource>> {
        match query {
            None => Ok(vec![]),
            Some(q) => as_remote_sources(hub.client().search_repositories(q).await?),
        }
    }

    /// Existing session, then interactive login, then non-interactive login.
    async fn get_hub(&self) -> Result<GitHub> {
        let store = &self.credential_store;
        let remote = &self.remote;

        let hub = async {
            if store.has_session(remote).await {
                return store.get_session(remote).await.map(Some);
            }
            if let Some(hub) = store.login_with_confirmation(remote).await? {
                return Ok(Some(hub));
            }
            store.login(remote).await
        };

        match hub.await {
            Ok(Some(hub)) => Ok(hub),
            Ok(None) => Err(Error::Authentication),
            Err(e) => {
                warn!("failed to sign in to '{}': {}", remote.host(), e);
                Err(Error::Authentication)
            }
        }
    }
}

#[async_trait]
impl RemoteSourceProvider for GithubRemoteSourceProvider {
    fn name(&self) -> &str {
        "GitHub"
    }

    fn supports_query(&self) -> bool {
        true
    }

    async fn get_remote_sources(&self, query: Option<&str>) -> Result<Vec<RemoteSource>> {
        let now = time::Instant::now();
        let hub = self.get_hub().await?;
        let query = query.filter(|q| !q.is_empty());

        let (from_user, from_query) = tokio::try_join!(
            self.user_remote_sources(&hub, query),
            self.query_remote_sources(&hub, query)
        )?;

        let user_repos: HashSet<&str> = from_user.iter().map(|r| r.name.as_str()).collect();
        let novel: Vec<RemoteSource> = from_query
            .into_iter()
            .filter(|r| !user_repos.contains(r.name.as_str()))
            .collect();

        let mut sources = from_user;
        sources.extend(novel);

        info!(
            "[github]: {} remote sources for query {:?}, elapsed: {}",
            sources.len(),
            query,
            humantime::format_duration(now.elapsed())
        );
        Ok(sources)
    }
}
