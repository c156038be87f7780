//! Candidate clone sources for a source-control UI: the user's own GitHub
//! repositories, merged with repository search results.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod provider;
pub mod remote;
pub mod source;

pub use client::{GithubClient, RepoClient};
pub use credentials::{CredentialStore, GitHub, SessionProvider};
pub use error::{Error, Result};
pub use provider::{GithubRemoteSourceProvider, RemoteSourceProvider};
pub use remote::{Protocol, ProtocolKind, RemoteDescriptor};
pub use source::{RawRepo, RemoteSource};
