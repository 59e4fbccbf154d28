//! Access to BuildConfigs and Builds.
//!
//! [`BuildClient`] is the only thing the build check needs from a cluster. It is
//! implemented by [`OcClient`], which shells out to the `oc` CLI, and by
//! [`KubeClient`], which talks to the API server directly.

pub mod command;
pub mod kube_client;
pub mod oc;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::v1::{Build, BuildConfig};
use crate::util::errors::{Error, Result, StdError};

pub use command::{CommandRunner, ProcessRunner};
pub use kube_client::KubeClient;
pub use oc::OcClient;

#[async_trait]
pub trait BuildClient: Send + Sync {
    async fn get_build_config(&self, namespace: &str, name: &str) -> Result<BuildConfig>;

    async fn get_build(&self, namespace: &str, name: &str) -> Result<Build>;

    /// Start a new build of `buildconfig` and return the output describing it.
    async fn start_build(&self, namespace: &str, buildconfig: &str) -> Result<String>;
}

/// Await `fut`, failing with `CommandTimeout` when a timeout is set and exceeded.
pub(crate) async fn bounded<F, T>(timeout: Option<Duration>, command: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout {
        Some(timeout) => tokio::time::timeout(timeout, fut).await.map_err(|_| {
            Error::StdError(StdError::CommandTimeout {
                command: command.to_string(),
                timeout,
            })
        })?,
        None => fut.await,
    }
}
