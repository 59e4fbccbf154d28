use std::time::Duration;

use async_trait::async_trait;
use kube::{
    api::{Api, PostParams},
    client::Client,
    ResourceExt,
};
use serde_json::json;
use tracing::info;

use super::{bounded, BuildClient};
use crate::api::v1::{Build, BuildConfig, API_GROUP};
use crate::util::errors::{Error, Result, StdError};

/// [`BuildClient`] that talks to the API server without the `oc` CLI.
///
/// Builds are started through the `buildconfigs/<name>/instantiate` subresource,
/// which is what `oc start-build` does under the hood.
pub struct KubeClient {
    client: Client,
    timeout: Option<Duration>,
}

impl KubeClient {
    pub fn new(client: Client, timeout: Option<Duration>) -> Self {
        Self { client, timeout }
    }

    /// Client configured from the local kubeconfig or the in-cluster service account.
    pub async fn try_default(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::try_default()
            .await
            .map_err(|e| Error::StdError(StdError::KubeError(e)))?;
        Ok(Self::new(client, timeout))
    }
}

#[async_trait]
impl BuildClient for KubeClient {
    async fn get_build_config(&self, namespace: &str, name: &str) -> Result<BuildConfig> {
        let api: Api<BuildConfig> = Api::namespaced(self.client.clone(), namespace);
        let what = format!("get buildconfig {namespace}/{name}");
        bounded(self.timeout, &what, async {
            api.get(name)
                .await
                .map_err(|e| Error::StdError(StdError::KubeError(e)))
        })
        .await
    }

    async fn get_build(&self, namespace: &str, name: &str) -> Result<Build> {
        let api: Api<Build> = Api::namespaced(self.client.clone(), namespace);
        let what = format!("get build {namespace}/{name}");
        bounded(self.timeout, &what, async {
            api.get(name)
                .await
                .map_err(|e| Error::StdError(StdError::KubeError(e)))
        })
        .await
    }

    async fn start_build(&self, namespace: &str, buildconfig: &str) -> Result<String> {
        let api: Api<BuildConfig> = Api::namespaced(self.client.clone(), namespace);
        let request = json!({
            "kind": "BuildRequest",
            "apiVersion": format!("{API_GROUP}/v1"),
            "metadata": { "name": buildconfig }
        });
        let body =
            serde_json::to_vec(&request).map_err(|e| Error::StdError(StdError::JsonSerializationError(e)))?;

        let what = format!("instantiate buildconfig {namespace}/{buildconfig}");
        let build: Build = bounded(self.timeout, &what, async {
            api.create_subresource("instantiate", buildconfig, &PostParams::default(), body)
                .await
                .map_err(|e| Error::StdError(StdError::KubeError(e)))
        })
        .await?;

        let output = format!("build.{API_GROUP}/{} started", build.name_any());
        info!(namespace = %namespace, buildconfig = %buildconfig, output = %output, "Build started");
        Ok(output)
    }
}
