use async_trait::async_trait;
use kube::Resource;
use serde::de::DeserializeOwned;
use tracing::info;

use super::command::{CommandRunner, ProcessRunner};
use super::BuildClient;
use crate::api::v1::{Build, BuildConfig};
use crate::util::errors::{Error, Result, StdError};

pub const DEFAULT_OC_BINARY: &str = "oc";

/// [`BuildClient`] backed by the `oc` CLI.
pub struct OcClient<R = ProcessRunner> {
    binary: String,
    runner: R,
}

impl<R: CommandRunner> OcClient<R> {
    pub fn new(binary: impl Into<String>, runner: R) -> Self {
        Self {
            binary: binary.into(),
            runner,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// `oc get -n <namespace> <Kind> <name> -o yaml`, decoded into `K`.
    async fn get<K>(&self, namespace: &str, name: &str) -> Result<K>
    where
        K: Resource<DynamicType = ()> + DeserializeOwned,
    {
        let kind = K::kind(&()).to_string();
        let args = ["get", "-n", namespace, kind.as_str(), name, "-o", "yaml"].map(String::from);
        let stdout = self.runner.run(&self.binary, &args).await?;

        serde_yaml::from_slice(&stdout).map_err(|e| Error::StdError(StdError::YamlDecodingError(e)))
    }
}

#[async_trait]
impl<R: CommandRunner> BuildClient for OcClient<R> {
    async fn get_build_config(&self, namespace: &str, name: &str) -> Result<BuildConfig> {
        self.get(namespace, name).await
    }

    async fn get_build(&self, namespace: &str, name: &str) -> Result<Build> {
        self.get(namespace, name).await
    }

    async fn start_build(&self, namespace: &str, buildconfig: &str) -> Result<String> {
        let args = ["start-build", "-n", namespace, buildconfig].map(String::from);
        let stdout = self.runner.run(&self.binary, &args).await?;
        let output = String::from_utf8_lossy(&stdout).trim_end().to_string();

        info!(namespace = %namespace, buildconfig = %buildconfig, output = %output, "Build started");
        Ok(output)
    }
}
