//! Process configuration, from command-line flags or the environment.
//!
//! Task arguments do not live here; they come from the Ansible args file.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::client::{BuildClient, KubeClient, OcClient, ProcessRunner};
use crate::util::errors::Result;
use crate::util::telemetry::LogFormat;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backend {
    /// Shell out to the `oc` CLI
    #[default]
    Oc,
    /// Talk to the API server directly
    Kube,
}

#[derive(Parser, Clone, Debug)]
#[command(name = "oc_start_build_check", version, about)]
pub struct Config {
    /// JSON file with the task arguments, as written by Ansible
    pub args_file: PathBuf,

    #[arg(long, env = "OC_START_BUILD_CHECK_BACKEND", value_enum, default_value_t = Backend::Oc)]
    pub backend: Backend,

    /// Executable used by the `oc` backend
    #[arg(long, env = "OC_BINARY", default_value = crate::client::oc::DEFAULT_OC_BINARY)]
    pub oc_binary: String,

    /// Upper bound in seconds for each call to the cluster
    #[arg(long, env = "OC_START_BUILD_CHECK_TIMEOUT", value_name = "SECONDS")]
    pub command_timeout: Option<u64>,

    #[arg(long, env = "OC_START_BUILD_CHECK_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Config {
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout.map(Duration::from_secs)
    }

    pub async fn build_client(&self) -> Result<Box<dyn BuildClient>> {
        match self.backend {
            Backend::Oc => Ok(Box::new(OcClient::new(
                self.oc_binary.clone(),
                ProcessRunner::with_timeout(self.command_timeout()),
            ))),
            Backend::Kube => Ok(Box::new(KubeClient::try_default(self.command_timeout()).await?)),
        }
    }
}
