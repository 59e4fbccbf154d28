//! Ansible module that makes sure the latest Build of an OpenShift BuildConfig
//! ran against a given Git commit, and starts a new build when it did not.

/// Task arguments and module results
pub mod ansible;

/// BuildConfig and Build resources
pub mod api;

/// Cluster access through `oc` or the API server
pub mod client;

/// Process configuration
pub mod config;

/// The build check itself
pub mod controllers;

/// Errors and logging
pub mod util;

pub use ansible::{ModuleArgs, ModuleParams, ModuleResult};
pub use config::Config;

use tracing::{error, info};

/// One module invocation, from args file to result.
pub async fn run(config: &Config) -> ModuleResult {
    let args = match ModuleArgs::from_file(&config.args_file) {
        Ok(args) => args,
        Err(e) => {
            error!(args_file = %config.args_file.display(), error = %e, "Invalid module arguments");
            return ModuleResult::fail(e.to_string(), None, None);
        }
    };

    if args.check_mode {
        info!("Check mode requested, skipping");
        return ModuleResult::check_mode_unsupported();
    }

    let client = match config.build_client().await {
        Ok(client) => client,
        Err(e) => {
            error!(backend = ?config.backend, error = %e, "Could not create cluster client");
            return ModuleResult::fail(e.to_string(), Some(Vec::new()), Some(&args.params));
        }
    };

    ansible::execute(client.as_ref(), &args.params).await
}

#[cfg(test)]
pub mod fixtures;
