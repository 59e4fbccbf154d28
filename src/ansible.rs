//! The Ansible side of the module: arguments in, one JSON result out.
//!
//! Ansible runs binary modules with the path of a JSON file holding the task
//! arguments, and reads a single JSON object from stdout.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;

use crate::client::BuildClient;
use crate::controllers::build_check::{reconcile, Report};
use crate::util::errors::{Error, Result, StdError};

pub const MODULE_NAME: &str = "oc_start_build_check";

/// Accepted task arguments, sorted. All of them are required.
pub const SUPPORTED_PARAMETERS: [&str; 3] = ["buildconfig", "git_ref", "namespace"];

const INTERNAL_PREFIX: &str = "_ansible_";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModuleParams {
    pub namespace: String,
    pub buildconfig: String,
    pub git_ref: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleArgs {
    pub params: ModuleParams,
    pub check_mode: bool,
}

impl ModuleArgs {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::StdError(StdError::IoError(e)))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| Error::StdError(StdError::JsonSerializationError(e)))?;
        match value {
            Value::Object(map) => Self::from_map(&map),
            other => Err(Error::ArgumentError(format!(
                "module arguments must be a JSON object, got {}",
                type_name(&other)
            ))),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Result<Self> {
        let mut unsupported: Vec<&str> = map
            .keys()
            .map(String::as_str)
            .filter(|key| !key.starts_with(INTERNAL_PREFIX) && !SUPPORTED_PARAMETERS.contains(key))
            .collect();
        if !unsupported.is_empty() {
            unsupported.sort_unstable();
            return Err(Error::ArgumentError(format!(
                "Unsupported parameters for ({MODULE_NAME}) module: {}. Supported parameters include: {}.",
                unsupported.join(", "),
                SUPPORTED_PARAMETERS.join(", ")
            )));
        }

        let missing: Vec<&str> = SUPPORTED_PARAMETERS
            .iter()
            .copied()
            .filter(|key| map.get(*key).map_or(true, Value::is_null))
            .collect();
        if !missing.is_empty() {
            return Err(Error::ArgumentError(format!(
                "missing required arguments: {}",
                missing.join(", ")
            )));
        }

        let check_mode = map
            .get("_ansible_check_mode")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Ok(ModuleArgs {
            params: ModuleParams {
                namespace: to_str(map, "namespace")?,
                buildconfig: to_str(map, "buildconfig")?,
                git_ref: to_str(map, "git_ref")?,
            },
            check_mode,
        })
    }
}

/// `type='str'` conversion: scalars are stringified, containers are rejected.
fn to_str(map: &Map<String, Value>, key: &str) -> Result<String> {
    match map.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(true)) => Ok("True".to_string()),
        Some(Value::Bool(false)) => Ok("False".to_string()),
        Some(other) => Err(Error::ArgumentError(format!(
            "argument '{key}' is of type {} and we were unable to convert to str",
            type_name(other)
        ))),
        None => Err(Error::ArgumentError(format!("missing required arguments: {key}"))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub module_args: ModuleParams,
}

/// The JSON object printed for Ansible.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModuleResult {
    pub changed: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invocation: Option<Invocation>,
}

impl ModuleResult {
    pub fn exit(report: Report, params: &ModuleParams) -> Self {
        ModuleResult {
            changed: report.changed,
            failed: false,
            skipped: false,
            msg: None,
            output: Some(report.output),
            invocation: Some(Invocation {
                module_args: params.clone(),
            }),
        }
    }

    pub fn fail(msg: impl Into<String>, output: Option<Vec<String>>, params: Option<&ModuleParams>) -> Self {
        ModuleResult {
            changed: false,
            failed: true,
            skipped: false,
            msg: Some(msg.into()),
            output,
            invocation: params.map(|params| Invocation {
                module_args: params.clone(),
            }),
        }
    }

    pub fn check_mode_unsupported() -> Self {
        ModuleResult {
            changed: false,
            failed: false,
            skipped: true,
            msg: Some(format!("remote module ({MODULE_NAME}) does not support check mode")),
            output: None,
            invocation: None,
        }
    }

    pub fn exit_code(&self) -> u8 {
        if self.failed {
            1
        } else {
            0
        }
    }
}

/// Run the build check and turn its outcome into a module result.
pub async fn execute<C>(client: &C, params: &ModuleParams) -> ModuleResult
where
    C: BuildClient + ?Sized,
{
    let mut report = Report::default();
    match reconcile(client, params, &mut report).await {
        Ok(()) => ModuleResult::exit(report, params),
        Err(e) => {
            error!(buildconfig = %params.buildconfig, error = %e, kind = %e.label(), "Build check failed");
            ModuleResult::fail(e.to_string(), Some(report.output), Some(params))
        }
    }
}
