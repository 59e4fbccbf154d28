//! Canned `oc` output and a recording [`CommandRunner`] for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::command::render_command;
use crate::client::{CommandRunner, OcClient};
use crate::util::errors::{Error, Result, StdError};

enum Response {
    Stdout(String),
    Failure(String),
}

/// Serves canned stdout keyed on the argument list and records every call.
#[derive(Default)]
pub struct FakeRunner {
    responses: HashMap<Vec<String>, Response>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stdout(mut self, args: &[&str], stdout: &str) -> Self {
        self.responses
            .insert(to_args(args), Response::Stdout(stdout.to_string()));
        self
    }

    pub fn with_failure(mut self, args: &[&str], stderr: &str) -> Self {
        self.responses
            .insert(to_args(args), Response::Failure(stderr.to_string()));
        self
    }

    /// Every call so far, program first.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn start_build_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.get(1).map(String::as_str) == Some("start-build"))
            .count()
    }
}

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<Vec<u8>> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().cloned());
        self.calls.lock().unwrap().push(call);

        match self.responses.get(args) {
            Some(Response::Stdout(stdout)) => Ok(stdout.clone().into_bytes()),
            Some(Response::Failure(stderr)) => Err(Error::StdError(StdError::CommandError(format!(
                "`{}` failed with exit status: 1: {}",
                render_command(program, args),
                stderr
            )))),
            None => Err(Error::StdError(StdError::CommandError(format!(
                "no canned response for `{}`",
                render_command(program, args)
            )))),
        }
    }
}

/// A cluster as seen through `oc`: one BuildConfig `foo` in `myproject`,
/// optionally with a latest build, and a working `oc start-build`.
pub struct Cluster {
    runner: FakeRunner,
}

pub const NAMESPACE: &str = "myproject";
pub const BUILDCONFIG: &str = "foo";

impl Cluster {
    pub fn new(source_type: Option<&str>, last_version: Option<i64>) -> Self {
        let runner = FakeRunner::new()
            .with_stdout(
                &["get", "-n", NAMESPACE, "BuildConfig", BUILDCONFIG, "-o", "yaml"],
                &build_config_yaml(BUILDCONFIG, source_type, last_version),
            )
            .with_stdout(
                &["start-build", "-n", NAMESPACE, BUILDCONFIG],
                &format!(
                    "build.build.openshift.io/{BUILDCONFIG}-{} started\n",
                    last_version.unwrap_or(0) + 1
                ),
            );
        Self { runner }
    }

    pub fn with_build(mut self, name: &str, phase: &str, commit: &str) -> Self {
        self.runner = self.runner.with_stdout(
            &["get", "-n", NAMESPACE, "Build", name, "-o", "yaml"],
            &build_yaml(name, Some(phase), Some(commit)),
        );
        self
    }

    pub fn with_failure(mut self, args: &[&str], stderr: &str) -> Self {
        self.runner = self.runner.with_failure(args, stderr);
        self
    }

    pub fn client(self) -> OcClient<FakeRunner> {
        OcClient::new("oc", self.runner)
    }
}

/// `oc get BuildConfig <name> -o yaml` as OpenShift prints it.
///
/// An empty `source_type` emits a `source` block with no `type` key.
pub fn build_config_yaml(name: &str, source_type: Option<&str>, last_version: Option<i64>) -> String {
    let source = match source_type {
        Some("Git") => "  source:\n    type: Git\n    git:\n      uri: https://github.com/example/foo.git\n      ref: master\n".to_string(),
        Some("") => "  source:\n    git:\n      uri: https://github.com/example/foo.git\n".to_string(),
        Some(other) => format!("  source:\n    type: {other}\n    binary: {{}}\n"),
        None => String::new(),
    };
    let status = match last_version {
        Some(version) => format!("status:\n  lastVersion: {version}\n"),
        None => String::new(),
    };

    format!(
        r#"apiVersion: build.openshift.io/v1
kind: BuildConfig
metadata:
  creationTimestamp: "2018-03-01T10:00:00Z"
  labels:
    app: {name}
  name: {name}
  namespace: myproject
  resourceVersion: "1234"
  uid: 1c2b3a4d-0000-11e8-9f9a-0a580a800003
spec:
  nodeSelector: null
  output:
    to:
      kind: ImageStreamTag
      name: {name}:latest
  postCommit: {{}}
  resources: {{}}
  runPolicy: Serial
{source}  strategy:
    sourceStrategy:
      from:
        kind: ImageStreamTag
        name: ruby:2.4
        namespace: openshift
    type: Source
  triggers:
  - type: ConfigChange
{status}"#
    )
}

/// `oc get Build <name> -o yaml` as OpenShift prints it.
pub fn build_yaml(name: &str, phase: Option<&str>, commit: Option<&str>) -> String {
    let revision = match commit {
        Some(commit) => format!(
            "  revision:\n    git:\n      author:\n        name: Dev\n      commit: {commit}\n      message: Update\n    type: Git\n"
        ),
        None => String::new(),
    };
    let status = match phase {
        Some(phase) => format!("status:\n  config:\n    kind: BuildConfig\n    name: foo\n  phase: {phase}\n"),
        None => "status:\n  output: {}\n".to_string(),
    };

    format!(
        r#"apiVersion: build.openshift.io/v1
kind: Build
metadata:
  annotations:
    openshift.io/build-config.name: foo
  name: {name}
  namespace: myproject
spec:
  serviceAccount: builder
  source:
    git:
      uri: https://github.com/example/foo.git
    type: Git
{revision}  strategy:
    type: Source
{status}"#
    )
}
