use std::fmt;

use tracing::*;

use crate::ansible::ModuleParams;
use crate::api::v1::{build_name, Build, BuildPhase};
use crate::client::BuildClient;
use crate::util::errors::{Error, Result};

/// What a run did, in the order it happened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub changed: bool,
    pub output: Vec<String>,
}

impl Report {
    pub fn log(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }
}

/// Outcome of comparing the BuildConfig's latest Build with the desired commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Assessment {
    NoBuildHistory,
    LatestBuildFailed,
    BuildRunning,
    RevisionMismatch { desired: String, actual: String },
    RevisionMatches,
}

impl Assessment {
    pub fn requires_build(&self) -> bool {
        matches!(
            self,
            Assessment::NoBuildHistory
                | Assessment::LatestBuildFailed
                | Assessment::RevisionMismatch { .. }
        )
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Assessment::NoBuildHistory => {
                write!(f, "No status or lastVersion on BuildConfig, starting build.")
            }
            Assessment::LatestBuildFailed => write!(f, "Last build failed, starting another."),
            Assessment::BuildRunning => write!(f, "Build already running, skipping."),
            Assessment::RevisionMismatch { desired, actual } => {
                write!(f, "Git refs do not match: {desired} != {actual}")
            }
            Assessment::RevisionMatches => write!(f, "Git ref matches."),
        }
    }
}

/// Decide what to do about the latest build.
///
/// A failed build is always retried and a running one is always left alone.
/// Otherwise the recorded commit has to equal `git_ref` exactly.
pub fn assess_build(build: &Build, git_ref: &str) -> Result<Assessment> {
    match build.phase()? {
        BuildPhase::Failed => Ok(Assessment::LatestBuildFailed),
        BuildPhase::Running => Ok(Assessment::BuildRunning),
        BuildPhase::Other(_) => {
            let commit = build.commit()?;
            if commit != git_ref {
                Ok(Assessment::RevisionMismatch {
                    desired: git_ref.to_string(),
                    actual: commit.to_string(),
                })
            } else {
                Ok(Assessment::RevisionMatches)
            }
        }
    }
}

/// Make sure the latest build of `params.buildconfig` ran against `params.git_ref`,
/// starting at most one new build.
///
/// Output lines are appended to `report` as the run progresses, so the caller
/// still has them when this returns an error.
pub async fn reconcile<C>(client: &C, params: &ModuleParams, report: &mut Report) -> Result<()>
where
    C: BuildClient + ?Sized,
{
    let ModuleParams {
        namespace,
        buildconfig,
        git_ref,
    } = params;
    info!(namespace = %namespace, buildconfig = %buildconfig, git_ref = %git_ref, "Checking BuildConfig");

    let build_config = client.get_build_config(namespace, buildconfig).await?;
    if !build_config.uses_git_source() {
        warn!(namespace = %namespace, buildconfig = %buildconfig, "BuildConfig does not use Git source");
        return Err(Error::NotGitSource(buildconfig.clone()));
    }

    let assessment = match build_config.last_version() {
        None => Assessment::NoBuildHistory,
        Some(version) => {
            let latest = build_name(buildconfig, version);
            report.log(format!("Expected latest build: {latest}"));
            let build = client.get_build(namespace, &latest).await?;
            debug!(build = %latest, phase = ?build.phase().ok(), "Fetched latest build");
            assess_build(&build, git_ref)?
        }
    };

    info!(
        buildconfig = %buildconfig,
        requires_build = assessment.requires_build(),
        "{}",
        assessment
    );
    report.log(assessment.to_string());

    if assessment.requires_build() {
        report.changed = true;
        let started = client.start_build(namespace, buildconfig).await?;
        report.log(started);
    }

    Ok(())
}
