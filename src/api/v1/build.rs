use std::fmt;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::errors::{Error, Result, StdError};

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[kube(kind = "Build", group = "build.openshift.io", version = "v1", namespaced)]
#[kube(status = "BuildStatus")]
pub struct BuildSpec {
    pub revision: Option<SourceRevision>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
pub struct SourceRevision {
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub git: Option<GitSourceRevision>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
pub struct GitSourceRevision {
    pub commit: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
pub struct BuildStatus {
    pub phase: Option<String>,
}

/// Build phases the check distinguishes. Every other phase, `Complete` included,
/// is carried through as `Other`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildPhase {
    Running,
    Failed,
    Other(String),
}

impl From<&str> for BuildPhase {
    fn from(phase: &str) -> Self {
        match phase {
            "Running" => BuildPhase::Running,
            "Failed" => BuildPhase::Failed,
            other => BuildPhase::Other(other.to_string()),
        }
    }
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BuildPhase::Running => write!(f, "Running"),
            BuildPhase::Failed => write!(f, "Failed"),
            BuildPhase::Other(phase) => write!(f, "{phase}"),
        }
    }
}

impl Build {
    pub fn phase(&self) -> Result<BuildPhase> {
        self.status
            .as_ref()
            .and_then(|status| status.phase.as_deref())
            .map(BuildPhase::from)
            .ok_or_else(|| Error::StdError(StdError::MetadataMissing("status.phase".to_string())))
    }

    /// Commit the build actually ran against.
    pub fn commit(&self) -> Result<&str> {
        self.spec
            .revision
            .as_ref()
            .and_then(|revision| revision.git.as_ref())
            .and_then(|git| git.commit.as_deref())
            .ok_or_else(|| {
                Error::StdError(StdError::MetadataMissing(
                    "spec.revision.git.commit".to_string(),
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use kube::ResourceExt;

    #[test]
    fn test_decode_complete_build() {
        let yaml = fixtures::build_yaml("foo-5", Some("Complete"), Some("abc123"));
        let build: Build = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(build.name_any(), "foo-5");
        assert_eq!(build.phase().unwrap(), BuildPhase::Other("Complete".to_string()));
        assert_eq!(build.commit().unwrap(), "abc123");
    }

    #[test]
    fn test_phase_parsing() {
        assert_eq!(BuildPhase::from("Running"), BuildPhase::Running);
        assert_eq!(BuildPhase::from("Failed"), BuildPhase::Failed);
        assert_eq!(BuildPhase::from("Error"), BuildPhase::Other("Error".to_string()));
        assert_eq!(BuildPhase::from("Cancelled").to_string(), "Cancelled");
    }

    #[test]
    fn test_missing_fields() {
        let yaml = fixtures::build_yaml("foo-5", None, None);
        let build: Build = serde_yaml::from_str(&yaml).unwrap();

        let err = build.phase().unwrap_err();
        assert!(matches!(
            err,
            Error::StdError(StdError::MetadataMissing(ref field)) if field == "status.phase"
        ));
        let err = build.commit().unwrap_err();
        assert!(err.to_string().contains("spec.revision.git.commit"));
    }
}
