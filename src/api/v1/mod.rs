//! `build.openshift.io/v1` resources, reduced to the fields the build check reads.
//!
//! Decoding ignores every field not modeled here, so these types accept the full
//! documents returned by `oc get -o yaml` and by the API server.

pub mod build;
pub mod buildconfig;

pub use build::{Build, BuildPhase, BuildSpec, BuildStatus};
pub use buildconfig::{BuildConfig, BuildConfigSpec, BuildConfigStatus, GIT_SOURCE_TYPE};

pub const API_GROUP: &str = "build.openshift.io";

/// Name OpenShift gives to the `version`th build of a BuildConfig.
pub fn build_name(buildconfig: &str, version: i64) -> String {
    format!("{buildconfig}-{version}")
}
