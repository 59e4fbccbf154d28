use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const GIT_SOURCE_TYPE: &str = "Git";

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[kube(kind = "BuildConfig", group = "build.openshift.io", version = "v1", namespaced)]
#[kube(status = "BuildConfigStatus", shortname = "bc")]
pub struct BuildConfigSpec {
    pub source: Option<BuildSource>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
pub struct BuildSource {
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub git: Option<GitBuildSource>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
pub struct GitBuildSource {
    pub uri: Option<String>,
    #[serde(rename = "ref")]
    pub ref_: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfigStatus {
    pub last_version: Option<i64>,
}

impl BuildConfig {
    pub fn uses_git_source(&self) -> bool {
        self.spec
            .source
            .as_ref()
            .and_then(|source| source.type_.as_deref())
            == Some(GIT_SOURCE_TYPE)
    }

    /// Sequence number of the most recent build, as reported in `status.lastVersion`.
    pub fn last_version(&self) -> Option<i64> {
        self.status.as_ref().and_then(|status| status.last_version)
    }
}
