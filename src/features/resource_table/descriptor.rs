use std::{fmt::Display, str::FromStr};

use anyhow::{bail, Result};

pub const DEFAULT_VERSION: &str = "v1";

/// Identifies one resource kind as the user or the catalog named it.
///
/// Text form is `NAME[.GROUP][/VERSION]`, e.g. `pods`, `deployments.apps/v1`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct ResourceDescriptor {
    group: String,
    version: String,
    name: String,
}

impl ResourceDescriptor {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            name: name.into(),
        }
    }

    /// `group_version` as found in discovery (`v1`, `apps/v1`).
    pub fn from_group_version(name: impl Into<String>, group_version: &str) -> Self {
        match group_version.split_once('/') {
            Some((group, version)) => Self::new(group, version, name),
            None => Self::new("", group_version, name),
        }
    }

    /// Applies the defaults once, before anything talks to the control plane.
    pub fn resolve(&self) -> ResolvedDescriptor {
        let version = if self.version.is_empty() {
            DEFAULT_VERSION.to_string()
        } else {
            self.version.clone()
        };

        ResolvedDescriptor {
            group: self.group.clone(),
            version,
            name: self.name.clone(),
        }
    }
}

impl Display for ResourceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;

        if !self.group.is_empty() {
            write!(f, ".{}", self.group)?;
        }

        if !self.version.is_empty() {
            write!(f, "/{}", self.version)?;
        }

        Ok(())
    }
}

impl FromStr for ResourceDescriptor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (resource, version) = s.split_once('/').unwrap_or((s, ""));

        // plural names never contain dots, groups usually do
        let (name, group) = resource.split_once('.').unwrap_or((resource, ""));

        if name.is_empty() {
            bail!("resource name is empty: {:?}", s);
        }

        if s.contains('/') && version.is_empty() {
            bail!("version is empty: {:?}", s);
        }

        Ok(Self::new(group, version, name))
    }
}

/// A descriptor with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDescriptor {
    group: String,
    version: String,
    name: String,
}

impl ResolvedDescriptor {
    pub fn is_core_group(&self) -> bool {
        self.group.is_empty()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group_version(&self) -> String {
        if self.is_core_group() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Discovery endpoint of the group/version, `/api/v1` or `/apis/<group>/<version>`.
    pub fn group_version_path(&self) -> String {
        if self.is_core_group() {
            format!("/api/{}", self.version)
        } else {
            format!("/apis/{}/{}", self.group, self.version)
        }
    }

    /// Collection endpoint across all namespaces, carrying each object in its row.
    pub fn table_path(&self) -> String {
        format!(
            "{}/{}?includeObject=Object",
            self.group_version_path(),
            self.name
        )
    }
}
