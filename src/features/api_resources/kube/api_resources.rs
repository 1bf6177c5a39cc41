use std::{
    collections::{hash_map::Entry, HashMap},
    fmt::Display,
    ops::Deref,
};

use futures::future::try_join_all;

use crate::{
    error::{Error, Result},
    features::resource_table::{NormalizedTable, ResourceDescriptor, TableColumn, TableRow},
    kube::{
        apis::{APIGroupList, APIResourceList, APIVersions},
        KubeClientRequest,
    },
    logger,
};

const CORE_API_PATH: &str = "/api";
const GROUPS_API_PATH: &str = "/apis";

/// One served resource, as `kubectl api-resources` lists it.
///
/// `group_version` is the group's preferred version, or the version that
/// serves the resource when the preferred one does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKind {
    pub name: String,
    pub group_version: String,
}

impl ResourceKind {
    pub fn new(name: impl Into<String>, group_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group_version: group_version.into(),
        }
    }

    /// Reads back a row of [`ResourceKinds::to_table`].
    pub fn from_row(row: &TableRow) -> Option<Self> {
        match row.cells.as_slice() {
            [name, group_version] => Some(Self::new(name, group_version)),
            _ => None,
        }
    }

    pub fn descriptor(&self) -> ResourceDescriptor {
        ResourceDescriptor::from_group_version(&self.name, &self.group_version)
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.group_version)
    }
}

/// Sorted by name; kinds sharing a name stay in discovery order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResourceKinds {
    inner: Vec<ResourceKind>,
}

impl ResourceKinds {
    fn sorted(mut kinds: Vec<ResourceKind>) -> Self {
        // stable, ties keep discovery order
        kinds.sort_by(|a, b| a.name.cmp(&b.name));

        Self { inner: kinds }
    }

    /// `NAME` / `GROUPVERSION` table used by the kind picker and the `kinds` subcommand.
    pub fn to_table(&self) -> Result<NormalizedTable> {
        let columns = vec![TableColumn::new("NAME"), TableColumn::new("GROUPVERSION")];

        let rows = self
            .inner
            .iter()
            .map(|kind| TableRow::new(vec![kind.name.clone(), kind.group_version.clone()]))
            .collect();

        NormalizedTable::try_new(columns, rows, false)
    }
}

impl Deref for ResourceKinds {
    type Target = Vec<ResourceKind>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GroupVersion {
    group: String,
    group_version: String,
    preferred: bool,
}

/// Lists every resource the control plane serves, once per group.
pub struct ResourceKindCatalog<'a, C>
where
    C: KubeClientRequest,
{
    client: &'a C,
}

impl<'a, C> ResourceKindCatalog<'a, C>
where
    C: KubeClientRequest,
{
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// All or nothing: any failed discovery request fails the whole listing.
    pub async fn list_kinds(&self) -> Result<ResourceKinds> {
        let group_versions = self.group_versions().await.map_err(Error::Discovery)?;

        logger!(debug, "discovered group versions {:?}", group_versions);

        let paths: Vec<String> = group_versions
            .iter()
            .map(|gv| group_version_path(&gv.group_version))
            .collect();

        let lists = try_join_all(
            paths
                .iter()
                .map(|path| self.client.request::<APIResourceList>(path)),
        )
        .await
        .map_err(Error::Discovery)?;

        let kinds = merge_preferred(group_versions.iter().zip(lists));

        logger!(info, "discovered {} resource kinds", kinds.len());

        Ok(ResourceKinds::sorted(kinds))
    }

    /// Every version of every group. Core group first, then named groups in
    /// the order the server lists them.
    async fn group_versions(&self) -> anyhow::Result<Vec<GroupVersion>> {
        let core = self.client.request::<APIVersions>(CORE_API_PATH).await?;

        let groups = self.client.request::<APIGroupList>(GROUPS_API_PATH).await?;

        let core_versions = core
            .versions
            .into_iter()
            .enumerate()
            .map(|(i, version)| GroupVersion {
                group: String::new(),
                group_version: version,
                preferred: i == 0,
            });

        let group_versions = groups.groups.into_iter().flat_map(|group| {
            let preferred = group
                .preferred_version
                .as_ref()
                .or(group.versions.first())
                .map(|gv| gv.group_version.clone());

            let name = group.name;

            group.versions.into_iter().map(move |gv| GroupVersion {
                group: name.clone(),
                preferred: preferred.as_ref() == Some(&gv.group_version),
                group_version: gv.group_version,
            })
        });

        Ok(core_versions.chain(group_versions).collect())
    }
}

/// One kind per (group, resource). The preferred version wins over the
/// others; a resource missing from it keeps the first version serving it.
fn merge_preferred<'a>(
    lists: impl IntoIterator<Item = (&'a GroupVersion, APIResourceList)>,
) -> Vec<ResourceKind> {
    let mut kinds: Vec<ResourceKind> = Vec::new();
    let mut seen: HashMap<(String, String), usize> = HashMap::new();

    for (gv, list) in lists {
        for resource in list.resources.into_iter().filter(|r| !r.name.contains('/')) {
            match seen.entry((gv.group.clone(), resource.name.clone())) {
                Entry::Occupied(entry) => {
                    if gv.preferred {
                        kinds[*entry.get()].group_version = gv.group_version.clone();
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(kinds.len());
                    kinds.push(ResourceKind::new(resource.name, gv.group_version.as_str()));
                }
            }
        }
    }

    kinds
}

fn group_version_path(group_version: &str) -> String {
    if group_version.contains('/') {
        format!("{}/{}", GROUPS_API_PATH, group_version)
    } else {
        format!("{}/{}", CORE_API_PATH, group_version)
    }
}
