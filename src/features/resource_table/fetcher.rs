use futures::future::try_join;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{de::IgnoredAny, Deserialize};

use crate::{
    error::{DecodeError, Error, Result},
    kube::{
        apis::{
            v1_table::{cell_to_string, Table, TableRow as WireRow},
            APIResourceList,
        },
        KubeClientRequest,
    },
    logger,
};

use super::{
    descriptor::{ResolvedDescriptor, ResourceDescriptor},
    table::{NormalizedTable, TableColumn, TableRow, NAMESPACE_COLUMN},
};

/// The part of an arbitrary object the table needs. Every kind decodes into this.
#[derive(Debug, Deserialize)]
struct RowObject {
    /// Required, never read
    #[serde(rename = "kind")]
    _kind: IgnoredAny,
    #[serde(default)]
    metadata: ObjectMeta,
}

impl RowObject {
    fn decode(index: usize, row: &WireRow) -> Result<Self, DecodeError> {
        let Some(object) = &row.object else {
            return Err(DecodeError::MissingObject { row: index });
        };

        serde_json::from_value(object.0.clone())
            .map_err(|source| DecodeError::Object { row: index, source })
    }

    fn namespace(&self) -> String {
        self.metadata.namespace.clone().unwrap_or_default()
    }
}

/// Fetches the server-printed table of any resource kind and normalizes it.
pub struct ResourceTableFetcher<'a, C>
where
    C: KubeClientRequest,
{
    client: &'a C,
}

impl<'a, C> ResourceTableFetcher<'a, C>
where
    C: KubeClientRequest,
{
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Every call goes to the control plane, refreshing is calling this again.
    pub async fn fetch_table(&self, descriptor: &ResourceDescriptor) -> Result<NormalizedTable> {
        let resolved = descriptor.resolve();

        logger!(info, "fetch table {}", resolved.table_path());

        let (table, namespaced) =
            try_join(self.fetch_wire_table(&resolved), self.is_namespaced(&resolved)).await?;

        normalize(table, namespaced)
    }

    async fn fetch_wire_table(&self, resolved: &ResolvedDescriptor) -> Result<Table> {
        self.client
            .table_request::<Table>(&resolved.table_path())
            .await
            .map_err(Error::Connection)
    }

    async fn is_namespaced(&self, resolved: &ResolvedDescriptor) -> Result<bool> {
        let list = self
            .client
            .request::<APIResourceList>(&resolved.group_version_path())
            .await
            .map_err(Error::Discovery)?;

        let namespaced = list
            .resources
            .iter()
            .find(|r| r.name == resolved.name())
            .map(|r| r.namespaced);

        match namespaced {
            Some(namespaced) => Ok(namespaced),
            None => {
                logger!(
                    warn,
                    "{} is not listed in {}, assuming namespaced",
                    resolved.name(),
                    resolved.group_version()
                );
                Ok(true)
            }
        }
    }
}

fn normalize(table: Table, namespaced: bool) -> Result<NormalizedTable> {
    let namespace_column = namespaced.then(|| TableColumn::new(NAMESPACE_COLUMN));

    let columns: Vec<TableColumn> = namespace_column
        .into_iter()
        .chain(
            table
                .column_definitions
                .iter()
                .map(|cd| TableColumn::new(cd.name.to_uppercase())),
        )
        .collect();

    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let object = RowObject::decode(i, row)?;

            let cells = row.cells.iter().map(cell_to_string);

            if namespaced {
                let namespace = object.namespace();

                Ok(TableRow {
                    cells: std::iter::once(namespace.clone()).chain(cells).collect(),
                    namespace: Some(namespace),
                })
            } else {
                Ok(TableRow::new(cells.collect()))
            }
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    NormalizedTable::try_new(columns, rows, namespaced)
}
