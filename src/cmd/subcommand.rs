use std::io::Write as _;

use anyhow::Result;
use clap::Parser;

use crate::{
    error::Error,
    features::{
        api_resources::kube::ResourceKindCatalog,
        resource_table::{ResourceDescriptor, ResourceTableFetcher},
        search,
    },
    kube::KubeClient,
};

use super::Command;

#[derive(Parser, Debug, Clone)]
pub enum SubCommand {
    /// Print every served resource kind as tab separated text
    Kinds,

    /// Print the table of one resource kind as tab separated text
    Get {
        /// NAME[.GROUP][/VERSION] (e.g. pods, deployments.apps/v1)
        #[arg(value_name = "RESOURCE")]
        resource: ResourceDescriptor,

        /// Keep only rows with a cell containing this text
        #[arg(short, long)]
        query: Option<String>,
    },
}

impl SubCommand {
    pub fn run(self, cmd: &Command) -> Result<()> {
        let rt = tokio::runtime::Runtime::new()?;

        let text = rt.block_on(async {
            let client = KubeClient::try_from_kubeconfig(cmd.kubeconfig.clone(), cmd.context.clone())
                .await
                .map_err(Error::Connection)?;

            let table = match self {
                SubCommand::Kinds => ResourceKindCatalog::new(&client)
                    .list_kinds()
                    .await?
                    .to_table()?,
                SubCommand::Get { resource, query } => {
                    let table = ResourceTableFetcher::new(&client)
                        .fetch_table(&resource)
                        .await?;

                    search::apply(&table, query.as_deref().unwrap_or_default())
                }
            };

            anyhow::Ok(table.to_tsv())
        })?;

        std::io::stdout().write_all(text.as_bytes())?;

        Ok(())
    }
}
