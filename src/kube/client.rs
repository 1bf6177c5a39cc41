use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use http::header::{HeaderValue, ACCEPT};
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config,
};
use serde::de::DeserializeOwned;

use crate::logger;

const TABLE_REQUEST_HEADER: &str = "application/json;as=Table;v=v1;g=meta.k8s.io,application/json;as=Table;v=v1beta1;g=meta.k8s.io,application/json";

const JSON_REQUEST_HEADER: &str = "application/json";

fn remove_slash(path: &str) -> &str {
    if let Some(path) = path.strip_prefix('/') {
        path
    } else {
        path
    }
}

#[derive(Clone)]
pub struct KubeClient {
    client: Client,
}

impl KubeClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from a kubeconfig file.
    ///
    /// Without an explicit path the `KUBECONFIG` environment variable is
    /// honored, falling back to `~/.kube/config`.
    pub async fn try_from_kubeconfig(
        path: Option<PathBuf>,
        context: Option<String>,
    ) -> Result<Self> {
        let kubeconfig = match path {
            Some(path) => Kubeconfig::read_from(path)?,
            None => Kubeconfig::read()?,
        };

        let options = KubeConfigOptions {
            context,
            ..Default::default()
        };

        let config = Config::from_custom_kubeconfig(kubeconfig, &options).await?;

        logger!(info, "cluster url {}", config.cluster_url);

        let client = Client::try_from(config)?;

        Ok(Self::new(client))
    }

    async fn inner_request<T>(&self, path: &str, header: &'static str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let mut request = http::Request::get(format!("/{}", remove_slash(path))).body(Vec::new())?;

        request
            .headers_mut()
            .insert(ACCEPT, HeaderValue::from_static(header));

        logger!(debug, "HTTP request {:?}", request);

        let ret = self.client.request(request).await;

        ret.map_err(Into::into)
    }
}

/// Read-only access to the control plane.
///
/// Paths are absolute API paths (`/api/v1/pods`), query string included.
#[async_trait]
pub trait KubeClientRequest: Send + Sync {
    /// GET `path` negotiating the server-side Table representation.
    async fn table_request<T: DeserializeOwned + 'static>(&self, path: &str) -> Result<T>;

    async fn request<T: DeserializeOwned + 'static>(&self, path: &str) -> Result<T>;
}

#[async_trait]
impl KubeClientRequest for KubeClient {
    async fn table_request<T: DeserializeOwned + 'static>(&self, path: &str) -> Result<T> {
        self.inner_request(path, TABLE_REQUEST_HEADER).await
    }

    async fn request<T: DeserializeOwned + 'static>(&self, path: &str) -> Result<T> {
        self.inner_request(path, JSON_REQUEST_HEADER).await
    }
}
