use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::catalog::{Endpoint, LookupStep};
use crate::error::PokeApiError;

/// Read-only client for the upstream PokéAPI
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: Url,
}

impl PokeApiClient {
    /// Create a client rooted at `base_url` (e.g. `https://pokeapi.co/api/v2/`)
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Run the lookup plan of `endpoint` for `key`
    ///
    /// The key is lower-cased before use; nothing else is validated.
    pub async fn lookup(&self, endpoint: &Endpoint, key: &str) -> Result<Value, PokeApiError> {
        let key = key.to_lowercase();

        match endpoint.step {
            LookupStep::Direct => self.fetch(endpoint.path, &key).await,
            LookupStep::ResolveId { via } => {
                let record = self.fetch(via, &key).await?;
                let id = record
                    .get("id")
                    .and_then(Value::as_u64)
                    .ok_or(PokeApiError::MissingId { resource: via, key })?;

                tracing::debug!(resource = via, id, "resolved lookup key to id");

                self.fetch(endpoint.path, &id.to_string()).await
            }
        }
    }

    /// `GET {base_url}{path}/{key}`, returning the body as JSON
    ///
    /// Bodies that are not JSON (the upstream answers `Not Found` in plain
    /// text) come back as a JSON string. The status code is not inspected.
    pub async fn fetch(&self, path: &str, key: &str) -> Result<Value, PokeApiError> {
        let url = self.resource_url(path, key);

        let request_error = |source| PokeApiError::Request {
            url: url.clone(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(request_error)?;
        let status = response.status();
        let body = response.text().await.map_err(request_error)?;

        tracing::debug!(%url, %status, bytes = body.len(), "upstream lookup");

        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }

    fn resource_url(&self, path: &str, key: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/{path}/{key}")
    }
}
