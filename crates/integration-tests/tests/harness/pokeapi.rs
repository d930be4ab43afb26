//! Mock upstream PokéAPI

use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Wiremock server answering `/api/v2/...` lookups
pub struct MockPokeApi {
    server: MockServer,
}

impl MockPokeApi {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Upstream base URL to configure the tool server with
    pub fn upstream_url(&self) -> Url {
        Url::parse(&format!("{}/api/v2/", self.server.uri())).unwrap()
    }

    /// Answer `GET /api/v2/{resource}/{key}` with `body`, expecting `calls` hits
    pub async fn mount(&self, resource: &str, key: &str, body: Value, calls: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v2/{resource}/{key}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Eevee's pokemon record and the evolution chain stored under its id
    pub async fn mount_eevee(&self) {
        self.mount("pokemon", "eevee", json!({ "id": 133, "name": "eevee" }), 1).await;
        self.mount("evolution-chain", "133", eevee_chain(), 1).await;
    }

    /// Verify every mounted expectation now instead of on drop
    pub async fn verify(&self) {
        self.server.verify().await;
    }
}

pub fn eevee_chain() -> Value {
    json!({
        "id": 133,
        "chain": {
            "species": { "name": "eevee" },
            "evolves_to": [
                { "species": { "name": "vaporeon" } },
                { "species": { "name": "jolteon" } },
                { "species": { "name": "flareon" } }
            ]
        }
    })
}
