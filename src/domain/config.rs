use {
    super::notification::RouteId,
    std::sync::{Arc, RwLock},
    std::time::Duration,
    url::Url,
};

/// Gateway settings. Snapshotted once per request and treated as immutable
/// for the duration of that request, even if replaced concurrently.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub route_id: String,
    pub public_key_pem: String,
    pub enabled: bool,
    pub pay_page_url: Url,
    pub webhook_url: Url,
    pub return_url: Url,
    pub checkout_expiry: chrono::Duration,
    pub store_timeout: Duration,
}

impl GatewayConfig {
    /// Coarse authorization independent of the signature: both sides
    /// compare as strings, since the wire may carry a number.
    pub fn route_matches(&self, incoming: &RouteId) -> bool {
        self.route_id == incoming.as_str()
    }
}

/// Shared handle the handlers snapshot from. Replacing the config mid-flight
/// never affects a request already being handled.
#[derive(Clone)]
pub struct SharedConfig(Arc<RwLock<GatewayConfig>>);

impl SharedConfig {
    pub fn new(config: GatewayConfig) -> Self {
        Self(Arc::new(RwLock::new(config)))
    }

    pub fn snapshot(&self) -> GatewayConfig {
        self.0.read().expect("config lock poisoned").clone()
    }

    pub fn replace(&self, config: GatewayConfig) {
        *self.0.write().expect("config lock poisoned") = config;
    }
}
