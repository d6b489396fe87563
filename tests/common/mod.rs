#![allow(dead_code)]

use {
    base64::{Engine as _, engine::general_purpose::STANDARD as BASE64},
    openssl::{hash::MessageDigest, pkey::PKey, rsa::Rsa, sign::Signer},
    payhook::{
        AppState,
        domain::{
            config::{GatewayConfig, SharedConfig},
            money::{CurrencyCode, Money},
            notification::{ExternalId, PaymentNotification, PaymentStatus, RouteId},
            order::{Order, OrderId},
        },
        infra::memory::InMemoryStore,
        services::locks::OrderLocks,
    },
    std::{sync::Arc, time::Duration},
    url::Url,
};

pub const ROUTE_ID: &str = "16760";

pub fn test_config(public_key_pem: &str) -> GatewayConfig {
    GatewayConfig {
        route_id: ROUTE_ID.to_string(),
        public_key_pem: public_key_pem.to_string(),
        enabled: true,
        pay_page_url: Url::parse("https://pay.example/pl").unwrap(),
        webhook_url: Url::parse("https://shop.example/webhook").unwrap(),
        return_url: Url::parse("https://shop.example/thanks").unwrap(),
        checkout_expiry: chrono::Duration::hours(1),
        store_timeout: Duration::from_secs(5),
    }
}

/// Order in `AwaitingPayment` with the given total.
pub fn make_order(id: u64, total: &str, currency: &str) -> Order {
    Order::new(
        OrderId::new(id),
        7,
        Money::new(total.parse().unwrap(), CurrencyCode::new(currency).unwrap()),
    )
}

pub fn make_notification(
    order_id: u64,
    route: &str,
    status: PaymentStatus,
    amount: &str,
    currency: &str,
) -> PaymentNotification {
    PaymentNotification {
        external_id: ExternalId::parse(&format!("{order_id}/ref")).unwrap(),
        route_id: RouteId::new(route),
        status,
        amount: amount.parse().unwrap(),
        currency: CurrencyCode::new(currency).unwrap(),
    }
}

pub fn app_state(store: Arc<InMemoryStore>, config: GatewayConfig) -> AppState {
    AppState {
        store,
        locks: Arc::new(OrderLocks::new()),
        config: SharedConfig::new(config),
    }
}

/// Throwaway RSA keypair plus the provider's signing scheme: RSA-SHA256 over
/// the lowercase-hex SHA-256 digest of the body, base64-encoded.
pub struct TestKeys {
    private: PKey<openssl::pkey::Private>,
    pub public_pem: String,
}

impl TestKeys {
    pub fn generate() -> Self {
        let rsa = Rsa::generate(2048).unwrap();
        let private = PKey::from_rsa(rsa).unwrap();
        let public_pem = String::from_utf8(private.public_key_to_pem().unwrap()).unwrap();
        Self {
            private,
            public_pem,
        }
    }

    pub fn sign(&self, payload: &[u8]) -> String {
        let digest = hex::encode(&*openssl::hash::hash(MessageDigest::sha256(), payload).unwrap());
        let mut signer = Signer::new(MessageDigest::sha256(), &self.private).unwrap();
        signer.update(digest.as_bytes()).unwrap();
        BASE64.encode(signer.sign_to_vec().unwrap())
    }
}
