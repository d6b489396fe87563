use {
    crate::domain::{config::GatewayConfig, error::GatewayError, order::Order},
    chrono::{DateTime, Utc},
    url::Url,
};

/// Builds the redirect to the external payment page for an order at
/// checkout. Refused when the gateway is disabled or has no route id; the
/// expiry stamp is ISO-8601 UTC, now plus the configured window.
pub fn build_redirect(
    order: &Order,
    config: &GatewayConfig,
    now: DateTime<Utc>,
) -> Result<Url, GatewayError> {
    if !config.enabled {
        return Err(GatewayError::Disabled);
    }
    if config.route_id.trim().is_empty() {
        return Err(GatewayError::RouteNotConfigured);
    }

    let expiry = (now + config.checkout_expiry)
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string();

    let mut url = config.pay_page_url.clone();
    url.query_pairs_mut()
        .append_pair("routeId", &config.route_id)
        .append_pair("message", &order.id().to_string())
        .append_pair("amount", &order.total().amount().to_string())
        .append_pair("expiryDate", &expiry)
        .append_pair("webhookUrl", config.webhook_url.as_str())
        .append_pair("redirect-uri", config.return_url.as_str());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::domain::{
            money::{CurrencyCode, Money},
            order::OrderId,
        },
        chrono::TimeZone,
        std::time::Duration,
    };

    fn config() -> GatewayConfig {
        GatewayConfig {
            route_id: "16760".into(),
            public_key_pem: String::new(),
            enabled: true,
            pay_page_url: Url::parse("https://pay.example/pl").unwrap(),
            webhook_url: Url::parse("https://shop.example/webhook").unwrap(),
            return_url: Url::parse("https://shop.example/thanks").unwrap(),
            checkout_expiry: chrono::Duration::hours(1),
            store_timeout: Duration::from_secs(5),
        }
    }

    fn order() -> Order {
        Order::new(
            OrderId::new(482),
            7,
            Money::new("100.00".parse().unwrap(), CurrencyCode::new("EUR").unwrap()),
        )
    }

    #[test]
    fn redirect_carries_all_parameters() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let url = build_redirect(&order(), &config(), now).unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("routeId".into(), "16760".into())));
        assert!(pairs.contains(&("message".into(), "482".into())));
        assert!(pairs.contains(&("amount".into(), "100.00".into())));
        assert!(pairs.contains(&("expiryDate".into(), "2026-03-01T13:00:00Z".into())));
        assert!(pairs.contains(&("webhookUrl".into(), "https://shop.example/webhook".into())));
        assert!(pairs.contains(&("redirect-uri".into(), "https://shop.example/thanks".into())));
    }

    #[test]
    fn disabled_gateway_refuses() {
        let mut cfg = config();
        cfg.enabled = false;
        assert!(matches!(
            build_redirect(&order(), &cfg, Utc::now()),
            Err(GatewayError::Disabled)
        ));
    }

    #[test]
    fn missing_route_id_refuses() {
        let mut cfg = config();
        cfg.route_id = String::new();
        assert!(matches!(
            build_redirect(&order(), &cfg, Utc::now()),
            Err(GatewayError::RouteNotConfigured)
        ));
    }
}
