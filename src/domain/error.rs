use {
    super::money::CurrencyCode,
    super::notification::ParseError,
    super::order::OrderId,
    rust_decimal::Decimal,
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("signature verification failed")]
    Signature,

    #[error("payload: {0}")]
    Parse(#[from] ParseError),

    #[error("route mismatch: expected {expected}, received {received}")]
    RouteMismatch { expected: String, received: String },

    #[error("amount mismatch: expected {expected}, received {received}")]
    AmountMismatch { expected: Decimal, received: Decimal },

    #[error("currency mismatch: expected {expected}, received {received}")]
    CurrencyMismatch {
        expected: CurrencyCode,
        received: CurrencyCode,
    },

    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    #[error("validation: {0}")]
    Validation(String),

    #[error("gateway is disabled")]
    Disabled,

    #[error("route id is not configured")]
    RouteNotConfigured,

    #[error("order store timed out")]
    StoreTimeout,

    #[error("order store: {0}")]
    Store(String),
}
