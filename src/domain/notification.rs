use {
    super::money::CurrencyCode,
    super::order::OrderId,
    derive_more::Display,
    rust_decimal::Decimal,
    serde::{Deserialize, Deserializer},
    std::fmt,
    std::str::FromStr,
    thiserror::Error,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid externalId: {0}")]
    BadExternalId(String),
}

/// Payment status as reported by the provider. Unrecognized values are
/// carried verbatim so the pipeline can audit them instead of dropping them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Cancelled,
    Expired,
    Unknown(String),
}

impl PaymentStatus {
    /// The provider has been observed spelling cancellation both ways.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "Completed" => Self::Completed,
            "Canceled" | "Cancelled" => Self::Cancelled,
            "Expired" => Self::Expired,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Completed => write!(f, "Completed"),
            Self::Cancelled => write!(f, "Cancelled"),
            Self::Expired => write!(f, "Expired"),
            Self::Unknown(s) => write!(f, "{s}"),
        }
    }
}

/// Merchant route identifier. The wire carries it as either a JSON number
/// or a string; both compare as strings against the configured value.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct RouteId(String);

impl RouteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for RouteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Self(s)),
            serde_json::Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "routeId must be a string or number, got {other}"
            ))),
        }
    }
}

/// Provider-side reference, `"<orderId>/<suffix>"`. Keeps the raw string for
/// logging alongside the extracted local order id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalId {
    raw: String,
    order_id: OrderId,
}

impl ExternalId {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let prefix = raw.split('/').next().unwrap_or_default();
        let id: u64 = prefix
            .parse()
            .map_err(|_| ParseError::BadExternalId(raw.to_string()))?;
        if id == 0 {
            return Err(ParseError::BadExternalId(raw.to_string()));
        }
        Ok(Self {
            raw: raw.to_string(),
            order_id: OrderId::new(id),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

// Wire shapes. Everything optional so absence surfaces as MissingField
// instead of an opaque serde error.

#[derive(Debug, Deserialize)]
struct WireNotification {
    #[serde(rename = "externalId")]
    external_id: Option<String>,
    #[serde(rename = "routeId")]
    route_id: Option<RouteId>,
    payment: Option<WirePayment>,
}

#[derive(Debug, Deserialize)]
struct WirePayment {
    status: Option<String>,
    amount: Option<serde_json::Value>,
    currency: Option<WireCurrency>,
}

/// Older protocol versions send `"currency": "EUR"`, newer ones
/// `"currency": {"name": "EUR", ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireCurrency {
    Code(String),
    Object { name: String },
}

impl WireCurrency {
    fn code(&self) -> &str {
        match self {
            Self::Code(s) => s,
            Self::Object { name } => name,
        }
    }
}

/// Typed payment notification, the parser's output. Purely syntactic: the
/// referenced order is not resolved here.
#[derive(Debug, Clone)]
pub struct PaymentNotification {
    pub external_id: ExternalId,
    pub route_id: RouteId,
    pub status: PaymentStatus,
    pub amount: Decimal,
    pub currency: CurrencyCode,
}

impl PaymentNotification {
    pub fn parse(body: &[u8]) -> Result<Self, ParseError> {
        let wire: WireNotification = serde_json::from_slice(body)
            .map_err(|e| ParseError::Malformed(e.to_string()))?;

        let raw_external = wire
            .external_id
            .ok_or(ParseError::MissingField("externalId"))?;
        let external_id = ExternalId::parse(&raw_external)?;

        let route_id = wire.route_id.ok_or(ParseError::MissingField("routeId"))?;

        let payment = wire.payment.ok_or(ParseError::MissingField("payment"))?;
        let status = payment
            .status
            .ok_or(ParseError::MissingField("payment.status"))?;
        let amount = parse_amount(
            payment
                .amount
                .ok_or(ParseError::MissingField("payment.amount"))?,
        )?;
        let currency = payment
            .currency
            .ok_or(ParseError::MissingField("payment.currency"))?;
        let currency = CurrencyCode::new(currency.code())
            .map_err(|_| ParseError::Malformed("empty payment.currency".into()))?;

        Ok(Self {
            external_id,
            route_id,
            status: PaymentStatus::from_wire(&status),
            amount,
            currency,
        })
    }
}

/// Amounts arrive as JSON numbers or numeric strings. Going through the
/// JSON text keeps the value exact; a float round-trip would not.
fn parse_amount(value: serde_json::Value) -> Result<Decimal, ParseError> {
    let text = match &value {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.trim().to_string(),
        other => {
            return Err(ParseError::Malformed(format!(
                "payment.amount must be a number, got {other}"
            )));
        }
    };
    Decimal::from_str(&text)
        .map_err(|e| ParseError::Malformed(format!("payment.amount: {e}")))
}
