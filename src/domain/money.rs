use {
    super::error::GatewayError,
    derive_more::Display,
    rust_decimal::Decimal,
    serde::{Deserialize, Serialize},
};

/// ISO-style currency code, normalized to uppercase at construction so
/// case-insensitive comparison is plain equality. The provider settles
/// arbitrary fiat and crypto codes, so this stays open rather than an enum.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Result<Self, GatewayError> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(GatewayError::Validation("empty currency code".into()));
        }
        Ok(Self(code.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Exact monetary value. Amount comparison is exact decimal equality,
/// never a tolerance band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: CurrencyCode,
}

impl Money {
    pub fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }
}
