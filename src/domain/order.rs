use {
    super::error::GatewayError,
    super::money::Money,
    chrono::{DateTime, Utc},
    derive_more::Display,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Local order identifier, the integer prefix of the provider's external id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    AwaitingPayment,
    Processing,
    Cancelled,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingPayment => "awaiting_payment",
            Self::Processing => "processing",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }

    /// Anything past `AwaitingPayment` is terminal: webhooks never move the
    /// order again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::AwaitingPayment)
    }

    pub fn can_transition_to(&self, next: &OrderStatus) -> bool {
        matches!(self, Self::AwaitingPayment) && next.is_terminal()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for OrderStatus {
    type Error = GatewayError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "awaiting_payment" => Ok(Self::AwaitingPayment),
            "processing" => Ok(Self::Processing),
            "cancelled" => Ok(Self::Cancelled),
            "failed" => Ok(Self::Failed),
            other => Err(GatewayError::Validation(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

/// Free-text note on an order. Append-only, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditNote {
    pub text: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    id: OrderId,
    customer_id: u64,
    status: OrderStatus,
    total: Money,
    notes: Vec<AuditNote>,
}

impl Order {
    pub fn new(id: OrderId, customer_id: u64, total: Money) -> Self {
        Self {
            id,
            customer_id,
            status: OrderStatus::AwaitingPayment,
            total,
            notes: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> u64 {
        self.customer_id
    }

    pub fn status(&self) -> &OrderStatus {
        &self.status
    }

    pub fn total(&self) -> &Money {
        &self.total
    }

    pub fn notes(&self) -> &[AuditNote] {
        &self.notes
    }

    /// Webhook-driven moves are monotonic: only `AwaitingPayment` has
    /// outgoing edges. Re-entering `AwaitingPayment` from itself is an
    /// idempotent no-op so checkout can be retried before payment.
    pub fn transition(&mut self, next: OrderStatus) -> Result<(), GatewayError> {
        if next == self.status && matches!(next, OrderStatus::AwaitingPayment) {
            return Ok(());
        }
        if !self.status.can_transition_to(&next) {
            return Err(GatewayError::Validation(format!(
                "invalid status transition: {} → {}",
                self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }

    pub fn push_note(&mut self, text: impl Into<String>) {
        self.notes.push(AuditNote {
            text: text.into(),
            at: Utc::now(),
        });
    }
}
