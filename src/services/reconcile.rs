use {
    crate::domain::{
        config::GatewayConfig,
        money::CurrencyCode,
        notification::{PaymentNotification, PaymentStatus},
        order::{Order, OrderStatus},
    },
    rust_decimal::Decimal,
};

/// What an accepted notification should do to the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    MarkProcessing,
    MarkCancelled,
    MarkFailed,
    /// Payment still pending at the provider; the order stays awaiting.
    KeepAwaiting,
    /// Status we do not recognize; the order stays put but the value is
    /// preserved for the audit trail.
    UnknownStatus(String),
}

impl Transition {
    pub fn target_status(&self) -> Option<OrderStatus> {
        match self {
            Self::MarkProcessing => Some(OrderStatus::Processing),
            Self::MarkCancelled => Some(OrderStatus::Cancelled),
            Self::MarkFailed => Some(OrderStatus::Failed),
            Self::KeepAwaiting | Self::UnknownStatus(_) => None,
        }
    }
}

/// Why a notification was not applied. `AlreadyProcessed` is the benign
/// case: redelivery after settlement, answered success-shaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    RouteMismatch {
        expected: String,
        received: String,
    },
    AlreadyProcessed {
        status: OrderStatus,
    },
    AmountMismatch {
        expected: Decimal,
        received: Decimal,
    },
    CurrencyMismatch {
        expected: CurrencyCode,
        received: CurrencyCode,
    },
}

/// Route gate. A valid signature proves the sender, not that the webhook
/// belongs to this merchant's route, so the configured route id is checked
/// independently.
pub fn check_route(
    notification: &PaymentNotification,
    config: &GatewayConfig,
) -> Result<(), Rejection> {
    if config.route_matches(&notification.route_id) {
        Ok(())
    } else {
        Err(Rejection::RouteMismatch {
            expected: config.route_id.clone(),
            received: notification.route_id.as_str().to_string(),
        })
    }
}

/// Validates the notification against the order snapshot and computes the
/// intended transition. Gates fire in a fixed order, first failure wins:
/// route, idempotency, amount, currency. The idempotency gate deliberately
/// short-circuits before amount/currency — a redelivery for a settled order
/// is acknowledged, not re-validated.
pub fn reconcile(
    notification: &PaymentNotification,
    order: &Order,
    config: &GatewayConfig,
) -> Result<Transition, Rejection> {
    check_route(notification, config)?;

    if order.status().is_terminal() {
        return Err(Rejection::AlreadyProcessed {
            status: order.status().clone(),
        });
    }

    let expected = order.total().amount();
    if notification.amount != expected {
        return Err(Rejection::AmountMismatch {
            expected,
            received: notification.amount,
        });
    }

    let expected = order.total().currency();
    if notification.currency != *expected {
        return Err(Rejection::CurrencyMismatch {
            expected: expected.clone(),
            received: notification.currency.clone(),
        });
    }

    Ok(match &notification.status {
        PaymentStatus::Completed => Transition::MarkProcessing,
        PaymentStatus::Cancelled => Transition::MarkCancelled,
        PaymentStatus::Expired => Transition::MarkFailed,
        PaymentStatus::Pending => Transition::KeepAwaiting,
        PaymentStatus::Unknown(s) => Transition::UnknownStatus(s.clone()),
    })
}
