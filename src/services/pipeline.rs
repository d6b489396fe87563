use {
    crate::domain::{
        config::GatewayConfig,
        error::GatewayError,
        notification::PaymentNotification,
        order::{OrderId, OrderStatus},
        store::OrderStore,
    },
    crate::services::{
        locks::OrderLocks,
        reconcile::{self, Rejection, Transition},
    },
    std::{future::Future, time::Duration},
};

/// Terminal outcome of one accepted webhook, consumed by the HTTP adapter.
/// Every variant answers success-shaped; failures travel as `GatewayError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// A terminal transition was applied.
    Applied {
        order_id: OrderId,
        status: OrderStatus,
    },
    /// Payment still pending; order untouched.
    PendingAcknowledged(OrderId),
    /// Unrecognized payment status; order untouched, note recorded.
    UnknownStatus { order_id: OrderId, status: String },
    /// Redelivery for a settled order; no-op so the sender stops retrying.
    AlreadyProcessed(OrderId),
}

impl ProcessResult {
    /// Minimal acknowledgement token for the response body.
    pub fn wire_status(&self) -> &'static str {
        match self {
            Self::Applied { .. } => "applied",
            Self::PendingAcknowledged(_) => "pending",
            Self::UnknownStatus { .. } => "unknown_status",
            Self::AlreadyProcessed(_) => "already_processed",
        }
    }
}

/// Validate a notification against its order and drive the status machine.
///
/// The per-order lock spans the idempotency read through the status write;
/// concurrent redeliveries serialize here and the loser sees a settled
/// order. Store I/O runs under the config's timeout so a stuck backend
/// surfaces as a retryable error instead of a hung request.
pub async fn process_webhook(
    store: &dyn OrderStore,
    locks: &OrderLocks,
    config: &GatewayConfig,
    notification: &PaymentNotification,
) -> Result<ProcessResult, GatewayError> {
    // Foreign-route webhooks are rejected before the store is touched.
    if !config.route_matches(&notification.route_id) {
        tracing::error!(route_id = %notification.route_id, "webhook route mismatch");
        return Err(GatewayError::RouteMismatch {
            expected: config.route_id.clone(),
            received: notification.route_id.as_str().to_string(),
        });
    }

    let order_id = notification.external_id.order_id();
    let _guard = locks.acquire(order_id).await;

    let order = with_timeout(config.store_timeout, store.get(order_id))
        .await?
        .ok_or(GatewayError::OrderNotFound(order_id))?;

    with_timeout(
        config.store_timeout,
        store.append_note(order_id, "webhook notification received".into()),
    )
    .await?;

    match reconcile::reconcile(notification, &order, config) {
        Ok(transition) => apply(store, config, order_id, transition).await,

        Err(Rejection::AlreadyProcessed { status }) => {
            with_timeout(
                config.store_timeout,
                store.append_note(
                    order_id,
                    "webhook redelivery ignored: order already settled".into(),
                ),
            )
            .await?;
            tracing::info!(%order_id, %status, "webhook for settled order, acknowledging");
            Ok(ProcessResult::AlreadyProcessed(order_id))
        }

        // Both values go to the audit trail before the reject; manual
        // reconciliation needs them.
        Err(Rejection::AmountMismatch { expected, received }) => {
            let note =
                format!("Payment amount mismatch. Expected: {expected}, Received: {received}");
            with_timeout(config.store_timeout, store.append_note(order_id, note)).await?;
            tracing::error!(%order_id, %expected, %received, "payment amount mismatch");
            Err(GatewayError::AmountMismatch { expected, received })
        }

        Err(Rejection::CurrencyMismatch { expected, received }) => {
            let note =
                format!("Payment currency mismatch. Expected: {expected}, Received: {received}");
            with_timeout(config.store_timeout, store.append_note(order_id, note)).await?;
            tracing::error!(%order_id, %expected, %received, "payment currency mismatch");
            Err(GatewayError::CurrencyMismatch { expected, received })
        }

        Err(Rejection::RouteMismatch { expected, received }) => {
            tracing::error!(%order_id, "webhook route mismatch");
            Err(GatewayError::RouteMismatch { expected, received })
        }
    }
}

/// The status transitioner: performs exactly the change the engine computed
/// and records the outcome on the order.
async fn apply(
    store: &dyn OrderStore,
    config: &GatewayConfig,
    order_id: OrderId,
    transition: Transition,
) -> Result<ProcessResult, GatewayError> {
    match transition {
        Transition::MarkProcessing => {
            finalize(
                store,
                config,
                order_id,
                OrderStatus::Processing,
                "Payment completed. Preparing order for fulfilment.",
            )
            .await
        }
        Transition::MarkCancelled => {
            finalize(
                store,
                config,
                order_id,
                OrderStatus::Cancelled,
                "Payment cancelled by the provider.",
            )
            .await
        }
        Transition::MarkFailed => {
            finalize(
                store,
                config,
                order_id,
                OrderStatus::Failed,
                "Payment expired at the provider.",
            )
            .await
        }
        Transition::KeepAwaiting => {
            tracing::info!(%order_id, "payment still pending, order left awaiting");
            Ok(ProcessResult::PendingAcknowledged(order_id))
        }
        Transition::UnknownStatus(status) => {
            with_timeout(
                config.store_timeout,
                store.append_note(
                    order_id,
                    format!("Unknown payment status received: {status}"),
                ),
            )
            .await?;
            tracing::warn!(%order_id, %status, "unknown payment status, order left in place");
            Ok(ProcessResult::UnknownStatus { order_id, status })
        }
    }
}

async fn finalize(
    store: &dyn OrderStore,
    config: &GatewayConfig,
    order_id: OrderId,
    status: OrderStatus,
    note: &str,
) -> Result<ProcessResult, GatewayError> {
    with_timeout(
        config.store_timeout,
        store.update_status(order_id, status.clone(), note.to_string()),
    )
    .await?;
    tracing::info!(%order_id, %status, "order status transition applied");
    Ok(ProcessResult::Applied { order_id, status })
}

async fn with_timeout<T>(
    limit: Duration,
    fut: impl Future<Output = Result<T, GatewayError>>,
) -> Result<T, GatewayError> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| GatewayError::StoreTimeout)?
}
