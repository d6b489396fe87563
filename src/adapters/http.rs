use {
    crate::{
        AppState,
        adapters::checkout,
        domain::{
            error::GatewayError,
            notification::PaymentNotification,
            order::{OrderId, OrderStatus},
            webhook::WebhookRequest,
        },
        services::{pipeline, signature},
    },
    axum::{
        Json, Router,
        body::Bytes,
        extract::{Path, State},
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Response},
        routing::{get, post},
    },
    uuid::Uuid,
};

pub const SIGNATURE_HEADER: &str = "x-payload-signature";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/webhook", post(webhook_handler))
        .route("/checkout/{order_id}", post(checkout_handler))
        .with_state(state)
}

#[tracing::instrument(
    name = "webhook",
    skip_all,
    fields(delivery_id = tracing::field::Empty, order_id = tracing::field::Empty)
)]
pub async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    let config = state.config.snapshot();

    let signature_header = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let request = WebhookRequest::new(body.to_vec(), signature_header);

    tracing::Span::current().record("delivery_id", tracing::field::display(Uuid::now_v7()));

    // Everything is validated before anything is acknowledged; an early 200
    // would defeat the signature check and break the sender's retries.
    if !signature::verify(request.body(), request.signature(), &config.public_key_pem) {
        tracing::error!("webhook signature verification failed");
        return Err(GatewayError::Signature.into());
    }

    let notification = PaymentNotification::parse(request.body()).map_err(GatewayError::from)?;
    tracing::Span::current().record(
        "order_id",
        tracing::field::display(notification.external_id.order_id()),
    );

    let result =
        pipeline::process_webhook(&*state.store, &state.locks, &config, &notification).await?;
    Ok(Json(serde_json::json!({ "status": result.wire_status() })))
}

/// Shop-side checkout: marks the order awaiting payment and hands back the
/// payment page redirect.
#[tracing::instrument(name = "checkout", skip_all, fields(order_id = tracing::field::Empty))]
pub async fn checkout_handler(
    State(state): State<AppState>,
    Path(order_id): Path<u64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let config = state.config.snapshot();
    let order_id = OrderId::new(order_id);
    tracing::Span::current().record("order_id", tracing::field::display(order_id));

    let order = tokio::time::timeout(config.store_timeout, state.store.get(order_id))
        .await
        .map_err(|_| GatewayError::StoreTimeout)??
        .ok_or(GatewayError::OrderNotFound(order_id))?;

    let redirect = checkout::build_redirect(&order, &config, chrono::Utc::now())?;

    tokio::time::timeout(
        config.store_timeout,
        state.store.update_status(
            order_id,
            OrderStatus::AwaitingPayment,
            "Awaiting payment".into(),
        ),
    )
    .await
    .map_err(|_| GatewayError::StoreTimeout)??;

    tracing::info!("checkout redirect issued");
    Ok(Json(serde_json::json!({ "redirect": redirect.to_string() })))
}

/// Adapter-layer wrapper so the domain error can carry an HTTP shape.
/// Rich diagnostic detail stays in the logs and order notes; the caller
/// only ever sees a coarse code.
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self.0 {
            GatewayError::Signature => (
                StatusCode::UNAUTHORIZED,
                "signature_invalid",
                "signature verification failed".to_string(),
            ),
            GatewayError::Parse(e) => (StatusCode::BAD_REQUEST, "bad_payload", e.to_string()),
            GatewayError::RouteMismatch { .. } => (
                StatusCode::BAD_REQUEST,
                "route_mismatch",
                "route id mismatch".to_string(),
            ),
            GatewayError::AmountMismatch { .. } => (
                StatusCode::BAD_REQUEST,
                "amount_mismatch",
                "payment amount mismatch".to_string(),
            ),
            GatewayError::CurrencyMismatch { .. } => (
                StatusCode::BAD_REQUEST,
                "currency_mismatch",
                "payment currency mismatch".to_string(),
            ),
            GatewayError::OrderNotFound(_) => (
                StatusCode::NOT_FOUND,
                "order_not_found",
                "order not found".to_string(),
            ),
            GatewayError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg.clone(),
            ),
            GatewayError::Disabled => (
                StatusCode::SERVICE_UNAVAILABLE,
                "gateway_disabled",
                "gateway is disabled".to_string(),
            ),
            GatewayError::RouteNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "gateway_unconfigured",
                "route id is not configured".to_string(),
            ),
            GatewayError::StoreTimeout => {
                tracing::error!("order store timed out");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "store_timeout",
                    "temporarily unavailable, retry later".to_string(),
                )
            }
            GatewayError::Store(err) => {
                tracing::error!("store error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error_code": error_code,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}
