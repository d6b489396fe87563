use {
    super::error::GatewayError,
    super::order::{Order, OrderId, OrderStatus},
    std::{future::Future, pin::Pin},
};

pub type StoreFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, GatewayError>> + Send + 'a>>;

/// The order store belongs to the host shop; this is the exact surface the
/// gateway needs from it. The in-memory implementation in `infra::memory`
/// backs the default binary and the tests.
pub trait OrderStore: Send + Sync {
    fn get(&self, id: OrderId) -> StoreFuture<'_, Option<Order>>;

    /// Applies the status change and appends `note` in one step. Fails on an
    /// unknown order or a non-monotonic transition.
    fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        note: String,
    ) -> StoreFuture<'_, ()>;

    fn append_note(&self, id: OrderId, note: String) -> StoreFuture<'_, ()>;
}
