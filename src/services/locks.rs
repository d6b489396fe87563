use {
    crate::domain::order::OrderId,
    dashmap::DashMap,
    std::sync::Arc,
    tokio::sync::{Mutex, OwnedMutexGuard},
};

/// Per-order critical sections. The guard is held from the idempotency read
/// until the status write, so two deliveries for the same order can never
/// both observe `AwaitingPayment`. Distinct orders never contend.
#[derive(Default)]
pub struct OrderLocks {
    locks: DashMap<OrderId, Arc<Mutex<()>>>,
}

impl OrderLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, id: OrderId) -> OwnedMutexGuard<()> {
        let cell = self.locks.entry(id).or_default().clone();
        cell.lock_owned().await
    }
}
