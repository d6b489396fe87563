use {
    crate::domain::{
        error::GatewayError,
        order::{Order, OrderId, OrderStatus},
        store::{OrderStore, StoreFuture},
    },
    std::collections::HashMap,
    tokio::sync::RwLock,
};

/// Order store backed by process memory. Default for the binary and the
/// tests; a real deployment implements `OrderStore` against the shop's
/// backend instead.
#[derive(Default)]
pub struct InMemoryStore {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, order: Order) {
        self.orders.write().await.insert(order.id(), order);
    }
}

impl OrderStore for InMemoryStore {
    fn get(&self, id: OrderId) -> StoreFuture<'_, Option<Order>> {
        Box::pin(async move { Ok(self.orders.read().await.get(&id).cloned()) })
    }

    fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        note: String,
    ) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let mut orders = self.orders.write().await;
            let order = orders.get_mut(&id).ok_or(GatewayError::OrderNotFound(id))?;
            order.transition(status)?;
            order.push_note(note);
            Ok(())
        })
    }

    fn append_note(&self, id: OrderId, note: String) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let mut orders = self.orders.write().await;
            let order = orders.get_mut(&id).ok_or(GatewayError::OrderNotFound(id))?;
            order.push_note(note);
            Ok(())
        })
    }
}
