pub mod locks;
pub mod pipeline;
pub mod reconcile;
pub mod signature;
