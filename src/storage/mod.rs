pub mod models;
pub mod mongo;

pub use models::{MenuItem, Order, OrderLine, Restaurant, ORDER_STATUS_PLACED};
pub use mongo::Store;
