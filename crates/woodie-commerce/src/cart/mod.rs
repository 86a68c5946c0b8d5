//! Shopping cart: lines, quantities, the persisted store.

mod line;
mod quantity;
mod storage;
mod store;

pub use line::{CartItem, CartLine, DEFAULT_IMAGE};
pub use quantity::Quantity;
pub use storage::{CartStorage, MemoryCartStorage, CART_STORAGE_KEY};
pub use store::CartStore;

#[cfg(feature = "storage")]
pub use storage::KvCartStorage;
