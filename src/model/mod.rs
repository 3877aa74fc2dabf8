//! Pure data structures (DTOs) exchanged with the catalog/order service, plus the
//! client-side cart types built on top of them.

pub mod cart;
pub mod order;
pub mod product;
pub mod session;

pub use cart::*;
pub use order::*;
pub use product::*;
pub use session::*;
