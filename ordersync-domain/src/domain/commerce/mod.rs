mod customer;
mod event;
mod order;

pub use customer::*;
pub use event::*;
pub use order::*;
