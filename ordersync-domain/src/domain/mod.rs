pub mod aggregate;
pub mod commerce;
pub mod company;
pub mod error;

pub use aggregate::*;
pub use commerce::*;
pub use company::*;
pub use error::*;
