mod json;
mod string;

pub use json::*;
pub use string::*;
