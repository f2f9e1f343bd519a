pub mod domain;
pub mod logic;
pub mod middleware;
pub mod router;
pub mod server;
