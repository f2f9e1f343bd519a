pub mod aggregator;
pub mod registration;
pub mod webhook;
