mod registration;
mod webhook;
