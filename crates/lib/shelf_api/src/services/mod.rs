//! Request-independent service logic called by the handlers.

pub mod auth;
