#![forbid(unsafe_code)]

//! Request approval workflow server.
//!
//! A submitter posts a request, an approver accepts or rejects it, and
//! every connected observer sees the state change pushed over a
//! `WebSocket` channel. Pending requests live only in memory; approved
//! requests are written through to the durable store.

pub mod config;
pub mod errors;
pub mod http;
pub mod intake;
pub mod mediator;
pub mod models;
pub mod pending;
pub mod persistence;
pub mod realtime;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
