//! Real-time notification fan-out over `WebSocket`.

pub mod events;
pub mod hub;
pub mod ws;

pub use events::{DecisionNotice, ServerEvent};
pub use hub::{ClientHub, ClientId};
