//! Domain model module declarations.

pub mod request;

pub use request::{
    Decision, DecisionAction, NewStoredRequest, PendingRequest, StoredRequest, Submission,
};
