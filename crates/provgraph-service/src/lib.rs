//! # provgraph-service
//!
//! The request/response boundary over the lineage store.
//!
//! The hosting service (originally REST) is an external collaborator; this
//! crate is the transport-agnostic data contract it speaks: request DTOs,
//! boundary validation, and wire-shaped transition records. Transport,
//! serialization framing, and authentication stay outside.

pub mod record;
pub mod request;
pub mod service;

pub use record::{InputMappingRecord, TransitionRecord};
pub use request::{AddTransitionRequest, AddTransitionSetRequest};
pub use service::{
    add_transition, add_transition_set, contributes_to, derived_from, get_transition,
};
