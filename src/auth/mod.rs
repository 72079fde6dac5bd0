//! Access control for the protected site areas.
//!
//! Token issuance and verification belong to the identity provider; this
//! module only consumes verified [`Claims`] through [`TokenVerifier`].

pub mod gate;

pub use gate::{authorize, gate, Claims, GateDecision, TokenVerifier};
