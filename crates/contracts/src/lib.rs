//! Shared domain contracts for the promotions service.
//!
//! The backend depends on this crate for the validated in-memory entity,
//! its transport representation and the validation error taxonomy. Nothing
//! here knows about persistence or HTTP.

pub mod promotion;
