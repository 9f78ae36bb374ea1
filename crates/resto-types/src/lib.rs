//! resto-types: domain model and ports for the restaurant ordering backend.

pub mod domain;
pub mod ports;
