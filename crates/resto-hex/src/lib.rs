//! resto-hex: hexagonal ordering API library (core + inbound HTTP)

pub mod config;
pub mod errors;

pub mod application;

pub use resto_types::{domain, ports};

pub mod inbound; // HTTP adapter (sessions + server + handlers)
