//! Analyzers over infrastructure definitions.

pub mod compliance;
