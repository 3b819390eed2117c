//! Storage backends for the service layer.

pub mod memory;
