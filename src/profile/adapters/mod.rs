//! Adapter implementations of profile ports.

pub mod memory;
pub mod postgres;
