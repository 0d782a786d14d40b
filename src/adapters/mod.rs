// Adapters layer: concrete implementations for external systems.

pub mod dconf;
pub mod memory;
