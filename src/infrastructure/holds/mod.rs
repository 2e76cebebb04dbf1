//! Hold store implementations

pub mod memory;

pub use memory::InMemoryHoldStore;
