//! Mapty Store - Persistence adapters
//!
//! This crate provides implementations of the `KeyValueStore` port defined
//! in `mapty-core`: an in-memory store for tests and embedding, and a JSON
//! file store used by the command line host.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryKeyValueStore;
