//! docgraph - Build documentation graphs from typed programs
//!
//! Walks the exported surface of a program through a type oracle and
//! produces a tree of documentation pages, each holding named sections of
//! entries, serialized as JSON for a renderer.

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod naming;
pub mod oracle;
pub mod registry;
pub mod serialize;

// Re-export main types
pub use config::Config;
pub use error::{Error, Result};
pub use generator::{generate, Generation, Generator, GeneratorOptions};
pub use oracle::{ProgramSnapshot, TypeOracle};
pub use serialize::{serialize, Documentation, Metadata};
