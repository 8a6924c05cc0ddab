//! Shared fixtures for abalone tests: sample request bodies and a writer that
//! materializes model artifacts in a temporary directory.

pub mod artifacts;
pub mod payloads;

pub use artifacts::ArtifactFixture;
