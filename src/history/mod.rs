//! Saving questions and serving history queries to the presentation layer.
//!
//! - [`FileHistory`] - facade over a [`RecordStore`](crate::store::RecordStore)
//! - [`Artifact`] / [`ArtifactSink`] - documents handed to a "download" capability

pub mod artifact;
pub mod service;

pub use artifact::{Artifact, ArtifactSink, DirectorySink, MemorySink};
pub use service::FileHistory;
