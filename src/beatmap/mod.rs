//! Beatmap output types
//!
//! The final note list plus the document and metadata shapes a host game or
//! serializer consumes. Field names serialize to the established beatmap JSON
//! schema (`hitTime`, `type`, `spawnPointIndex`, ...).

pub mod result;

pub use result::{Beatmap, BeatmapResult, GenerationMetadata, Note};
