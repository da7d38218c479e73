//! The progress-and-scoring engine: mastery transitions, lesson star
//! ratings, account statistics, and the attempt ingestion path that ties
//! them to storage.

pub mod ingest;
pub mod mastery;
pub mod stars;
pub mod stats;
