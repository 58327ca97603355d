//! Range import pipeline: fetch, filter, normalize, replace.

pub mod error;
pub mod locks;
pub mod options;
pub mod range_sync;

pub use error::PipelineError;
pub use options::PipelineOptions;
pub use range_sync::RangeSyncPipeline;
