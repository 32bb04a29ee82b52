pub mod config;
pub mod models;
pub mod pipeline;
pub mod processor;
pub mod storage;

pub use pipeline::{CleaningPipeline, MergeReport, QualitySummary, concat_by_name, merge_rows};
