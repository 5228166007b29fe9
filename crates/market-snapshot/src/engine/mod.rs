//! Snapshot engine
//!
//! The pipeline itself plus the record it returns.

pub mod analysis_engine;
pub mod result;

pub use analysis_engine::MarketAnalyzer;
pub use result::AnalysisResult;
