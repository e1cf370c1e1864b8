//! Crop Analysis Report Synthesizer
//!
//! Turns a crop-disease diagnosis into a single-page downloadable report.
//!
//! Module layout:
//! - `report/resolver/`: localized disease text through an ordered strategy cascade
//! - `report/layout/`: page geometry, metrics, wrapping and the layout cursor
//! - `report/sections/`: one renderer per report section (S1-S7)
//! - `report/sink/`: PDF and JSON outputs for the draw command list
//! - `report/generator.rs`: orchestrates sections into a `ReportArtifact`

pub mod config;
pub mod error;
pub mod report;

// Re-export commonly used types
pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use report::{
    ArtifactStore, ClassificationResponse, CropLabel, DiagnosisResult, DirectoryStore,
    DrawCommand, DrawSink, PdfSink, RecordingSink, ReportArtifact, ReportGenerator, SectionId,
    TextResolver,
};
