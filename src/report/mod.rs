//! Crop analysis report synthesis.
//!
//! Generates the single-page downloadable report for one diagnosis result:
//! resolver -> sections -> draw commands -> sink -> artifact.

pub mod artifact;
pub mod catalog;
pub mod draw;
pub mod generator;
pub mod layout;
pub mod resolver;
pub mod sections;
pub mod sink;
pub mod types;
pub mod utils;

pub use artifact::{artifact_file_name, ArtifactStore, DirectoryStore, ReportArtifact};
pub use draw::{DrawCommand, FontStyle, TextStyle};
pub use generator::ReportGenerator;
pub use resolver::{disease_key, LocaleStore, TextResolver};
pub use sections::{RenderedSection, SectionId};
pub use sink::{DrawSink, PdfSink, RecordingSink};
pub use types::{
    ClassificationResponse, CropLabel, DiagnosisResult, DiseaseField, DiseaseInfoBundle,
    FieldValue, SourceImage,
};
