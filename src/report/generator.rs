//! Report Generator
//!
//! The document assembler. Runs every section in `SECTIONS` order against one
//! layout cursor, then replays the collected draw commands into a sink and
//! wraps the bytes in a `ReportArtifact`.
//!
//! Public API (consumed by bin/generate_report.rs):
//! - ReportGenerator::new(config, resolver) -> Self
//! - ReportGenerator::from_config(config) -> Result<Self>
//! - ReportGenerator::synthesize(result, crop) -> Result<ReportArtifact>
//!
//! Nothing is persisted here. Saving is a separate step (`ReportArtifact::save`)
//! so a failed save can be retried without rendering again.

use chrono::{NaiveDate, Utc};

use crate::config::ReportConfig;
use crate::error::Result;
use crate::report::artifact::{artifact_file_name, ReportArtifact};
use crate::report::layout::LayoutCursor;
use crate::report::resolver::{LocaleStore, TextResolver};
use crate::report::sections::{RenderedSection, ReportContext, SECTIONS};
use crate::report::sink::{DrawSink, PdfSink};
use crate::report::types::{CropLabel, DiagnosisResult};

pub struct ReportGenerator {
    config: ReportConfig,
    resolver: TextResolver,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig, resolver: TextResolver) -> Self {
        Self { config, resolver }
    }

    /// Builtin catalogue, overlaid with `config.locale_file` when one is set.
    pub fn from_config(config: ReportConfig) -> Result<Self> {
        let mut locale = LocaleStore::builtin();
        if let Some(path) = &config.locale_file {
            locale = locale.overlay(LocaleStore::load(path)?);
            tracing::info!("Locale overlay loaded from {}", path.display());
        }
        Ok(Self::new(config, TextResolver::new(locale)))
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn resolver(&self) -> &TextResolver {
        &self.resolver
    }

    /// Render a PDF report dated today (UTC).
    pub fn synthesize(&self, result: &DiagnosisResult, crop: CropLabel) -> Result<ReportArtifact> {
        self.synthesize_on(result, crop, Utc::now().date_naive())
    }

    /// Render a PDF report for a fixed date.
    pub fn synthesize_on(
        &self,
        result: &DiagnosisResult,
        crop: CropLabel,
        date: NaiveDate,
    ) -> Result<ReportArtifact> {
        let mut sink = PdfSink::new();
        self.synthesize_with(&mut sink, result, crop, date)
    }

    /// Render into any sink. The sink's extension names the artifact.
    pub fn synthesize_with(
        &self,
        sink: &mut dyn DrawSink,
        result: &DiagnosisResult,
        crop: CropLabel,
        date: NaiveDate,
    ) -> Result<ReportArtifact> {
        let sections = self.render_sections(sink, result, crop, date)?;

        sink.begin_page(&self.config.page)?;
        for command in sections.iter().flat_map(|s| &s.commands) {
            sink.draw(command)?;
        }
        let bytes = sink.finish()?;

        let file_name = artifact_file_name(date, sink.extension());
        tracing::info!(
            "Synthesized {} for {} ({}, {} sections, {} bytes)",
            file_name,
            crop,
            if result.is_healthy { "healthy" } else { result.disease_label.as_str() },
            sections.iter().filter(|s| !s.is_empty()).count(),
            bytes.len()
        );

        Ok(ReportArtifact {
            file_name,
            bytes,
            sections,
        })
    }

    /// Lay out every section against the sink's metrics without drawing.
    pub fn render_sections(
        &self,
        sink: &dyn DrawSink,
        result: &DiagnosisResult,
        crop: CropLabel,
        date: NaiveDate,
    ) -> Result<Vec<RenderedSection>> {
        let ctx = ReportContext {
            result,
            crop,
            resolver: &self.resolver,
            config: &self.config,
            generated_on: date,
        };
        let mut cursor = LayoutCursor::new(self.config.page, sink.measure());

        let mut sections = Vec::with_capacity(SECTIONS.len());
        for (id, render) in SECTIONS {
            let commands = render(&ctx, &mut cursor)?;
            tracing::debug!(
                "Section {:?}: {} commands, cursor at y={:.1}",
                id,
                commands.len(),
                cursor.y()
            );
            sections.push(RenderedSection { id, commands });
        }

        if cursor.overflowed() {
            tracing::warn!("Report content was clamped at the bottom of the page");
        }
        Ok(sections)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(ReportConfig::default(), TextResolver::default())
    }
}
