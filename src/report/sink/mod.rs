//! Draw sinks: the only place draw commands touch a real surface.
//!
//! The generator lays a whole page out against `DrawSink::measure` first, then
//! replays the finished command list into the sink and collects its bytes.

pub mod pdf;

pub use pdf::PdfSink;

use serde::Serialize;

use crate::error::{ReportError, Result};
use crate::report::draw::DrawCommand;
use crate::report::layout::{HelveticaMetrics, PageGeometry, TextMeasure};

pub trait DrawSink {
    /// File extension of the produced artifact, without the dot.
    fn extension(&self) -> &'static str;

    /// Metrics used to wrap text for this surface.
    fn measure(&self) -> &dyn TextMeasure;

    fn begin_page(&mut self, page: &PageGeometry) -> Result<()>;

    fn draw(&mut self, command: &DrawCommand) -> Result<()>;

    /// Finish the document and hand back its bytes. The sink is reset afterwards.
    fn finish(&mut self) -> Result<Vec<u8>>;
}

/// Sink that keeps the display list and serialises it as JSON.
#[derive(Debug, Default)]
pub struct RecordingSink {
    page: Option<PageGeometry>,
    commands: Vec<DrawCommand>,
    metrics: HelveticaMetrics,
}

#[derive(Serialize)]
struct Recording<'a> {
    page: &'a PageGeometry,
    commands: &'a [DrawCommand],
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl DrawSink for RecordingSink {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn measure(&self) -> &dyn TextMeasure {
        &self.metrics
    }

    fn begin_page(&mut self, page: &PageGeometry) -> Result<()> {
        self.page = Some(*page);
        self.commands.clear();
        Ok(())
    }

    fn draw(&mut self, command: &DrawCommand) -> Result<()> {
        if self.page.is_none() {
            return Err(ReportError::render("draw called before begin_page"));
        }
        self.commands.push(command.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        let page = self
            .page
            .take()
            .ok_or_else(|| ReportError::render("finish called without a page"))?;
        let commands = std::mem::take(&mut self.commands);

        serde_json::to_vec_pretty(&Recording {
            page: &page,
            commands: &commands,
        })
        .map_err(|e| ReportError::render(format!("failed to serialise draw commands: {}", e)))
    }
}
