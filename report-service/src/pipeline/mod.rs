use std::{
    fs,
    path::{Path, PathBuf},
};

use generation_domain::{MissingFactor, ReferenceData};

use crate::{sinks::ResultXmlSink, sources, transform};

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error(transparent)]
    MissingFactor(#[from] MissingFactor),
    #[error("result serialization failed: {0}")]
    Serialize(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-file processing pipeline: parse, calculate, write.
///
/// The write stage only runs after both parse and calculate succeed, so
/// a failed file never leaves a partial result document behind.
pub struct Pipeline {
    reference: ReferenceData,
    sink: ResultXmlSink,
}

impl Pipeline {
    pub fn new<P: Into<PathBuf>>(reference: ReferenceData, output_dir: P) -> Self {
        Self {
            reference,
            sink: ResultXmlSink::new(output_dir),
        }
    }

    /// Processes one input file and returns the path of the written
    /// result document. The caller decides what happens to the input
    /// file afterwards.
    pub fn process(&self, input: &Path) -> Result<PathBuf, PipelineError> {
        let raw = fs::read_to_string(input)?;

        let generators = match sources::parse_generators(&raw) {
            Ok(generators) => generators,
            Err(e) => {
                metrics::counter!("report_parse_errors_total").increment(1);
                return Err(e);
            }
        };

        let file_metrics = transform::calculate(&generators, &self.reference)?;

        self.sink.write(&file_metrics, input)
    }
}
