//! Presentation of resolved repositories

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;
use tracing::error;

use crate::input::InputError;
use crate::release::aggregate::LatestVersionSet;
use crate::release::resolver::{RepoOutcome, ResultSink};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `latest versions of owner/name: [2.1.3 1.9.9]`
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonLine<'a> {
    Resolved {
        repository: String,
        versions: &'a LatestVersionSet,
    },
    Failed {
        #[serde(skip_serializing_if = "Option::is_none")]
        repository: Option<String>,
        error: String,
    },
}

/// Rendered line and whether it belongs on the error stream
pub fn render(outcome: &RepoOutcome, format: OutputFormat) -> (String, bool) {
    match format {
        OutputFormat::Text => render_text(outcome),
        OutputFormat::Json => render_json(outcome),
    }
}

fn render_text(outcome: &RepoOutcome) -> (String, bool) {
    match outcome {
        RepoOutcome::Resolved { target, versions } => {
            (format!("latest versions of {}: {}", target, versions), false)
        }
        RepoOutcome::Failed { target, error } => {
            (format!("error resolving {}: {}", target, error), true)
        }
        RepoOutcome::Invalid(e) => (format!("error in repository list: {}", e), true),
    }
}

fn render_json(outcome: &RepoOutcome) -> (String, bool) {
    let (line, is_error) = match outcome {
        RepoOutcome::Resolved { target, versions } => (
            JsonLine::Resolved {
                repository: target.full_name(),
                versions,
            },
            false,
        ),
        RepoOutcome::Failed { target, error } => (
            JsonLine::Failed {
                repository: Some(target.full_name()),
                error: error.to_string(),
            },
            true,
        ),
        RepoOutcome::Invalid(e) => (
            JsonLine::Failed {
                repository: None,
                error: invalid_message(e),
            },
            true,
        ),
    };

    let rendered = serde_json::to_string(&line).unwrap_or_else(|e| {
        format!(r#"{{"error":"failed to serialize outcome: {}"}}"#, e)
    });
    (rendered, is_error)
}

fn invalid_message(e: &InputError) -> String {
    format!("invalid repository row: {}", e)
}

/// Sink writing successes to `out` and failures to `err`
pub struct WriterSink<O: Write, E: Write> {
    out: O,
    err: E,
    format: OutputFormat,
}

impl<O: Write, E: Write> WriterSink<O, E> {
    pub fn new(out: O, err: E, format: OutputFormat) -> Self {
        Self { out, err, format }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl WriterSink<std::io::Stdout, std::io::Stderr> {
    pub fn stdio(format: OutputFormat) -> Self {
        Self::new(std::io::stdout(), std::io::stderr(), format)
    }
}

impl<O: Write, E: Write> ResultSink for WriterSink<O, E> {
    fn report(&mut self, outcome: RepoOutcome) {
        let (line, is_error) = render(&outcome, self.format);
        let writer: &mut dyn Write = if is_error { &mut self.err } else { &mut self.out };
        let _ = writeln!(writer, "{}", line)
            .and_then(|_| writer.flush())
            .inspect_err(|e| error!("Failed to write output: {}", e));
    }
}
