//! Terminal report rendering.
//!
//! Every renderer returns the complete text, one line per `\n`, so callers
//! decide where it goes and tests can compare it verbatim.

use crate::diff::model::{Chunk, ChunkTag, ModelDiff};
use crate::diff::total_fields;
use crate::errors::ExError;
use crossterm::style::Stylize;
use serde_json::{Map, Value};

const PASS_TEXT: &str = "PASS";
const FAIL_TEXT: &str = "FAIL";

/// Whether output carries ANSI styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Ansi,
    Plain,
}

/// Text styles used by the reports
#[derive(Debug, Clone, Copy)]
struct Palette {
    mode: ColorMode,
}

impl Palette {
    fn pass(&self) -> String {
        let badge = format!(" {} ", PASS_TEXT);
        match self.mode {
            ColorMode::Plain => badge,
            ColorMode::Ansi => badge.as_str().reverse().bold().green().to_string(),
        }
    }

    fn fail(&self) -> String {
        let badge = format!(" {} ", FAIL_TEXT);
        match self.mode {
            ColorMode::Plain => badge,
            ColorMode::Ansi => badge.as_str().reverse().bold().red().to_string(),
        }
    }

    fn title(&self, s: &str) -> String {
        match self.mode {
            ColorMode::Plain => s.to_string(),
            ColorMode::Ansi => s.bold().white().to_string(),
        }
    }

    fn text(&self, s: &str) -> String {
        match self.mode {
            ColorMode::Plain => s.to_string(),
            ColorMode::Ansi => s.grey().to_string(),
        }
    }

    fn dim(&self, s: &str) -> String {
        match self.mode {
            ColorMode::Plain => s.to_string(),
            ColorMode::Ansi => s.dim().to_string(),
        }
    }

    fn heading(&self, s: &str) -> String {
        let s = format!("  \u{2022} {}", s);
        match self.mode {
            ColorMode::Plain => s,
            ColorMode::Ansi => s.as_str().bold().red().to_string(),
        }
    }

    fn chunk(&self, chunk: &Chunk) -> String {
        let prefix = match chunk.tag {
            ChunkTag::Unchanged => "      ",
            ChunkTag::Added => "    + ",
            ChunkTag::Removed => "    - ",
        };
        let body = chunk
            .value
            .trim_end()
            .split('\n')
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n");
        match (self.mode, chunk.tag) {
            (ColorMode::Plain, _) => body,
            (ColorMode::Ansi, ChunkTag::Unchanged) => body.as_str().grey().to_string(),
            (ColorMode::Ansi, ChunkTag::Added) => body.as_str().green().to_string(),
            (ColorMode::Ansi, ChunkTag::Removed) => body.as_str().red().to_string(),
        }
    }

    fn totals(&self, out: &mut String, models: usize, fields: usize) {
        push_line(
            out,
            format!("{} {}", self.title("Models:"), self.text(&format!("\t{} total", models))),
        );
        push_line(
            out,
            format!("{} {}", self.title("Fields:"), self.text(&format!("\t{} total", fields))),
        );
    }
}

fn push_line(out: &mut String, line: impl AsRef<str>) {
    out.push_str(line.as_ref());
    out.push('\n');
}

/// Render the comparison report for a list of model diffs.
///
/// Equal models get a single PASS line. Unequal models get a FAIL line followed
/// by the model delta (when the attributes differ) and the delta of every
/// unequal field. Totals close the report.
pub fn render_diff_report(diffs: &[ModelDiff], mode: ColorMode) -> String {
    let p = Palette { mode };
    let mut out = String::new();

    for diff in diffs {
        let tag = p.dim(&format!("model/{}", diff.api_key));
        let badge = if diff.equal { p.pass() } else { p.fail() };
        push_line(&mut out, format!("{} {} {}", badge, tag, p.title(&diff.label)));
        if diff.equal {
            continue;
        }

        if !diff.attributes_equal {
            push_line(
                &mut out,
                p.heading(&format!("model/{} > {}", diff.api_key, diff.label)),
            );
            for chunk in &diff.delta {
                push_line(&mut out, p.chunk(chunk));
            }
        }

        for field in diff.unequal_fields() {
            push_line(
                &mut out,
                p.heading(&format!(
                    "model/{}/field/{} > {}",
                    diff.api_key, field.api_key, field.label
                )),
            );
            for chunk in &field.delta {
                push_line(&mut out, p.chunk(chunk));
            }
        }
    }

    push_line(&mut out, "");
    p.totals(&mut out, diffs.len(), total_fields(diffs));
    out
}

/// Render the confirmation printed after a successful pull
pub fn render_pull_success(models: usize, fields: usize, filename: &str, mode: ColorMode) -> String {
    let p = Palette { mode };
    let mut out = String::new();
    push_line(
        &mut out,
        format!("{} {}", p.pass(), p.title("Pulled all models and fields")),
    );
    p.totals(&mut out, models, fields);
    push_line(
        &mut out,
        p.text(&format!("Results written to \"{}\".", filename)),
    );
    out
}

/// Render the diagnostic for a failed remote fetch.
///
/// The payload lists `message`, `statusCode` and `statusText`; status entries
/// are omitted when the failure never reached the server.
pub fn render_pull_failure(descriptor: &str, err: &ExError, mode: ColorMode) -> String {
    let p = Palette { mode };
    let mut payload = Map::new();
    payload.insert("message".into(), Value::String(err.message().to_string()));
    if let Some(code) = err.status_code() {
        payload.insert("statusCode".into(), Value::from(code));
    }
    if let Some(text) = err.status_text() {
        payload.insert("statusText".into(), Value::String(text.to_string()));
    }

    let mut out = String::new();
    push_line(
        &mut out,
        format!(
            "{} {}",
            p.fail(),
            p.title(&format!(
                "Cannot pull models and fields with token \"{}\"",
                descriptor
            ))
        ),
    );
    push_line(&mut out, p.text(&pretty(&Value::Object(payload))));
    out
}

/// Render the diagnostic for a snapshot that could not be written
pub fn render_write_failure(filename: &str, err: &ExError, mode: ColorMode) -> String {
    let p = Palette { mode };
    let payload = err.details().cloned().unwrap_or_else(|| {
        let mut map = Map::new();
        map.insert("message".into(), Value::String(err.message().to_string()));
        Value::Object(map)
    });

    let mut out = String::new();
    push_line(
        &mut out,
        format!(
            "{} {}",
            p.fail(),
            p.title(&format!("Cannot write to file \"{}\"", filename))
        ),
    );
    push_line(&mut out, p.text(&pretty(&payload)));
    out
}

/// Render the diagnostic for models that could not be normalized
pub fn render_normalize_failure(descriptor: &str, err: &ExError, mode: ColorMode) -> String {
    let p = Palette { mode };
    let mut payload = Map::new();
    payload.insert("code".into(), Value::String(err.code().to_string()));
    if let Some(entity) = err.entity_key() {
        payload.insert("entity".into(), Value::String(entity.to_string()));
    }
    payload.insert("message".into(), Value::String(err.message().to_string()));

    let mut out = String::new();
    push_line(
        &mut out,
        format!(
            "{} {}",
            p.fail(),
            p.title(&format!("Cannot normalize models from \"{}\"", descriptor))
        ),
    );
    push_line(&mut out, p.text(&pretty(&Value::Object(payload))));
    out
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
