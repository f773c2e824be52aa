//! Log redaction for patient inputs.
//!
//! The seven assessment inputs are clinical data about a real patient. Log
//! lines pass through [`RedactingMakeWriter`], which rewrites any
//! `field=value` or `field: value` pair for those inputs to
//! `field=[REDACTED]` before it reaches the sink. This covers both structured
//! tracing fields and `Debug` output of `RiskAssessmentInput`.
//!
//! Set `AKI_RISK_LOG_INPUTS=true` to keep the raw values (local debugging
//! only).

use regex::Regex;
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

/// Disables redaction when truthy.
pub const LOG_INPUTS_ENV: &str = "AKI_RISK_LOG_INPUTS";

/// Overrides [`DEFAULT_REDACT_MAX_BYTES`].
pub const REDACT_MAX_BYTES_ENV: &str = "AKI_RISK_REDACT_MAX_BYTES";

/// Maximum number of bytes redacted per line; the rest is dropped.
const DEFAULT_REDACT_MAX_BYTES: usize = 16 * 1024;

const REPLACEMENT: &str = "$field$sep[REDACTED]";

static INPUT_PATTERN: OnceLock<Regex> = OnceLock::new();

fn input_pattern() -> &'static Regex {
    INPUT_PATTERN.get_or_init(|| {
        Regex::new(
            r"\b(?P<field>ckd_combined|vol_overload|dysnatremia|hyperlactatemia|hypotension|nephrotoxin|apache_std)(?P<sep>\s*[=:]\s*)[^\s,;})\]]+",
        )
        .expect("Valid regex")
    })
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_redact_bytes() -> usize {
    std::env::var(REDACT_MAX_BYTES_ENV)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_REDACT_MAX_BYTES)
}

fn parse_bool_env(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}

/// Replace assessment input values in the first `max_bytes` of `input` with
/// `[REDACTED]`.
#[must_use]
fn redact_with_limit(input: &str, max_bytes: usize) -> String {
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut out = input_pattern().replace_all(prefix, REPLACEMENT).into_owned();
    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// A `tracing_subscriber` writer factory that redacts patient inputs from
/// formatted log lines.
#[derive(Debug, Clone)]
pub struct RedactingMakeWriter<M> {
    inner: M,
    enabled: bool,
    max_bytes: usize,
}

impl<M> RedactingMakeWriter<M> {
    /// Wrap `inner`; redaction is on unless `AKI_RISK_LOG_INPUTS` is set.
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            enabled: !parse_bool_env(LOG_INPUTS_ENV),
            max_bytes: max_redact_bytes(),
        }
    }

    #[must_use]
    pub fn is_redacting(&self) -> bool {
        self.enabled
    }
}

/// Line-buffered writer produced by [`RedactingMakeWriter`].
pub struct RedactingWriter<W> {
    inner: W,
    enabled: bool,
    max_bytes: usize,
    buffer: Vec<u8>,
}

impl<W> RedactingWriter<W>
where
    W: std::io::Write,
{
    fn write_redacted(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        let mut out = if self.enabled {
            redact_with_limit(&text, self.max_bytes)
        } else {
            text.into_owned()
        };
        // Truncation can cut the terminator.
        if bytes.ends_with(b"\n") && !out.ends_with('\n') {
            out.push('\n');
        }
        self.inner.write_all(out.as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_redacted(&line)?;
        }
        Ok(())
    }
}

impl<W> std::io::Write for RedactingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        self.flush_lines()?;

        // What remains is one unterminated line; cut it off once it grows
        // past the cap.
        if self.buffer.len() > self.max_bytes.saturating_mul(2) {
            let mut pending = std::mem::take(&mut self.buffer);
            pending.push(b'\n');
            self.write_redacted(&pending)?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;

        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_redacted(&pending)?;
        }

        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for RedactingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            inner: self.inner.make_writer(),
            enabled: self.enabled,
            max_bytes: self.max_bytes,
            buffer: Vec::new(),
        }
    }
}
