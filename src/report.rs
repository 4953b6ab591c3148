//! One line of output per visited entity.

use std::io::Write;

/// What gets reported for a single visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitRecord {
    pub name: String,
    pub influenced_by: Vec<String>,
    pub influenced: Vec<String>,
    /// Fetch error message when the page could not be resolved.
    pub error: Option<String>,
}

impl VisitRecord {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Receives a record each time a visit completes, before its neighbors are visited.
pub trait VisitReporter {
    fn report(&mut self, record: &VisitRecord);
}

/// Render a visit as a single line. Empty relationship lists are omitted.
pub fn format_visit(record: &VisitRecord) -> String {
    let mut line = format!("💎 lang {}", record.name);

    if let Some(error) = &record.error {
        line.push_str(&format!(" ⚠️ FetchFailed {}", error));
    }
    if !record.influenced_by.is_empty() {
        line.push_str(&format!(" 🚀 InfluencedBy {}", record.influenced_by.join(", ")));
    }
    if !record.influenced.is_empty() {
        line.push_str(&format!(" 🚀 Influenced {}", record.influenced.join(", ")));
    }

    line
}

/// Writes each visit as a line to the wrapped writer (stdout in the binary).
pub struct LineReporter<W: Write> {
    out: W,
}

impl<W: Write> LineReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl LineReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> VisitReporter for LineReporter<W> {
    fn report(&mut self, record: &VisitRecord) {
        let line = format_visit(record);
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            log::warn!("Failed to write visit line for {}: {}", record.name, e);
        }
    }
}

/// In-memory collector, handy for inspecting visit order.
impl VisitReporter for Vec<VisitRecord> {
    fn report(&mut self, record: &VisitRecord) {
        self.push(record.clone());
    }
}
