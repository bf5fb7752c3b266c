use std::fmt;

const LOG_TARGET: &str = "issue_tally::diagnostics";

/// Pipeline stage a diagnostic was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Ingest,
    Snapshot,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fetch => write!(f, "fetch"),
            Stage::Ingest => write!(f, "ingest"),
            Stage::Snapshot => write!(f, "snapshot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)
    }
}

/// Non-fatal problems collected over one run.
///
/// Every stage keeps going after a failure; callers get the data that could
/// be produced together with this list and decide whether it is good enough.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem; it is echoed to the debug log as it happens
    pub fn push(&mut self, stage: Stage, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            stage,
            message: message.into(),
        };
        log::debug!(target: LOG_TARGET, "{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn count(&self, stage: Stage) -> usize {
        self.entries.iter().filter(|d| d.stage == stage).count()
    }
}
