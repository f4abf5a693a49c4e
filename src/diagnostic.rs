use crate::frontend::SourceLocation;
use crate::options::ReconstructOptions;

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Debug,
    Warning,
    Error,
}

/// Advisory message produced while reconstructing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub source: &'static str, // component that reported it
    pub level: DiagnosticLevel,
    pub message: String,
    pub location: Option<SourceLocation>,
}

/// Diagnostic engine for collecting advisory diagnostics.
///
/// Everything reported here is also forwarded to the `log` facade. Whether a
/// diagnostic is additionally recorded depends on the engine's flags.
#[derive(Debug)]
pub struct DiagnosticEngine {
    pub diagnostics: Vec<Diagnostic>,
    pub warnings_as_errors: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl Default for DiagnosticEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticEngine {
    pub fn new() -> Self {
        DiagnosticEngine {
            diagnostics: Vec::new(),
            warnings_as_errors: false,
            quiet: false,
            verbose: false,
        }
    }

    pub fn from_options(options: &ReconstructOptions) -> Self {
        DiagnosticEngine {
            diagnostics: Vec::new(),
            warnings_as_errors: options.warnings_as_errors,
            quiet: options.quiet,
            verbose: options.verbose,
        }
    }

    pub fn report_debug(&mut self, source: &'static str, message: String, location: Option<SourceLocation>) {
        log::debug!("{}: {}", source, message);
        if !self.verbose {
            return;
        }
        self.record(source, DiagnosticLevel::Debug, message, location);
    }

    pub fn report_warning(&mut self, source: &'static str, message: String, location: Option<SourceLocation>) {
        log::warn!("{}: {}", source, message);
        let level = if self.warnings_as_errors {
            DiagnosticLevel::Error
        } else {
            DiagnosticLevel::Warning
        };
        self.record(source, level, message, location);
    }

    fn record(
        &mut self,
        source: &'static str,
        level: DiagnosticLevel,
        message: String,
        location: Option<SourceLocation>,
    ) {
        if self.quiet {
            return;
        }
        self.diagnostics.push(Diagnostic {
            source,
            level,
            message,
            location,
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == DiagnosticLevel::Error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
