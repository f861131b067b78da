//! Build progress reporting.
//!
//! Provides a flexible progress reporting system for conversion runs.
//! Supports console output (with colors when attached to a terminal) and
//! JSON lines for tooling.
//!
//! # Example
//!
//! ```
//! use lvsprite::build::{BuildStatus, ConsoleProgress, ProgressEvent, ProgressReporter};
//!
//! let reporter = ConsoleProgress::new();
//! reporter.report(ProgressEvent::BuildStarted { total_targets: 1 });
//! reporter.report(ProgressEvent::TargetCompleted {
//!     target_id: "pet_idle_frame1".to_string(),
//!     status: BuildStatus::Success,
//!     output: None,
//!     duration_ms: 4,
//! });
//! ```

use serde_json::json;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::result::BuildStatus;

/// Events that can be reported during a run.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Run started
    BuildStarted {
        /// Number of sprites to convert
        total_targets: usize,
    },
    /// A sprite conversion started
    TargetStarted {
        /// Sprite identifier
        target_id: String,
    },
    /// A sprite conversion finished
    TargetCompleted {
        /// Sprite identifier
        target_id: String,
        /// Conversion status
        status: BuildStatus,
        /// Generated source file
        output: Option<PathBuf>,
        /// Duration in milliseconds
        duration_ms: u64,
    },
    /// The declaration header was written
    HeaderWritten {
        /// Header path
        path: PathBuf,
        /// Number of `extern` declarations
        declarations: usize,
    },
    /// Run completed
    BuildCompleted {
        /// Whether the overall run succeeded
        success: bool,
        /// Total duration in milliseconds
        duration_ms: u64,
        /// Number of generated sprites
        succeeded: usize,
        /// Number of sprites not attempted
        skipped: usize,
        /// Number of failed sprites
        failed: usize,
    },
    /// A warning was generated
    Warning {
        /// Sprite that generated the warning (if applicable)
        target_id: Option<String>,
        /// Warning message
        message: String,
    },
    /// An error occurred
    Error {
        /// Sprite that generated the error (if applicable)
        target_id: Option<String>,
        /// Error message
        message: String,
    },
}

/// Trait for progress reporters.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event.
    fn report(&self, event: ProgressEvent);

    /// Check if this reporter wants verbose output.
    fn is_verbose(&self) -> bool {
        false
    }
}

/// A progress reporter that discards all events.
#[derive(Debug, Default)]
pub struct NullProgress;

impl NullProgress {
    /// Create a new null progress reporter.
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for NullProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Console progress reporter with optional colors.
pub struct ConsoleProgress {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
    /// Completed sprite count
    current: AtomicUsize,
    /// Total sprite count
    total: AtomicUsize,
    /// Output writer (for testing)
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for ConsoleProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleProgress")
            .field("use_colors", &self.use_colors)
            .field("verbose", &self.verbose)
            .field("current", &self.current)
            .field("total", &self.total)
            .finish()
    }
}

impl ConsoleProgress {
    /// Create a console reporter on stderr, colored when stderr is a terminal.
    pub fn new() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stderr),
            verbose: false,
            current: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            output: Mutex::new(Box::new(std::io::stderr())),
        }
    }

    /// Create a console progress reporter that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self {
            use_colors: false,
            verbose: false,
            current: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            output: Mutex::new(Box::new(output)),
        }
    }

    /// Set whether to use colors.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        self.color(text, "\x1b[32m")
    }

    fn yellow(&self, text: &str) -> String {
        self.color(text, "\x1b[33m")
    }

    fn red(&self, text: &str) -> String {
        self.color(text, "\x1b[31m")
    }

    fn cyan(&self, text: &str) -> String {
        self.color(text, "\x1b[36m")
    }

    fn bold(&self, text: &str) -> String {
        self.color(text, "\x1b[1m")
    }

    fn writeln(&self, line: &str) {
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", line);
        }
    }

    fn prefixed(target_id: Option<String>, message: &str) -> String {
        match target_id {
            Some(id) => format!("{}: {}", id, message),
            None => message.to_string(),
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::BuildStarted { total_targets } => {
                self.total.store(total_targets, Ordering::SeqCst);
                self.current.store(0, Ordering::SeqCst);
                self.writeln(&format!(
                    "{} Converting {} sprite{}...",
                    self.cyan("[build]"),
                    total_targets,
                    if total_targets == 1 { "" } else { "s" }
                ));
            }
            ProgressEvent::TargetStarted { target_id } => {
                if self.verbose {
                    let current = self.current.load(Ordering::SeqCst) + 1;
                    let total = self.total.load(Ordering::SeqCst);
                    self.writeln(&format!(
                        "{} [{}/{}] Converting {}...",
                        self.cyan("[build]"),
                        current,
                        total,
                        target_id
                    ));
                }
            }
            ProgressEvent::TargetCompleted { target_id, status, output, duration_ms } => {
                let current = self.current.fetch_add(1, Ordering::SeqCst) + 1;
                let total = self.total.load(Ordering::SeqCst);

                let status_str = match &status {
                    BuildStatus::Success => self.green("ok"),
                    BuildStatus::Skipped => self.yellow("skipped"),
                    BuildStatus::Failed(_) => self.red("FAILED"),
                };
                let target = match &output {
                    Some(path) => format!("{} -> {}", target_id, path.display()),
                    None => target_id,
                };

                self.writeln(&format!(
                    "{} [{}/{}] {} {} ({})",
                    self.cyan("[build]"),
                    current,
                    total,
                    status_str,
                    target,
                    format_duration(duration_ms)
                ));

                if let BuildStatus::Failed(err) = status {
                    self.writeln(&format!("        {}", self.red(&err)));
                }
            }
            ProgressEvent::HeaderWritten { path, declarations } => {
                self.writeln(&format!(
                    "{} header {} ({} declaration{})",
                    self.cyan("[build]"),
                    path.display(),
                    declarations,
                    if declarations == 1 { "" } else { "s" }
                ));
            }
            ProgressEvent::BuildCompleted { success, duration_ms, succeeded, skipped, failed } => {
                let duration_str = format_duration(duration_ms);

                if success {
                    self.writeln(&format!(
                        "\n{} All files generated successfully: {} {} in {}",
                        self.green("[done]"),
                        self.bold(&succeeded.to_string()),
                        if succeeded == 1 { "sprite" } else { "sprites" },
                        duration_str
                    ));
                } else {
                    self.writeln(&format!(
                        "\n{} Build failed: {} generated, {} skipped, {} {} in {}",
                        self.red("[error]"),
                        succeeded,
                        skipped,
                        failed,
                        if failed == 1 { "failure" } else { "failures" },
                        duration_str
                    ));
                }
            }
            ProgressEvent::Warning { target_id, message } => {
                let text = Self::prefixed(target_id, &message);
                self.writeln(&format!("{} {}", self.yellow("[warn]"), text));
            }
            ProgressEvent::Error { target_id, message } => {
                let text = Self::prefixed(target_id, &message);
                self.writeln(&format!("{} {}", self.red("[error]"), text));
            }
        }
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// JSON progress reporter for machine-readable output.
///
/// Writes one JSON object per line.
pub struct JsonProgress {
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for JsonProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonProgress").finish()
    }
}

impl JsonProgress {
    /// Create a new JSON progress reporter writing to stderr.
    pub fn new() -> Self {
        Self { output: Mutex::new(Box::new(std::io::stderr())) }
    }

    /// Create a JSON progress reporter that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self { output: Mutex::new(Box::new(output)) }
    }

    fn write_json(&self, value: &serde_json::Value) {
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", value);
        }
    }
}

impl Default for JsonProgress {
    fn default() -> Self {
        Self::new()
    }
}

fn status_name(status: &BuildStatus) -> &'static str {
    match status {
        BuildStatus::Success => "success",
        BuildStatus::Skipped => "skipped",
        BuildStatus::Failed(_) => "failed",
    }
}

impl ProgressReporter for JsonProgress {
    fn report(&self, event: ProgressEvent) {
        let value = match event {
            ProgressEvent::BuildStarted { total_targets } => {
                json!({ "event": "build_started", "total_targets": total_targets })
            }
            ProgressEvent::TargetStarted { target_id } => {
                json!({ "event": "target_started", "target_id": target_id })
            }
            ProgressEvent::TargetCompleted { target_id, status, output, duration_ms } => {
                let mut value = json!({
                    "event": "target_completed",
                    "target_id": target_id,
                    "status": status_name(&status),
                    "duration_ms": duration_ms,
                });
                if let Some(path) = output {
                    value["output"] = json!(path.display().to_string());
                }
                if let BuildStatus::Failed(err) = status {
                    value["error"] = json!(err);
                }
                value
            }
            ProgressEvent::HeaderWritten { path, declarations } => json!({
                "event": "header_written",
                "path": path.display().to_string(),
                "declarations": declarations,
            }),
            ProgressEvent::BuildCompleted { success, duration_ms, succeeded, skipped, failed } => {
                json!({
                    "event": "build_completed",
                    "success": success,
                    "duration_ms": duration_ms,
                    "succeeded": succeeded,
                    "skipped": skipped,
                    "failed": failed,
                })
            }
            ProgressEvent::Warning { target_id, message } => {
                json!({ "event": "warning", "message": message, "target_id": target_id })
            }
            ProgressEvent::Error { target_id, message } => {
                json!({ "event": "error", "message": message, "target_id": target_id })
            }
        };
        self.write_json(&value);
    }
}

/// Aggregates run statistics as sprites complete.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    start_time: Option<Instant>,
    total: usize,
    succeeded: usize,
    skipped: usize,
    failed: usize,
}

impl ProgressTracker {
    /// Create a new progress tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a run.
    pub fn start(&mut self, total_targets: usize) {
        *self = Self { start_time: Some(Instant::now()), total: total_targets, ..Self::default() };
    }

    /// Record a finished sprite.
    pub fn target_completed(&mut self, status: &BuildStatus) {
        match status {
            BuildStatus::Success => self.succeeded += 1,
            BuildStatus::Skipped => self.skipped += 1,
            BuildStatus::Failed(_) => self.failed += 1,
        }
    }

    /// Get the elapsed time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or(Duration::ZERO)
    }

    /// Get the elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Check if every sprite has been accounted for.
    pub fn is_complete(&self) -> bool {
        self.succeeded + self.skipped + self.failed >= self.total
    }

    /// Check if the run was successful.
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }

    /// Generate a BuildCompleted event from current state.
    pub fn build_completed_event(&self) -> ProgressEvent {
        ProgressEvent::BuildCompleted {
            success: self.is_success(),
            duration_ms: self.elapsed_ms(),
            succeeded: self.succeeded,
            skipped: self.skipped,
            failed: self.failed,
        }
    }
}

/// Format a duration in milliseconds to a human-readable string.
fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        let minutes = ms / 60_000;
        let seconds = (ms % 60_000) / 1000;
        format!("{}m {}s", minutes, seconds)
    }
}
