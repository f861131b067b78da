//! Build result types.
//!
//! Contains types for representing the outcome of a conversion run.

use std::path::PathBuf;
use std::time::Duration;

/// Status of a single sprite in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// Source generated
    Success,
    /// Not attempted because an earlier sprite failed
    Skipped,
    /// Conversion failed with error
    Failed(String),
}

impl BuildStatus {
    /// Check if the status indicates success.
    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Success)
    }

    /// Check if the status indicates failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, BuildStatus::Failed(_))
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildStatus::Success => write!(f, "success"),
            BuildStatus::Skipped => write!(f, "skipped"),
            BuildStatus::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Result of converting a single sprite.
#[derive(Debug, Clone)]
pub struct TargetResult {
    /// Sprite identifier
    pub target_id: String,
    /// Image the sprite was read from
    pub source: PathBuf,
    /// Conversion status
    pub status: BuildStatus,
    /// Generated source file, when successful
    pub output: Option<PathBuf>,
    /// Conversion duration
    pub duration: Duration,
}

impl TargetResult {
    /// Create a successful result.
    pub fn success(
        target_id: String,
        source: PathBuf,
        output: PathBuf,
        duration: Duration,
    ) -> Self {
        Self { target_id, source, status: BuildStatus::Success, output: Some(output), duration }
    }

    /// Create a skipped result.
    pub fn skipped(target_id: String, source: PathBuf) -> Self {
        Self {
            target_id,
            source,
            status: BuildStatus::Skipped,
            output: None,
            duration: Duration::ZERO,
        }
    }

    /// Create a failed result.
    pub fn failed(target_id: String, source: PathBuf, error: String, duration: Duration) -> Self {
        Self { target_id, source, status: BuildStatus::Failed(error), output: None, duration }
    }

    /// Check if this result is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Result of a complete run.
#[derive(Debug, Default)]
pub struct BuildResult {
    /// Results for each sprite, in configured order
    pub targets: Vec<TargetResult>,
    /// Declaration header, if it was written
    pub header: Option<PathBuf>,
    /// Warning messages
    pub warnings: Vec<String>,
    /// Total run duration
    pub total_duration: Duration,
}

impl BuildResult {
    /// Create a new empty build result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target result.
    pub fn add_result(&mut self, result: TargetResult) {
        self.targets.push(result);
    }

    /// Set the total duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.total_duration = duration;
        self
    }

    /// Get the number of successful targets.
    pub fn success_count(&self) -> usize {
        self.targets.iter().filter(|r| r.status.is_success()).count()
    }

    /// Get the number of skipped targets.
    pub fn skipped_count(&self) -> usize {
        self.targets.iter().filter(|r| matches!(r.status, BuildStatus::Skipped)).count()
    }

    /// Get the number of failed targets.
    pub fn failed_count(&self) -> usize {
        self.targets.iter().filter(|r| r.status.is_failure()).count()
    }

    /// Check if the overall run succeeded (no failures, nothing skipped).
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0 && self.skipped_count() == 0
    }

    /// Identifiers that were generated, in order.
    pub fn generated_ids(&self) -> Vec<&str> {
        self.targets.iter().filter(|r| r.is_success()).map(|r| r.target_id.as_str()).collect()
    }

    /// Get all files written, sprite sources first, then the header.
    pub fn all_outputs(&self) -> Vec<&PathBuf> {
        self.targets.iter().filter_map(|r| r.output.as_ref()).chain(self.header.as_ref()).collect()
    }

    /// Get failed target results.
    pub fn failures(&self) -> Vec<&TargetResult> {
        self.targets.iter().filter(|r| r.status.is_failure()).collect()
    }

    /// Format a summary of the run.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        let success = self.success_count();
        let skipped = self.skipped_count();
        let failed = self.failed_count();
        let total = self.targets.len();

        if failed > 0 {
            lines.push(format!(
                "Build failed: {} generated, {} skipped, {} failed ({} total)",
                success, skipped, failed, total
            ));
            for target in self.failures() {
                lines.push(format!("  - {}: {}", target.target_id, target.status));
            }
        } else {
            lines.push(format!(
                "All files generated successfully: {} sprite{} in {:?}",
                success,
                if success == 1 { "" } else { "s" },
                self.total_duration
            ));
        }

        if !self.warnings.is_empty() {
            lines.push(format!("Warnings ({}): ", self.warnings.len()));
            for warning in self.warnings.iter().take(5) {
                lines.push(format!("  - {}", warning));
            }
            if self.warnings.len() > 5 {
                lines.push(format!("  ... and {} more", self.warnings.len() - 5));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(id: &str) -> TargetResult {
        TargetResult::success(
            id.to_string(),
            PathBuf::from(format!("{}.png", id)),
            PathBuf::from(format!("{}.c", id)),
            Duration::ZERO,
        )
    }

    #[test]
    fn test_build_status_display() {
        assert_eq!(BuildStatus::Success.to_string(), "success");
        assert_eq!(BuildStatus::Skipped.to_string(), "skipped");
        assert_eq!(BuildStatus::Failed("error".to_string()).to_string(), "failed: error");
    }

    #[test]
    fn test_build_status_is_success() {
        assert!(BuildStatus::Success.is_success());
        assert!(!BuildStatus::Skipped.is_success());
        assert!(!BuildStatus::Failed("error".to_string()).is_success());
    }

    #[test]
    fn test_target_result_failed() {
        let result = TargetResult::failed(
            "frame".to_string(),
            PathBuf::from("2.png"),
            "cannot decode".to_string(),
            Duration::from_millis(5),
        );

        assert!(!result.is_success());
        assert!(result.output.is_none());
    }

    #[test]
    fn test_build_result_counts() {
        let mut result = BuildResult::new();
        result.add_result(ok("a"));
        result.add_result(TargetResult::failed(
            "b".to_string(),
            PathBuf::from("b.png"),
            "error".to_string(),
            Duration::ZERO,
        ));
        result.add_result(TargetResult::skipped("c".to_string(), PathBuf::from("c.png")));

        assert_eq!(result.success_count(), 1);
        assert_eq!(result.skipped_count(), 1);
        assert_eq!(result.failed_count(), 1);
        assert!(!result.is_success());
        assert_eq!(result.generated_ids(), vec!["a"]);
    }

    #[test]
    fn test_build_result_all_outputs_ends_with_header() {
        let mut result = BuildResult::new();
        result.add_result(ok("a"));
        result.add_result(ok("b"));
        result.header = Some(PathBuf::from("sprites.h"));

        let outputs = result.all_outputs();
        assert_eq!(outputs.len(), 3);
        assert_eq!(outputs[2], &PathBuf::from("sprites.h"));
    }

    #[test]
    fn test_build_result_summary_success() {
        let mut result = BuildResult::new();
        result.add_result(ok("pet_idle_frame1"));

        let summary = result.with_duration(Duration::from_millis(100)).summary();
        assert!(summary.contains("All files generated successfully"));
        assert!(summary.contains("1 sprite "));
    }

    #[test]
    fn test_build_result_summary_failure_lists_targets() {
        let mut result = BuildResult::new();
        result.add_result(TargetResult::failed(
            "broken".to_string(),
            PathBuf::from("broken.png"),
            "cannot decode".to_string(),
            Duration::ZERO,
        ));
        result.warnings.push("animation 'idle' omitted".to_string());

        let summary = result.summary();
        assert!(summary.contains("Build failed: 0 generated, 0 skipped, 1 failed"));
        assert!(summary.contains("  - broken: failed: cannot decode"));
        assert!(summary.contains("Warnings (1)"));
    }

    #[test]
    fn test_empty_result_is_success() {
        assert!(BuildResult::new().is_success());
    }
}
