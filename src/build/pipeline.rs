//! Build pipeline orchestration.
//!
//! The pipeline converts every planned sprite in order, then writes the
//! declaration header listing the sprites that were produced.

use crate::build::{
    BuildContext, BuildPlan, BuildResult, BuildTarget, ProgressEvent, ProgressReporter,
    ProgressTracker, TargetResult,
};
use crate::export::{render_header, render_source, Declaration, FrameGroup};
use crate::output::{write_text, OutputError};
use crate::transcode::{transcode_file, DecodeError};
use std::collections::HashSet;
use std::time::Instant;
use thiserror::Error;

/// Error that halts a run.
#[derive(Debug, Error)]
pub enum BuildError {
    /// An input image could not be read or decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A generated file could not be written
    #[error(transparent)]
    Write(#[from] OutputError),
}

/// Build pipeline for executing conversion runs.
pub struct BuildPipeline {
    /// Build context
    context: BuildContext,
}

impl BuildPipeline {
    /// Create a new build pipeline.
    pub fn new(context: BuildContext) -> Self {
        Self { context }
    }

    /// Get the build context.
    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// The targets this pipeline would convert, without touching any file.
    pub fn plan(&self) -> BuildPlan {
        BuildPlan::from_context(&self.context)
    }

    /// Run the pipeline.
    ///
    /// Decode failures are recorded in the returned [`BuildResult`]. Without
    /// `keep_going` the first one stops the run: later sprites are marked
    /// skipped and no header is written. Write failures always stop the run
    /// and are returned as [`BuildError::Write`].
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let plan = self.plan();

        let mut tracker = ProgressTracker::new();
        tracker.start(plan.len());
        reporter.report(ProgressEvent::BuildStarted { total_targets: plan.len() });

        let mut result = BuildResult::new();
        let mut declarations = Vec::with_capacity(plan.len());
        let mut halted = false;

        for target in plan.targets() {
            if halted {
                let skipped = TargetResult::skipped(target.id.clone(), target.source.clone());
                self.complete(reporter, &mut tracker, &skipped);
                result.add_result(skipped);
                continue;
            }

            reporter.report(ProgressEvent::TargetStarted { target_id: target.id.clone() });
            let target_start = Instant::now();

            let target_result = match self.convert(target) {
                Ok(declaration) => {
                    declarations.push(declaration);
                    TargetResult::success(
                        target.id.clone(),
                        target.source.clone(),
                        target.output.clone(),
                        target_start.elapsed(),
                    )
                }
                Err(BuildError::Decode(err)) => {
                    halted = !self.context.keep_going();
                    TargetResult::failed(
                        target.id.clone(),
                        target.source.clone(),
                        err.to_string(),
                        target_start.elapsed(),
                    )
                }
                Err(err) => {
                    reporter.report(ProgressEvent::Error {
                        target_id: Some(target.id.clone()),
                        message: err.to_string(),
                    });
                    return Err(err);
                }
            };

            self.complete(reporter, &mut tracker, &target_result);
            result.add_result(target_result);
        }

        if halted {
            self.warn(reporter, &mut result, "declaration header not written".to_string());
        } else {
            let groups = self.frame_groups(reporter, &mut result);
            let header = render_header(&declarations, &groups, &self.context.header_options());
            if let Err(err) = write_text(&plan.header, &header) {
                reporter.report(ProgressEvent::Error { target_id: None, message: err.to_string() });
                return Err(err.into());
            }
            reporter.report(ProgressEvent::HeaderWritten {
                path: plan.header.clone(),
                declarations: declarations.len(),
            });
            result.header = Some(plan.header);
        }

        result.total_duration = start.elapsed();
        reporter.report(tracker.build_completed_event());
        Ok(result)
    }

    /// Decode, transcode and write one sprite.
    fn convert(&self, target: &BuildTarget) -> Result<Declaration, BuildError> {
        let sprite = transcode_file(&target.source, &target.id)?;
        let source = render_source(&sprite, &self.context.source_options());
        write_text(&target.output, &source)?;

        let declaration = Declaration::new(target.id.as_str());
        Ok(match sprite.source_name {
            Some(name) => declaration.with_source(name),
            None => declaration,
        })
    }

    /// Animation groups whose frames were all produced.
    fn frame_groups(
        &self,
        reporter: &dyn ProgressReporter,
        result: &mut BuildResult,
    ) -> Vec<FrameGroup> {
        let produced: HashSet<String> =
            result.generated_ids().into_iter().map(str::to_string).collect();

        let mut groups = Vec::new();
        for animation in &self.context.config().animations {
            match animation.frames.iter().find(|f| !produced.contains(f.as_str())) {
                None => groups.push(FrameGroup {
                    name: animation.name.clone(),
                    frames: animation.frames.clone(),
                }),
                Some(missing) => {
                    let message = format!(
                        "animation '{}' omitted: frame '{}' was not generated",
                        animation.name, missing
                    );
                    self.warn(reporter, result, message);
                }
            }
        }
        groups
    }

    fn complete(
        &self,
        reporter: &dyn ProgressReporter,
        tracker: &mut ProgressTracker,
        target: &TargetResult,
    ) {
        tracker.target_completed(&target.status);
        reporter.report(ProgressEvent::TargetCompleted {
            target_id: target.target_id.clone(),
            status: target.status.clone(),
            output: target.output.clone(),
            duration_ms: target.duration.as_millis() as u64,
        });
    }

    fn warn(&self, reporter: &dyn ProgressReporter, result: &mut BuildResult, message: String) {
        reporter.report(ProgressEvent::Warning { target_id: None, message: message.clone() });
        result.warnings.push(message);
    }
}
