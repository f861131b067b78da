//! Build targets and plans.

use super::BuildContext;
use std::path::PathBuf;

/// One sprite to convert: where it is read from and where its source goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    /// Descriptor identifier
    pub id: String,
    /// Input image
    pub source: PathBuf,
    /// Generated C source file
    pub output: PathBuf,
}

impl BuildTarget {
    pub fn new(id: String, source: PathBuf, output: PathBuf) -> Self {
        Self { id, source, output }
    }
}

/// Ordered list of targets plus the header written after them.
#[derive(Debug, Clone, Default)]
pub struct BuildPlan {
    targets: Vec<BuildTarget>,
    /// Declaration header path
    pub header: PathBuf,
}

impl BuildPlan {
    /// Create an empty plan writing its header to `header`.
    pub fn new(header: PathBuf) -> Self {
        Self { targets: Vec::new(), header }
    }

    /// Plan every configured sprite, in configured order.
    pub fn from_context(ctx: &BuildContext) -> Self {
        let mut plan = Self::new(ctx.header_path());
        for entry in &ctx.config().sprites {
            let id = entry.identifier();
            let output = ctx.source_output(&id);
            plan.add_target(BuildTarget::new(id, ctx.sprite_source(entry), output));
        }
        plan
    }

    /// Append a target.
    pub fn add_target(&mut self, target: BuildTarget) {
        self.targets.push(target);
    }

    /// Targets in conversion order.
    pub fn targets(&self) -> &[BuildTarget] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
