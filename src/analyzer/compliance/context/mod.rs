//! Evaluation context for policy resources.
//!
//! The context holds every resource loaded for a run, plus the sources
//! that could not be loaded, and hands them to the evaluator.

pub mod resource;

pub use resource::{Resource, ResourceMetadata};

/// Access to the resources of one evaluation run.
pub trait EvalContext: Send + Sync {
    /// All successfully loaded resources, in load order.
    fn resources(&self) -> &[Resource];

    /// Sources that failed to load, as human-readable messages.
    fn load_errors(&self) -> &[String];
}

/// Default implementation of EvalContext.
#[derive(Debug, Default)]
pub struct EvalContextImpl {
    resources: Vec<Resource>,
    load_errors: Vec<String>,
}

impl EvalContextImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_resources(&mut self, resources: impl IntoIterator<Item = Resource>) {
        self.resources.extend(resources);
    }

    pub fn add_load_error(&mut self, error: impl Into<String>) {
        self.load_errors.push(error.into());
    }
}

impl EvalContext for EvalContextImpl {
    fn resources(&self) -> &[Resource] {
        &self.resources
    }

    fn load_errors(&self) -> &[String] {
        &self.load_errors
    }
}
