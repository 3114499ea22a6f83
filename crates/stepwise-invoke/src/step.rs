//! Step definitions: one matched step occurrence bound to its handler.

use crate::error::InvokeResult;
use crate::handler::{InvocationOutcome, StepHandler};
use crate::invoker::invoke;
use crate::options::InvokeOptions;
use std::fmt;
use std::sync::Arc;
use stepwise_types::{HandlerSignature, RawArgument, StepMetadata};
use tracing::debug_span;

/// A matched step, ready for exactly one invocation.
///
/// Each parallel unit of the orchestrator owns its own definition; only the
/// handler is shared.
#[derive(Clone)]
pub struct StepDefinition {
    metadata: StepMetadata,
    args: Vec<RawArgument>,
    handler: Arc<dyn StepHandler>,
    nested: bool,
    undefined: Vec<String>,
}

impl StepDefinition {
    /// Bind `handler` to the arguments captured for one step occurrence.
    pub fn new(
        metadata: StepMetadata,
        handler: Arc<dyn StepHandler>,
        args: Vec<RawArgument>,
    ) -> Self {
        Self {
            metadata,
            args,
            handler,
            nested: false,
            undefined: Vec::new(),
        }
    }

    /// A definition whose handler expands into further steps.
    pub fn nested(
        metadata: StepMetadata,
        handler: Arc<dyn StepHandler>,
        args: Vec<RawArgument>,
    ) -> Self {
        Self {
            nested: true,
            ..Self::new(metadata, handler, args)
        }
    }

    pub fn metadata(&self) -> &StepMetadata {
        &self.metadata
    }

    pub fn args(&self) -> &[RawArgument] {
        &self.args
    }

    pub fn handler(&self) -> &Arc<dyn StepHandler> {
        &self.handler
    }

    pub fn signature(&self) -> HandlerSignature {
        self.handler.signature()
    }

    pub fn is_nested(&self) -> bool {
        self.nested
    }

    /// Expanded step texts that did not match any handler.
    pub fn undefined(&self) -> &[String] {
        &self.undefined
    }

    /// Record an expanded step that matched no handler.
    ///
    /// Only nested definitions track undefined steps; returns `false` and
    /// records nothing otherwise.
    pub fn mark_undefined(&mut self, step: impl Into<String>) -> bool {
        if !self.nested {
            return false;
        }
        self.undefined.push(step.into());
        true
    }

    /// Invoke the handler with the default options.
    pub fn run(&self) -> InvokeResult<InvocationOutcome> {
        self.run_with(&InvokeOptions::default())
    }

    pub fn run_with(&self, options: &InvokeOptions) -> InvokeResult<InvocationOutcome> {
        let span = debug_span!(
            "step",
            pattern = %self.metadata.pattern,
            location = %self.metadata.location,
            nested = self.nested,
        );
        let _enter = span.enter();
        invoke(self.handler().as_ref(), self.args(), options)
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("metadata", &self.metadata)
            .field("args", &self.args)
            .field("signature", &self.signature())
            .field("nested", &self.nested)
            .field("undefined", &self.undefined)
            .finish()
    }
}

/// Metadata of a possibly-unresolved step definition.
///
/// Reporters walk steps that never resolved to a handler; those yield `None`.
pub fn metadata_of(def: Option<&StepDefinition>) -> Option<&StepMetadata> {
    def.map(StepDefinition::metadata)
}
