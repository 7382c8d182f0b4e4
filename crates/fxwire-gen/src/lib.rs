//! Wiring-subclass generator.
//!
//! For every marked view type this synthesizes a `<Name>Generated` Java
//! subclass whose constructor loads the view resource and binds components
//! and handlers. Generation is deterministic: the same candidates and
//! config yield byte-identical output, so a rerun over unchanged input is a
//! no-op for downstream compilation.
//!
//! A round is tolerant of bad candidates. A candidate that cannot be
//! generated is reported through the [`DiagnosticSink`] and skipped; it
//! never aborts the round or touches the other candidates.

use fxwire_model::{ConstructorDesc, TypeDesc};
use fxwire_types::{Diagnostic, TypeKind};

mod config;
mod emit;
mod sink;

pub use config::{ConfigError, GenConfig};
pub use sink::{
    DiagnosticSink, FsSourceSink, MemoryDiagnostics, MemorySources, SourceSink, WriteError,
};

/// Output seams for one generation round.
pub struct GenContext<'a> {
    pub diagnostics: &'a mut dyn DiagnosticSink,
    pub sources: &'a mut dyn SourceSink,
}

/// What a round produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Qualified names of the generated types, in candidate order.
    pub generated: Vec<String>,
    /// Candidates that carried the view marker but produced no output.
    pub skipped: usize,
}

pub struct Generator {
    config: GenConfig,
}

impl Generator {
    pub fn new(config: GenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Runs one generation round over `candidates`.
    ///
    /// Candidates without the view marker are ignored outright; marked
    /// candidates that fail validation are skipped with a diagnostic.
    pub fn run_round(
        &self,
        candidates: &[&dyn TypeDesc],
        ctx: &mut GenContext<'_>,
    ) -> RoundOutcome {
        let mut outcome = RoundOutcome::default();
        for &candidate in candidates {
            if !candidate.has_annotation(&self.config.view_annotation) {
                continue;
            }
            match self.generate_one(candidate, ctx) {
                Some(qualified_name) => outcome.generated.push(qualified_name),
                None => outcome.skipped += 1,
            }
        }
        tracing::debug!(
            generated = outcome.generated.len(),
            skipped = outcome.skipped,
            "generation round finished"
        );
        outcome
    }

    fn generate_one(&self, candidate: &dyn TypeDesc, ctx: &mut GenContext<'_>) -> Option<String> {
        let Some(resource) = self.validate(candidate, ctx.diagnostics) else {
            return None;
        };
        let Some(ctor) = subclassable_constructor(candidate) else {
            ctx.diagnostics.report(Diagnostic::warning(
                "fxwire.no-constructor",
                format!(
                    "`{}` has no non-private constructor to delegate to",
                    candidate.qualified_name()
                ),
                Some(candidate.qualified_name().to_string()),
            ));
            return None;
        };

        let emission = emit::emit_subclass(&self.config, candidate, ctor, &resource);
        for diagnostic in emission.diagnostics {
            ctx.diagnostics.report(diagnostic);
        }

        let generated_simple = self.config.generated_name(candidate.simple_name());
        let package = candidate.package_name();
        let qualified_name = if package.is_empty() {
            generated_simple
        } else {
            format!("{package}.{generated_simple}")
        };

        if let Err(err) = ctx.sources.write(&qualified_name, &emission.source) {
            ctx.diagnostics.report(Diagnostic::error(
                "fxwire.write-failed",
                error_chain(&err),
                Some(candidate.qualified_name().to_string()),
            ));
            return None;
        }
        Some(qualified_name)
    }

    /// Checks that `candidate` can be subclassed and names a resource.
    /// Returns the view resource identifier on success.
    fn validate(
        &self,
        candidate: &dyn TypeDesc,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Option<String> {
        let reject = |diagnostics: &mut dyn DiagnosticSink, message: String| {
            diagnostics.report(Diagnostic::warning(
                "fxwire.invalid-candidate",
                message,
                Some(candidate.qualified_name().to_string()),
            ));
        };

        if candidate.kind() != TypeKind::Class {
            reject(
                diagnostics,
                format!(
                    "`{}` is marked @{} but is not a plain class",
                    candidate.qualified_name(),
                    self.config.view_annotation
                ),
            );
            return None;
        }
        if candidate.modifiers().is_final() {
            reject(
                diagnostics,
                format!(
                    "`{}` is final and cannot be subclassed",
                    candidate.qualified_name()
                ),
            );
            return None;
        }
        if candidate.qualified_name().is_empty() {
            reject(
                diagnostics,
                format!(
                    "anonymous class marked @{} cannot be subclassed",
                    self.config.view_annotation
                ),
            );
            return None;
        }

        // The marker itself is guaranteed present by the caller.
        let resource = candidate
            .annotation(&self.config.view_annotation)
            .and_then(|a| a.string_value("name").or_else(|| a.string_value("value")))
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        if resource.is_none() {
            diagnostics.report(Diagnostic::warning(
                "fxwire.missing-resource",
                format!(
                    "@{} on `{}` names no view resource",
                    self.config.view_annotation,
                    candidate.qualified_name()
                ),
                Some(candidate.qualified_name().to_string()),
            ));
        }
        resource
    }
}

/// First declared constructor a subclass can delegate to.
fn subclassable_constructor(candidate: &dyn TypeDesc) -> Option<&dyn ConstructorDesc> {
    candidate
        .constructors()
        .into_iter()
        .find(|c| !c.modifiers().is_private())
}

fn error_chain(err: &WriteError) -> String {
    use std::error::Error as _;
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
