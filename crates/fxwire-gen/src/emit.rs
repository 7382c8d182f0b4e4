//! Java source emission for one validated candidate.
//!
//! Statement order inside the generated constructor is a correctness
//! contract: super-call, resource load, component bindings in field order,
//! single-handler bindings in method order, multi-handler expansions in
//! outer-method-then-inner-entry order, lifecycle hook last. Component
//! fields must be populated before anything that might observe them, and
//! the lifecycle hook must see a fully wired instance.

use std::fmt::Write as _;

use fxwire_model::{ConstructorDesc, MethodDesc, TypeDesc};
use fxwire_types::{Annotation, Diagnostic, ElementValue};

use crate::config::GenConfig;

pub(crate) struct Emission {
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Identifier from a binding annotation, normalized to the bare form: the
/// `#` lookup prefix is applied at emission, whether or not the author
/// already wrote one.
fn widget_id(annotation: &Annotation) -> Option<String> {
    let raw = annotation
        .string_value("id")
        .or_else(|| annotation.string_value("value"))?;
    let id = raw.trim();
    let id = id.strip_prefix('#').unwrap_or(id);
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

fn action_name(annotation: &Annotation) -> Option<String> {
    let action = annotation.string_value("action")?.trim();
    if action.is_empty() {
        None
    } else {
        Some(action.to_string())
    }
}

fn control_type(annotation: &Annotation) -> String {
    annotation
        .value("type")
        .and_then(ElementValue::as_class)
        .map(str::to_string)
        .unwrap_or_else(|| "javafx.scene.Node".to_string())
}

fn member_path(ty: &dyn TypeDesc, member: &str) -> String {
    format!("{}.{}", ty.qualified_name(), member)
}

pub(crate) fn emit_subclass(
    config: &GenConfig,
    ty: &dyn TypeDesc,
    ctor: &dyn ConstructorDesc,
    resource: &str,
) -> Emission {
    let mut diagnostics = Vec::new();
    let simple = ty.simple_name();
    let generated = config.generated_name(simple);
    let package = ty.package_name();

    let mut out = String::new();
    if !package.is_empty() {
        let _ = writeln!(out, "package {package};");
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "// Generated by fxwire from {}. Do not edit.", ty.qualified_name());
    let _ = writeln!(out, "public class {generated} extends {simple} {{");
    let _ = writeln!(out);

    let params = ctor
        .params()
        .iter()
        .map(|p| format!("{} {}", p.ty, p.name))
        .collect::<Vec<_>>()
        .join(", ");
    let args = ctor
        .params()
        .iter()
        .map(|p| p.name.clone())
        .collect::<Vec<_>>()
        .join(", ");

    let _ = writeln!(out, "    public {generated}({params}) {{");
    let _ = writeln!(out, "        super({args});");

    // Resource binding. A view whose resource fails to load must not exist
    // in a valid state, so the load failure is rethrown as unrecoverable.
    let _ = writeln!(
        out,
        "        javafx.fxml.FXMLLoader loader = new javafx.fxml.FXMLLoader(getClass().getResource(\"{resource}\"));"
    );
    let _ = writeln!(out, "        loader.setRoot(this);");
    let _ = writeln!(out, "        loader.setController(this);");
    let _ = writeln!(out, "        try {{");
    let _ = writeln!(out, "            loader.load();");
    let _ = writeln!(out, "        }} catch (java.io.IOException e) {{");
    let _ = writeln!(
        out,
        "            throw new java.lang.IllegalStateException(\"could not load view resource {resource}\", e);"
    );
    let _ = writeln!(out, "        }}");

    // Component bindings, in field declaration order. Two fields may claim
    // the same identifier; both bindings are emitted and the collision is
    // only noted, since the scene graph resolves each lookup independently.
    let mut seen_ids: Vec<String> = Vec::new();
    for field in ty.fields() {
        if field.modifiers().is_private() {
            continue;
        }
        let Some(annotation) = field.annotation(&config.component_annotation) else {
            continue;
        };
        let Some(id) = widget_id(annotation) else {
            diagnostics.push(Diagnostic::warning(
                "fxwire.missing-identifier",
                format!(
                    "@{} on field `{}` has no usable identifier; binding skipped",
                    config.component_annotation,
                    field.name()
                ),
                Some(member_path(ty, field.name())),
            ));
            continue;
        };
        if seen_ids.contains(&id) {
            tracing::debug!(id = %id, field = field.name(), "duplicate component identifier");
        } else {
            seen_ids.push(id.clone());
        }
        let _ = writeln!(
            out,
            "        this.{} = ({}) lookup(\"#{id}\");",
            field.name(),
            field.ty()
        );
    }

    // Single-handler bindings, in method declaration order.
    for method in ty.methods() {
        if method.modifiers().is_private() {
            continue;
        }
        let Some(annotation) = method.annotation(&config.handler_annotation) else {
            continue;
        };
        emit_handler(config, ty, method, annotation, &mut out, &mut diagnostics);
    }

    // Multi-handler expansions, outer method order then entry order.
    for method in ty.methods() {
        if method.modifiers().is_private() {
            continue;
        }
        let Some(container) = method.annotation(&config.handlers_annotation) else {
            continue;
        };
        let entries = container
            .value("value")
            .and_then(ElementValue::as_array)
            .unwrap_or(&[]);
        for entry in entries {
            let Some(annotation) = entry.as_annotation() else {
                diagnostics.push(Diagnostic::warning(
                    "fxwire.missing-identifier",
                    format!(
                        "@{} on method `{}` contains a non-annotation entry; binding skipped",
                        config.handlers_annotation,
                        method.name()
                    ),
                    Some(member_path(ty, method.name())),
                ));
                continue;
            };
            emit_handler(config, ty, method, annotation, &mut out, &mut diagnostics);
        }
    }

    // Lifecycle hook, last: it must observe a fully wired instance.
    let has_lifecycle = ty.methods().iter().any(|m| {
        m.name() == config.lifecycle_method && m.params().is_empty() && !m.modifiers().is_private()
    });
    if has_lifecycle {
        let _ = writeln!(out, "        this.{}();", config.lifecycle_method);
    }

    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");

    Emission {
        source: out,
        diagnostics,
    }
}

fn emit_handler(
    config: &GenConfig,
    ty: &dyn TypeDesc,
    method: &dyn MethodDesc,
    annotation: &Annotation,
    out: &mut String,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let (Some(id), Some(action)) = (widget_id(annotation), action_name(annotation)) else {
        diagnostics.push(Diagnostic::warning(
            "fxwire.missing-identifier",
            format!(
                "@{} on method `{}` has no usable identifier/action pair; binding skipped",
                config.handler_annotation,
                method.name()
            ),
            Some(member_path(ty, method.name())),
        ));
        return;
    };
    let control = control_type(annotation);
    let _ = writeln!(
        out,
        "        (({control}) lookup(\"#{id}\")).{action}Property().set(this::{});",
        method.name()
    );
}
