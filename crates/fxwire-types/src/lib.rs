//! Shared types used across fxwire crates.
//!
//! This crate is the dependency-light leaf of the workspace: the Java type
//! model, the modifier/kind registry, the annotation data model, diagnostics,
//! and the `attempt` helper everything else builds on.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod annotation;
pub mod modifiers;

pub use annotation::{Annotation, AnnotationSet, ElementValue};
pub use modifiers::{Modifier, ModifierSet, NoInverseMapping, TypeKind};

/// A Java primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveType {
    /// Source-level keyword for this primitive.
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Char => "char",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    /// Binary name of the boxed wrapper class.
    pub fn wrapper_class(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "java.lang.Boolean",
            PrimitiveType::Byte => "java.lang.Byte",
            PrimitiveType::Short => "java.lang.Short",
            PrimitiveType::Int => "java.lang.Integer",
            PrimitiveType::Long => "java.lang.Long",
            PrimitiveType::Char => "java.lang.Character",
            PrimitiveType::Float => "java.lang.Float",
            PrimitiveType::Double => "java.lang.Double",
        }
    }
}

/// A Java type as fxwire models it.
///
/// Generics are intentionally erased: the generator only ever renders types
/// in casts and extends-clauses, where the raw type is what javac accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Primitive(PrimitiveType),
    /// A class or interface type referred to by binary name (`java.util.List`).
    Named(String),
    Array(Box<Type>),
    Void,
    Unknown,
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }

    pub fn array(component: Type) -> Self {
        Type::Array(Box::new(component))
    }

    pub fn object() -> Self {
        Type::Named("java.lang.Object".to_string())
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(p) => f.write_str(p.keyword()),
            Type::Named(name) => f.write_str(name),
            Type::Array(component) => write!(f, "{component}[]"),
            Type::Void => f.write_str("void"),
            // Rendered as the top type so emitted source still compiles.
            Type::Unknown => f.write_str("java.lang.Object"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic tied to the declaration that provoked it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    /// Qualified name of the related declaration, when one exists.
    pub declaration: Option<String>,
}

impl Diagnostic {
    pub fn error(
        code: &'static str,
        message: impl Into<String>,
        declaration: Option<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            declaration,
        }
    }

    pub fn warning(
        code: &'static str,
        message: impl Into<String>,
        declaration: Option<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            declaration,
        }
    }
}

/// Runs `op`, converting any failure into `None`.
///
/// Used wherever downstream resolution may legitimately fail because a class
/// is not yet compiled or not on the classpath. Errors are logged at debug
/// level; panics raised inside `op` are caught as well, so this never
/// propagates a failure to the caller.
pub fn attempt<T, E: fmt::Display>(op: impl FnOnce() -> Result<T, E>) -> Option<T> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(op)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(err)) => {
            tracing::debug!(error = %err, "attempted operation failed");
            None
        }
        Err(_) => {
            tracing::debug!("attempted operation panicked");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_display_renders_java_source_forms() {
        assert_eq!(Type::Primitive(PrimitiveType::Int).to_string(), "int");
        assert_eq!(Type::named("java.util.List").to_string(), "java.util.List");
        assert_eq!(
            Type::array(Type::array(Type::Primitive(PrimitiveType::Byte))).to_string(),
            "byte[][]"
        );
        assert_eq!(Type::Void.to_string(), "void");
        assert_eq!(Type::Unknown.to_string(), "java.lang.Object");
    }

    #[test]
    fn wrapper_classes_cover_all_primitives() {
        assert_eq!(PrimitiveType::Int.wrapper_class(), "java.lang.Integer");
        assert_eq!(PrimitiveType::Char.wrapper_class(), "java.lang.Character");
        assert_eq!(PrimitiveType::Boolean.wrapper_class(), "java.lang.Boolean");
    }

    #[test]
    fn attempt_returns_value_on_success() {
        assert_eq!(attempt(|| Ok::<_, String>(42)), Some(42));
    }

    #[test]
    fn attempt_swallows_errors() {
        assert_eq!(attempt(|| Err::<i32, _>("nope".to_string())), None);
    }

    #[test]
    fn attempt_swallows_panics() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));
        let result = attempt(|| -> Result<i32, String> { panic!("boom") });
        std::panic::set_hook(hook);
        assert_eq!(result, None);
    }
}
