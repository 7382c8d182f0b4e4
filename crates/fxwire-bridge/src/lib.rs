//! Bridge between symbolic type references and loadable runtime classes.
//!
//! Mid-compilation, a symbol table refers to types that may not be loadable
//! yet (not compiled, not on the classpath). This crate resolves such
//! references on a best-effort basis: resolution failures are a routine
//! condition here, never an error surfaced to the caller.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fxwire_types::{attempt, PrimitiveType, Type};

/// A type reference as it appears in a compiler symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolicType {
    Primitive(PrimitiveType),
    Void,
    Array(Box<SymbolicType>),
    /// A class or interface reference by binary name. May point at a type
    /// that does not exist yet.
    Declared { binary_name: String },
    /// The compiler's error type: the symbol never resolved at all.
    Error,
}

impl SymbolicType {
    pub fn declared(binary_name: impl Into<String>) -> Self {
        SymbolicType::Declared {
            binary_name: binary_name.into(),
        }
    }

    pub fn array(component: SymbolicType) -> Self {
        SymbolicType::Array(Box::new(component))
    }

    pub fn void() -> Self {
        SymbolicType::Void
    }

    /// Converts without loading anything: declared names are taken at face
    /// value. Used where a type only needs to be *rendered*, not proven
    /// loadable.
    pub fn erase(&self) -> Type {
        match self {
            SymbolicType::Primitive(p) => Type::Primitive(*p),
            SymbolicType::Void => Type::Void,
            SymbolicType::Array(component) => Type::array(component.erase()),
            SymbolicType::Declared { binary_name } => Type::named(binary_name.clone()),
            SymbolicType::Error => Type::Unknown,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("class `{0}` not found")]
    NotFound(String),
}

/// A class the loader was able to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHandle {
    pub binary_name: String,
}

/// Loads compiled classes by binary name.
///
/// Implementations back this with whatever "runtime" exists in context: a
/// classpath index, a fixture set in tests. Loading is allowed to fail for
/// any name; callers go through [`resolve_runtime_class`] which absorbs that.
pub trait ClassLoader: Send + Sync {
    fn load(&self, binary_name: &str) -> Result<ClassHandle, LoadError>;
}

/// Loader over a fixed set of known class names.
#[derive(Debug, Clone, Default)]
pub struct FixedClassLoader {
    known: HashSet<String>,
}

impl FixedClassLoader {
    pub fn new(known: impl IntoIterator<Item = String>) -> Self {
        Self {
            known: known.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, binary_name: impl Into<String>) {
        self.known.insert(binary_name.into());
    }
}

impl ClassLoader for FixedClassLoader {
    fn load(&self, binary_name: &str) -> Result<ClassHandle, LoadError> {
        if self.known.contains(binary_name) {
            Ok(ClassHandle {
                binary_name: binary_name.to_string(),
            })
        } else {
            Err(LoadError::NotFound(binary_name.to_string()))
        }
    }
}

/// Outcome of resolving a symbolic type against a loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(Type),
    Unresolved,
}

impl Resolution {
    /// The deliberate fallback: an unresolved reference degrades to
    /// `java.lang.Object` so analysis can make progress.
    pub fn or_object(self) -> Type {
        match self {
            Resolution::Resolved(ty) => ty,
            Resolution::Unresolved => Type::object(),
        }
    }

    pub fn resolved(&self) -> Option<&Type> {
        match self {
            Resolution::Resolved(ty) => Some(ty),
            Resolution::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Resolves a symbolic type to a concrete runtime class.
///
/// Primitive kinds map to their boxed wrapper; arrays resolve the component
/// recursively and rebuild the array type; declared kinds are loaded by
/// binary name through [`attempt`], so an unloadable class yields
/// [`Resolution::Unresolved`] rather than an error. Never panics.
pub fn resolve_runtime_class(ty: &SymbolicType, loader: &dyn ClassLoader) -> Resolution {
    match ty {
        SymbolicType::Primitive(p) => Resolution::Resolved(Type::named(p.wrapper_class())),
        SymbolicType::Void => Resolution::Resolved(Type::named("java.lang.Void")),
        SymbolicType::Array(component) => match resolve_runtime_class(component, loader) {
            Resolution::Resolved(inner) => Resolution::Resolved(Type::array(inner)),
            Resolution::Unresolved => Resolution::Unresolved,
        },
        SymbolicType::Declared { binary_name } => {
            match attempt(|| loader.load(binary_name)) {
                Some(handle) => Resolution::Resolved(Type::named(handle.binary_name)),
                None => {
                    tracing::debug!(class = %binary_name, "symbolic type did not resolve");
                    Resolution::Unresolved
                }
            }
        }
        SymbolicType::Error => Resolution::Unresolved,
    }
}
