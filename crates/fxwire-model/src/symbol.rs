//! Mirror backend input: compiler symbol-table entries.
//!
//! These are the raw facts a compiler front end can dump mid-compilation:
//! origin-specific modifier and kind names, symbolic type references, and
//! annotation mirrors whose types may not be loadable yet. The whole shape
//! is serde-derived so symbol dumps can travel as JSON.

use serde::{Deserialize, Serialize};

use fxwire_bridge::SymbolicType;
use fxwire_types::ElementValue;

use crate::SymbolId;

/// An annotation as the symbol table sees it: a symbolic type reference plus
/// already-evaluated element values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationMirror {
    pub ty: SymbolicType,
    #[serde(default)]
    pub elements: Vec<(String, ElementValue)>,
}

impl AnnotationMirror {
    pub fn new(ty: SymbolicType) -> Self {
        Self {
            ty,
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, name: impl Into<String>, value: ElementValue) -> Self {
        self.elements.push((name.into(), value));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSymbol {
    pub id: SymbolId,
    /// Qualified binary name; empty for an anonymous class.
    #[serde(default)]
    pub qualified_name: String,
    /// Origin element-kind name (`CLASS`, `INTERFACE`, ...).
    pub kind: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationMirror>,
    #[serde(default)]
    pub constructors: Vec<ConstructorSymbol>,
    #[serde(default)]
    pub fields: Vec<FieldSymbol>,
    #[serde(default)]
    pub methods: Vec<MethodSymbol>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSymbol {
    pub id: SymbolId,
    pub name: String,
    pub ty: SymbolicType,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationMirror>,
    #[serde(default)]
    pub constant_value: Option<ElementValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSymbol {
    pub id: SymbolId,
    pub name: String,
    #[serde(default = "SymbolicType::void")]
    pub return_type: SymbolicType,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationMirror>,
    #[serde(default)]
    pub params: Vec<ParameterSymbol>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorSymbol {
    pub id: SymbolId,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationMirror>,
    #[serde(default)]
    pub params: Vec<ParameterSymbol>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSymbol {
    pub id: SymbolId,
    pub name: String,
    pub ty: SymbolicType,
    #[serde(default)]
    pub annotations: Vec<AnnotationMirror>,
}
