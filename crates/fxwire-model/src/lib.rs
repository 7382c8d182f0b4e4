//! Unified declaration model.
//!
//! Describes "a type and its members" identically whether the facts come
//! from a compiled classfile stub (the *live* backend, [`loaded`]) or from a
//! compiler symbol-table entry serialized mid-compilation (the *mirror*
//! backend, [`symbol`] + [`mirror`]). Consumers depend only on the
//! descriptor traits below, never on a concrete backend, so either side can
//! be replaced by a test double.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use fxwire_types::{Annotation, AnnotationSet, ModifierSet, Type, TypeKind};

pub mod descriptor;
pub mod loaded;
pub mod mirror;
pub mod property;
pub mod symbol;

pub use loaded::{LiveConstructor, LiveField, LiveMethod, LiveType, LoadedClass, LoadedMember};
pub use mirror::{MirrorConstructor, MirrorField, MirrorMethod, MirrorType};
pub use property::{properties, PropertyDescriptor};
pub use symbol::{
    AnnotationMirror, ClassSymbol, ConstructorSymbol, FieldSymbol, MethodSymbol, ParameterSymbol,
};

/// Identity of a compiler symbol-table entry.
///
/// Mirror-backed descriptors compare by this, never by name or type: two
/// differently-declared elements that happen to share a name and type must
/// remain distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u64);

/// Capability surface shared by every declaration descriptor.
pub trait Declaration {
    fn name(&self) -> &str;
    fn modifiers(&self) -> &ModifierSet;
    fn annotations(&self) -> &AnnotationSet;

    fn has_annotation(&self, kind: &str) -> bool {
        self.annotations().has(kind)
    }

    fn annotation(&self, kind: &str) -> Option<&Annotation> {
        self.annotations().get(kind)
    }
}

/// One declared type and the members it exposes.
pub trait TypeDesc: Declaration {
    /// Qualified binary name. Empty for an anonymous type; that is a valid,
    /// checked state, not an error.
    fn qualified_name(&self) -> &str;
    fn kind(&self) -> TypeKind;

    /// Constructors in declaration order.
    fn constructors(&self) -> Vec<&dyn ConstructorDesc>;
    /// Fields in declaration order.
    fn fields(&self) -> Vec<&dyn FieldDesc>;
    /// Methods in declaration order.
    fn methods(&self) -> Vec<&dyn MethodDesc>;

    fn package_name(&self) -> &str {
        let qualified = self.qualified_name();
        match qualified.rfind('.') {
            Some(idx) => &qualified[..idx],
            None => "",
        }
    }

    fn simple_name(&self) -> &str {
        let qualified = self.qualified_name();
        qualified.rsplit('.').next().unwrap_or(qualified)
    }
}

pub trait FieldDesc: Declaration {
    fn ty(&self) -> &Type;
    /// Compile-time constant value, when the field has one.
    fn constant_value(&self) -> Option<&fxwire_types::ElementValue>;
}

pub trait MethodDesc: Declaration {
    fn params(&self) -> &[ParameterDescriptor];
    fn return_type(&self) -> &Type;
}

pub trait ConstructorDesc: Declaration {
    fn params(&self) -> &[ParameterDescriptor];
}

/// A formal parameter.
///
/// Equality is symbol identity whenever both sides are mirror-backed;
/// name+type comparison only applies between two live-backed parameters,
/// which carry no symbol.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    pub name: String,
    pub ty: Type,
    pub annotations: AnnotationSet,
    symbol: Option<SymbolId>,
}

impl ParameterDescriptor {
    pub fn live(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: AnnotationSet::default(),
            symbol: None,
        }
    }

    pub fn mirror(
        name: impl Into<String>,
        ty: Type,
        annotations: AnnotationSet,
        symbol: SymbolId,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations,
            symbol: Some(symbol),
        }
    }

    pub fn symbol_id(&self) -> Option<SymbolId> {
        self.symbol
    }
}

impl PartialEq for ParameterDescriptor {
    fn eq(&self, other: &Self) -> bool {
        match (self.symbol, other.symbol) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.name == other.name && self.ty == other.ty,
            _ => false,
        }
    }
}

impl Eq for ParameterDescriptor {}

impl Hash for ParameterDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.symbol {
            Some(id) => {
                1u8.hash(state);
                id.hash(state);
            }
            None => {
                0u8.hash(state);
                self.name.hash(state);
                self.ty.hash(state);
            }
        }
    }
}
