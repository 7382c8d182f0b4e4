//! Mirror backend: descriptors over compiler symbol-table entries.
//!
//! Annotation resolution needs the bridge (the annotation's type may not be
//! loadable yet) and can be expensive, so it is lazy and memoized: computed
//! on first access, published once. Constructing a descriptor with
//! `initialized = false` does no bridge work at all; `true` resolves
//! everything eagerly.

use std::sync::{Arc, OnceLock};

use fxwire_bridge::{resolve_runtime_class, ClassLoader, Resolution};
use fxwire_types::{Annotation, AnnotationSet, ElementValue, ModifierSet, Type, TypeKind};

use crate::symbol::{AnnotationMirror, ClassSymbol, ConstructorSymbol, FieldSymbol, MethodSymbol};
use crate::{ConstructorDesc, Declaration, FieldDesc, MethodDesc, ParameterDescriptor, SymbolId, TypeDesc};

fn resolve_annotations(mirrors: &[AnnotationMirror], loader: &dyn ClassLoader) -> AnnotationSet {
    mirrors
        .iter()
        .map(|mirror| match resolve_runtime_class(&mirror.ty, loader) {
            Resolution::Resolved(ty) => Annotation {
                type_name: ty.to_string(),
                elements: mirror.elements.clone(),
            },
            // Unloadable annotation type: keep the instance (the multiset
            // cardinality must survive) but nothing is extractable from it.
            Resolution::Unresolved => Annotation::new("java.lang.Object"),
        })
        .collect()
}

/// Converts parameter annotations at face value, without touching the
/// loader: parameters only ever need their annotation *data*, not a loaded
/// annotation class, and going through the bridge here would break the
/// deferred-construction guarantee.
fn face_value_annotations(mirrors: &[AnnotationMirror]) -> AnnotationSet {
    mirrors
        .iter()
        .map(|mirror| Annotation {
            type_name: mirror.ty.erase().to_string(),
            elements: mirror.elements.clone(),
        })
        .collect()
}

fn mirror_params(params: Vec<crate::symbol::ParameterSymbol>) -> Vec<ParameterDescriptor> {
    params
        .into_iter()
        .map(|p| {
            ParameterDescriptor::mirror(p.name, p.ty.erase(), face_value_annotations(&p.annotations), p.id)
        })
        .collect()
}

struct LazyAnnotations {
    mirrors: Vec<AnnotationMirror>,
    loader: Arc<dyn ClassLoader>,
    resolved: OnceLock<AnnotationSet>,
}

impl LazyAnnotations {
    fn new(mirrors: Vec<AnnotationMirror>, loader: Arc<dyn ClassLoader>, initialized: bool) -> Self {
        let this = Self {
            mirrors,
            loader,
            resolved: OnceLock::new(),
        };
        if initialized {
            this.get();
        }
        this
    }

    fn get(&self) -> &AnnotationSet {
        self.resolved
            .get_or_init(|| resolve_annotations(&self.mirrors, &*self.loader))
    }
}

impl std::fmt::Debug for LazyAnnotations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyAnnotations")
            .field("mirrors", &self.mirrors.len())
            .field("resolved", &self.resolved.get().is_some())
            .finish()
    }
}

/// Mirror-backed type descriptor.
#[derive(Debug)]
pub struct MirrorType {
    id: SymbolId,
    qualified_name: String,
    kind: TypeKind,
    modifiers: ModifierSet,
    annotations: LazyAnnotations,
    constructors: Vec<MirrorConstructor>,
    fields: Vec<MirrorField>,
    methods: Vec<MirrorMethod>,
}

#[derive(Debug)]
pub struct MirrorField {
    id: SymbolId,
    name: String,
    ty: Type,
    modifiers: ModifierSet,
    annotations: LazyAnnotations,
    constant_value: Option<ElementValue>,
}

#[derive(Debug)]
pub struct MirrorMethod {
    id: SymbolId,
    name: String,
    return_type: Type,
    modifiers: ModifierSet,
    annotations: LazyAnnotations,
    params: Vec<ParameterDescriptor>,
}

#[derive(Debug)]
pub struct MirrorConstructor {
    id: SymbolId,
    modifiers: ModifierSet,
    annotations: LazyAnnotations,
    params: Vec<ParameterDescriptor>,
}

impl MirrorType {
    /// Builds the descriptor snapshot from a symbol entry.
    ///
    /// With `initialized = false` no bridge work happens here; annotations
    /// resolve on first access. With `true` they resolve eagerly.
    pub fn new(symbol: ClassSymbol, loader: Arc<dyn ClassLoader>, initialized: bool) -> Self {
        let ClassSymbol {
            id,
            qualified_name,
            kind,
            modifiers,
            annotations,
            constructors,
            fields,
            methods,
        } = symbol;

        let constructors = constructors
            .into_iter()
            .map(|c| MirrorConstructor::new(c, loader.clone(), initialized))
            .collect();
        let fields = fields
            .into_iter()
            .map(|f| MirrorField::new(f, loader.clone(), initialized))
            .collect();
        let methods = methods
            .into_iter()
            .map(|m| MirrorMethod::new(m, loader.clone(), initialized))
            .collect();

        Self {
            id,
            qualified_name,
            kind: TypeKind::normalize(&kind),
            modifiers: ModifierSet::from_origin(modifiers.iter().map(String::as_str)),
            annotations: LazyAnnotations::new(annotations, loader, initialized),
            constructors,
            fields,
            methods,
        }
    }

    pub fn symbol_id(&self) -> SymbolId {
        self.id
    }
}

impl MirrorField {
    fn new(symbol: FieldSymbol, loader: Arc<dyn ClassLoader>, initialized: bool) -> Self {
        Self {
            id: symbol.id,
            name: symbol.name,
            ty: symbol.ty.erase(),
            modifiers: ModifierSet::from_origin(symbol.modifiers.iter().map(String::as_str)),
            annotations: LazyAnnotations::new(symbol.annotations, loader, initialized),
            constant_value: symbol.constant_value,
        }
    }

    pub fn symbol_id(&self) -> SymbolId {
        self.id
    }
}

impl MirrorMethod {
    fn new(symbol: MethodSymbol, loader: Arc<dyn ClassLoader>, initialized: bool) -> Self {
        Self {
            id: symbol.id,
            name: symbol.name,
            return_type: symbol.return_type.erase(),
            modifiers: ModifierSet::from_origin(symbol.modifiers.iter().map(String::as_str)),
            params: mirror_params(symbol.params),
            annotations: LazyAnnotations::new(symbol.annotations, loader, initialized),
        }
    }

    pub fn symbol_id(&self) -> SymbolId {
        self.id
    }
}

impl MirrorConstructor {
    fn new(symbol: ConstructorSymbol, loader: Arc<dyn ClassLoader>, initialized: bool) -> Self {
        Self {
            id: symbol.id,
            modifiers: ModifierSet::from_origin(symbol.modifiers.iter().map(String::as_str)),
            params: mirror_params(symbol.params),
            annotations: LazyAnnotations::new(symbol.annotations, loader, initialized),
        }
    }

    pub fn symbol_id(&self) -> SymbolId {
        self.id
    }
}

// Mirror descriptors compare by symbol identity, never by name or type.

impl PartialEq for MirrorType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for MirrorType {}

impl PartialEq for MirrorField {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for MirrorField {}

impl PartialEq for MirrorMethod {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for MirrorMethod {}

impl PartialEq for MirrorConstructor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for MirrorConstructor {}

impl Declaration for MirrorType {
    fn name(&self) -> &str {
        self.simple_name()
    }

    fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    fn annotations(&self) -> &AnnotationSet {
        self.annotations.get()
    }
}

impl TypeDesc for MirrorType {
    fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    fn kind(&self) -> TypeKind {
        self.kind
    }

    fn constructors(&self) -> Vec<&dyn ConstructorDesc> {
        self.constructors.iter().map(|c| c as _).collect()
    }

    fn fields(&self) -> Vec<&dyn FieldDesc> {
        self.fields.iter().map(|f| f as _).collect()
    }

    fn methods(&self) -> Vec<&dyn MethodDesc> {
        self.methods.iter().map(|m| m as _).collect()
    }
}

impl Declaration for MirrorField {
    fn name(&self) -> &str {
        &self.name
    }

    fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    fn annotations(&self) -> &AnnotationSet {
        self.annotations.get()
    }
}

impl FieldDesc for MirrorField {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn constant_value(&self) -> Option<&ElementValue> {
        self.constant_value.as_ref()
    }
}

impl Declaration for MirrorMethod {
    fn name(&self) -> &str {
        &self.name
    }

    fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    fn annotations(&self) -> &AnnotationSet {
        self.annotations.get()
    }
}

impl MethodDesc for MirrorMethod {
    fn params(&self) -> &[ParameterDescriptor] {
        &self.params
    }

    fn return_type(&self) -> &Type {
        &self.return_type
    }
}

impl Declaration for MirrorConstructor {
    fn name(&self) -> &str {
        "<init>"
    }

    fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    fn annotations(&self) -> &AnnotationSet {
        self.annotations.get()
    }
}

impl ConstructorDesc for MirrorConstructor {
    fn params(&self) -> &[ParameterDescriptor] {
        &self.params
    }
}
