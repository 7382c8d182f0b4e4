//! Live backend: descriptors over already-compiled classes.
//!
//! Input is a classfile stub — access-flag bitmasks, JVM descriptor strings,
//! concrete annotation data. Everything resolves synchronously at
//! construction; there is nothing to defer.

use fxwire_types::{attempt, Annotation, AnnotationSet, ElementValue, ModifierSet, Type, TypeKind};

use crate::descriptor::parse_method_descriptor;
use crate::{descriptor, ConstructorDesc, Declaration, FieldDesc, MethodDesc, ParameterDescriptor, TypeDesc};

/// A compiled class as its stub describes it.
#[derive(Debug, Clone, Default)]
pub struct LoadedClass {
    pub binary_name: String,
    pub access_flags: u16,
    pub annotations: Vec<Annotation>,
    pub fields: Vec<LoadedMember>,
    /// Methods in classfile order, `<init>`/`<clinit>` entries included.
    pub methods: Vec<LoadedMember>,
}

#[derive(Debug, Clone, Default)]
pub struct LoadedMember {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    pub annotations: Vec<Annotation>,
    pub constant_value: Option<ElementValue>,
}

/// Live-backed type descriptor.
#[derive(Debug)]
pub struct LiveType {
    qualified_name: String,
    kind: TypeKind,
    modifiers: ModifierSet,
    annotations: AnnotationSet,
    constructors: Vec<LiveConstructor>,
    fields: Vec<LiveField>,
    methods: Vec<LiveMethod>,
}

#[derive(Debug)]
pub struct LiveField {
    name: String,
    modifiers: ModifierSet,
    annotations: AnnotationSet,
    ty: Type,
    constant_value: Option<ElementValue>,
}

#[derive(Debug)]
pub struct LiveMethod {
    name: String,
    modifiers: ModifierSet,
    annotations: AnnotationSet,
    params: Vec<ParameterDescriptor>,
    return_type: Type,
}

#[derive(Debug)]
pub struct LiveConstructor {
    modifiers: ModifierSet,
    annotations: AnnotationSet,
    params: Vec<ParameterDescriptor>,
}

impl LiveType {
    /// Builds the descriptor snapshot. A member whose descriptor fails to
    /// parse degrades to `Unknown` types; one bad member never aborts the
    /// siblings.
    pub fn new(class: LoadedClass) -> Self {
        let kind = TypeKind::from_access_flags(class.access_flags);
        let modifiers = ModifierSet::decode(class.access_flags);
        let annotations = AnnotationSet::new(class.annotations);

        let fields = class
            .fields
            .into_iter()
            .map(|f| {
                let ty = attempt(|| descriptor::parse_field_descriptor(&f.descriptor))
                    .unwrap_or(Type::Unknown);
                LiveField {
                    name: f.name,
                    modifiers: ModifierSet::decode(f.access_flags),
                    annotations: AnnotationSet::new(f.annotations),
                    ty,
                    constant_value: f.constant_value,
                }
            })
            .collect();

        let mut constructors = Vec::new();
        let mut methods = Vec::new();
        for m in class.methods {
            if m.name == "<clinit>" {
                continue;
            }
            let (param_types, return_type) = attempt(|| parse_method_descriptor(&m.descriptor))
                .unwrap_or((Vec::new(), Type::Unknown));
            // Classfiles carry no parameter names; synthesize positional ones.
            let params = param_types
                .into_iter()
                .enumerate()
                .map(|(i, ty)| ParameterDescriptor::live(format!("arg{i}"), ty))
                .collect();

            if m.name == "<init>" {
                constructors.push(LiveConstructor {
                    modifiers: ModifierSet::decode(m.access_flags),
                    annotations: AnnotationSet::new(m.annotations),
                    params,
                });
            } else {
                methods.push(LiveMethod {
                    name: m.name,
                    modifiers: ModifierSet::decode(m.access_flags),
                    annotations: AnnotationSet::new(m.annotations),
                    params,
                    return_type,
                });
            }
        }

        Self {
            qualified_name: class.binary_name,
            kind,
            modifiers,
            annotations,
            constructors,
            fields,
            methods,
        }
    }
}

impl Declaration for LiveType {
    fn name(&self) -> &str {
        self.simple_name()
    }

    fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }
}

impl TypeDesc for LiveType {
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

impl Declaration for LiveField {
    fn name(&self) -> &str {
        &self.name
    }

    fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }
}

impl FieldDesc for LiveField {
    fn ty(&self) -> &Type {
        &self.ty
    }

    fn constant_value(&self) -> Option<&ElementValue> {
        self.constant_value.as_ref()
    }
}

impl Declaration for LiveMethod {
    fn name(&self) -> &str {
        &self.name
    }

    fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }
}

impl MethodDesc for LiveMethod {
    fn params(&self) -> &[ParameterDescriptor] {
        &self.params
    }

    fn return_type(&self) -> &Type {
        &self.return_type
    }
}

impl Declaration for LiveConstructor {
    fn name(&self) -> &str {
        "<init>"
    }

    fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }
}

impl ConstructorDesc for LiveConstructor {
    fn params(&self) -> &[ParameterDescriptor] {
        &self.params
    }
}
