//! JavaBeans property aggregation.
//!
//! A property pairs one field with its getter and, when present, its setter.
//! Pairing follows the JavaBeans accessor convention, including the
//! `boolean isActive` special case where the field name already carries the
//! `is` prefix.

use fxwire_types::{PrimitiveType, Type};

use crate::{FieldDesc, MethodDesc, TypeDesc};

/// A field together with its accessors.
pub struct PropertyDescriptor<'a> {
    pub name: String,
    pub field: &'a dyn FieldDesc,
    pub getter: &'a dyn MethodDesc,
    pub setter: Option<&'a dyn MethodDesc>,
    /// True iff no setter is present.
    pub read_only: bool,
}

/// Derives the properties of a type, in field declaration order. A field
/// with no matching getter contributes no property.
pub fn properties(ty: &dyn TypeDesc) -> Vec<PropertyDescriptor<'_>> {
    let methods = ty.methods();
    let mut out = Vec::new();

    for field in ty.fields() {
        if field.modifiers().is_static() {
            continue;
        }
        let is_boolean = matches!(field.ty(), Type::Primitive(PrimitiveType::Boolean));
        let (getter_name, property_name) = accessor_names(field.name(), is_boolean);

        let Some(getter) = methods
            .iter()
            .find(|m| m.name() == getter_name && m.params().is_empty())
        else {
            continue;
        };

        let setter_name = format!("set{}", capitalize(&property_name));
        let setter = methods
            .iter()
            .find(|m| m.name() == setter_name && m.params().len() == 1)
            .copied();

        out.push(PropertyDescriptor {
            name: property_name,
            field,
            getter: *getter,
            setter,
            read_only: setter.is_none(),
        });
    }

    out
}

pub(crate) fn accessor_names(field_name: &str, is_boolean: bool) -> (String, String) {
    if is_boolean {
        if let Some(rest) = field_name.strip_prefix("is") {
            if rest.chars().next().is_some_and(|c| c.is_uppercase()) {
                // `boolean isActive` => getter: `isActive()`, property: `active`.
                let prop = decapitalize(rest);
                return (field_name.to_string(), prop);
            }
        }
        (
            format!("is{}", capitalize(field_name)),
            field_name.to_string(),
        )
    } else {
        (
            format!("get{}", capitalize(field_name)),
            field_name.to_string(),
        )
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaded::{LiveType, LoadedClass, LoadedMember};
    use fxwire_types::modifiers::{ACC_PRIVATE, ACC_PUBLIC};

    fn member(name: &str, descriptor: &str, flags: u16) -> LoadedMember {
        LoadedMember {
            access_flags: flags,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            annotations: vec![],
            constant_value: None,
        }
    }

    fn bean() -> LiveType {
        LiveType::new(LoadedClass {
            binary_name: "com.example.Bean".to_string(),
            access_flags: ACC_PUBLIC,
            annotations: vec![],
            fields: vec![
                member("count", "I", ACC_PRIVATE),
                member("title", "Ljava/lang/String;", ACC_PRIVATE),
                member("isActive", "Z", ACC_PRIVATE),
                member("orphan", "J", ACC_PRIVATE),
            ],
            methods: vec![
                member("getCount", "()I", ACC_PUBLIC),
                member("setCount", "(I)V", ACC_PUBLIC),
                member("getTitle", "()Ljava/lang/String;", ACC_PUBLIC),
                member("isActive", "()Z", ACC_PUBLIC),
                member("setActive", "(Z)V", ACC_PUBLIC),
            ],
        })
    }

    #[test]
    fn pairs_getters_and_setters() {
        let ty = bean();
        let props = properties(&ty);
        assert_eq!(props.len(), 3);

        assert_eq!(props[0].name, "count");
        assert!(!props[0].read_only);
        assert_eq!(props[0].getter.name(), "getCount");
        assert_eq!(props[0].setter.unwrap().name(), "setCount");

        // Getter but no setter: read-only.
        assert_eq!(props[1].name, "title");
        assert!(props[1].read_only);
        assert!(props[1].setter.is_none());
    }

    #[test]
    fn boolean_is_prefix_convention() {
        let ty = bean();
        let props = properties(&ty);
        let active = &props[2];
        assert_eq!(active.name, "active");
        assert_eq!(active.getter.name(), "isActive");
        assert_eq!(active.setter.unwrap().name(), "setActive");
        assert!(!active.read_only);
    }

    #[test]
    fn field_without_getter_contributes_nothing() {
        let ty = bean();
        let props = properties(&ty);
        assert!(props.iter().all(|p| p.name != "orphan"));
    }

    #[test]
    fn accessor_name_derivation() {
        assert_eq!(
            accessor_names("count", false),
            ("getCount".to_string(), "count".to_string())
        );
        assert_eq!(
            accessor_names("active", true),
            ("isActive".to_string(), "active".to_string())
        );
        assert_eq!(
            accessor_names("isActive", true),
            ("isActive".to_string(), "active".to_string())
        );
    }
}
