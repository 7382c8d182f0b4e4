//! Source-level annotation data model.
//!
//! Both backends normalize their annotations into this shape: the live
//! backend from classfile attribute data, the mirror backend by resolving
//! symbolic annotation types through the bridge.

use serde::{Deserialize, Serialize};

/// One element value inside an annotation instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementValue {
    String(String),
    Int(i64),
    Double(f64),
    Boolean(bool),
    /// A `Foo.class` reference, by binary name.
    Class(String),
    Enum {
        type_name: String,
        const_name: String,
    },
    Annotation(Box<Annotation>),
    Array(Vec<ElementValue>),
}

impl ElementValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ElementValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&str> {
        match self {
            ElementValue::Class(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_annotation(&self) -> Option<&Annotation> {
        match self {
            ElementValue::Annotation(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ElementValue]> {
        match self {
            ElementValue::Array(values) => Some(values),
            _ => None,
        }
    }
}

/// One annotation instance attached to a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Binary name of the annotation type (`com.example.FxView`), or its
    /// simple name when the origin only had that much.
    pub type_name: String,
    pub elements: Vec<(String, ElementValue)>,
}

impl Annotation {
    pub fn new(type_name: impl Into<String>) -> Self {
        let mut type_name = type_name.into();
        if let Some(stripped) = type_name.strip_prefix('@') {
            type_name = stripped.to_string();
        }
        Self {
            type_name,
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, name: impl Into<String>, value: ElementValue) -> Self {
        self.elements.push((name.into(), value));
        self
    }

    /// Matches a query by qualified name, or by simple name when either side
    /// only carries that much.
    pub fn matches(&self, query: &str) -> bool {
        if self.type_name == query {
            return true;
        }
        let own_simple = self.type_name.rsplit('.').next().unwrap_or(&self.type_name);
        let query_simple = query.rsplit('.').next().unwrap_or(query);
        own_simple == query_simple
    }

    pub fn value(&self, element: &str) -> Option<&ElementValue> {
        self.elements
            .iter()
            .find(|(name, _)| name == element)
            .map(|(_, value)| value)
    }

    pub fn string_value(&self, element: &str) -> Option<&str> {
        self.value(element).and_then(ElementValue::as_str)
    }
}

/// The annotations attached to one declaration.
///
/// This is a multiset: malformed input may attach the same annotation kind
/// more than once, and that duplication is preserved rather than collapsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSet {
    items: Vec<Annotation>,
}

impl AnnotationSet {
    pub fn new(items: Vec<Annotation>) -> Self {
        Self { items }
    }

    pub fn has(&self, kind: &str) -> bool {
        self.items.iter().any(|a| a.matches(kind))
    }

    /// First instance of `kind`, in attachment order.
    pub fn get(&self, kind: &str) -> Option<&Annotation> {
        self.items.iter().find(|a| a.matches(kind))
    }

    /// Every instance of `kind`, in attachment order.
    pub fn all<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Annotation> {
        self.items.iter().filter(move |a| a.matches(kind))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Annotation> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
