//! Modifier and kind normalization.
//!
//! Two origin representations feed this registry: the textual constants a
//! compiler symbol table carries (`javax.lang.model` style) and the JVM
//! access-flag bitmask a compiled classfile carries. Both map onto one
//! neutral vocabulary.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_PROTECTED: u16 = 0x0004;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_FINAL: u16 = 0x0010;
pub const ACC_SYNCHRONIZED: u16 = 0x0020;
pub const ACC_VOLATILE: u16 = 0x0040;
pub const ACC_TRANSIENT: u16 = 0x0080;
pub const ACC_NATIVE: u16 = 0x0100;
pub const ACC_INTERFACE: u16 = 0x0200;
pub const ACC_ABSTRACT: u16 = 0x0400;
pub const ACC_STRICT: u16 = 0x0800;
pub const ACC_ENUM: u16 = 0x4000;

/// Attempted to map a neutral tag back to an origin representation that does
/// not exist.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{0}` has no origin representation")]
pub struct NoInverseMapping(pub &'static str);

/// Neutral modifier vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strict,
    /// An origin modifier this registry does not recognize. Mapped here
    /// rather than dropped so callers can see that something was present.
    Unknown,
}

impl Modifier {
    /// Maps an origin modifier name onto the neutral vocabulary. Total: any
    /// unrecognized name becomes [`Modifier::Unknown`].
    pub fn normalize(origin: &str) -> Modifier {
        match origin.to_ascii_lowercase().as_str() {
            "public" => Modifier::Public,
            "protected" => Modifier::Protected,
            "private" => Modifier::Private,
            "abstract" => Modifier::Abstract,
            "static" => Modifier::Static,
            "final" => Modifier::Final,
            "transient" => Modifier::Transient,
            "volatile" => Modifier::Volatile,
            "synchronized" => Modifier::Synchronized,
            "native" => Modifier::Native,
            "strict" | "strictfp" => Modifier::Strict,
            _ => Modifier::Unknown,
        }
    }

    /// Inverse of [`Modifier::normalize`] where defined.
    pub fn denormalize(self) -> Result<&'static str, NoInverseMapping> {
        match self {
            Modifier::Public => Ok("public"),
            Modifier::Protected => Ok("protected"),
            Modifier::Private => Ok("private"),
            Modifier::Abstract => Ok("abstract"),
            Modifier::Static => Ok("static"),
            Modifier::Final => Ok("final"),
            Modifier::Transient => Ok("transient"),
            Modifier::Volatile => Ok("volatile"),
            Modifier::Synchronized => Ok("synchronized"),
            Modifier::Native => Ok("native"),
            Modifier::Strict => Ok("strictfp"),
            Modifier::Unknown => Err(NoInverseMapping("unknown")),
        }
    }
}

/// The kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Record,
    Interface,
    Enum,
    Unknown,
}

impl TypeKind {
    /// Maps an origin element-kind name onto the neutral vocabulary. Total.
    pub fn normalize(origin: &str) -> TypeKind {
        match origin.to_ascii_lowercase().as_str() {
            "class" => TypeKind::Class,
            "record" => TypeKind::Record,
            "interface" => TypeKind::Interface,
            "enum" => TypeKind::Enum,
            _ => TypeKind::Unknown,
        }
    }

    /// Derives the kind from a classfile access-flag bitmask.
    ///
    /// Records are not flagged in `access_flags` (they are an attribute), so
    /// this can only distinguish class/interface/enum.
    pub fn from_access_flags(flags: u16) -> TypeKind {
        if flags & ACC_INTERFACE != 0 {
            TypeKind::Interface
        } else if flags & ACC_ENUM != 0 {
            TypeKind::Enum
        } else {
            TypeKind::Class
        }
    }

    pub fn denormalize(self) -> Result<&'static str, NoInverseMapping> {
        match self {
            TypeKind::Class => Ok("class"),
            TypeKind::Record => Ok("record"),
            TypeKind::Interface => Ok("interface"),
            TypeKind::Enum => Ok("enum"),
            TypeKind::Unknown => Err(NoInverseMapping("unknown")),
        }
    }
}

/// A set of neutral modifier tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierSet {
    tags: BTreeSet<Modifier>,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a JVM access-flag bitmask. Each bit is tested independently;
    /// absent bits produce absent tags. A bitmask has no unrecognized state,
    /// so decoding never produces [`Modifier::Unknown`].
    pub fn decode(bitmask: u16) -> Self {
        const FLAGS: [(u16, Modifier); 11] = [
            (ACC_PUBLIC, Modifier::Public),
            (ACC_PRIVATE, Modifier::Private),
            (ACC_PROTECTED, Modifier::Protected),
            (ACC_STATIC, Modifier::Static),
            (ACC_FINAL, Modifier::Final),
            (ACC_SYNCHRONIZED, Modifier::Synchronized),
            (ACC_VOLATILE, Modifier::Volatile),
            (ACC_TRANSIENT, Modifier::Transient),
            (ACC_NATIVE, Modifier::Native),
            (ACC_ABSTRACT, Modifier::Abstract),
            (ACC_STRICT, Modifier::Strict),
        ];

        FLAGS
            .iter()
            .filter(|(flag, _)| bitmask & flag != 0)
            .map(|(_, tag)| *tag)
            .collect()
    }

    /// Normalizes a sequence of origin modifier names.
    pub fn from_origin<'a>(origin: impl IntoIterator<Item = &'a str>) -> Self {
        origin.into_iter().map(Modifier::normalize).collect()
    }

    pub fn insert(&mut self, tag: Modifier) {
        self.tags.insert(tag);
    }

    pub fn contains(&self, tag: Modifier) -> bool {
        self.tags.contains(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.tags.iter().copied()
    }

    pub fn is_public(&self) -> bool {
        self.contains(Modifier::Public)
    }

    pub fn is_private(&self) -> bool {
        self.contains(Modifier::Private)
    }

    pub fn is_static(&self) -> bool {
        self.contains(Modifier::Static)
    }

    pub fn is_final(&self) -> bool {
        self.contains(Modifier::Final)
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tag in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            f.write_str(tag.denormalize().unwrap_or("unknown"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_tests_each_bit_independently() {
        let cases = [
            (ACC_PUBLIC, Modifier::Public),
            (ACC_PRIVATE, Modifier::Private),
            (ACC_PROTECTED, Modifier::Protected),
            (ACC_STATIC, Modifier::Static),
            (ACC_FINAL, Modifier::Final),
            (ACC_SYNCHRONIZED, Modifier::Synchronized),
            (ACC_VOLATILE, Modifier::Volatile),
            (ACC_TRANSIENT, Modifier::Transient),
            (ACC_NATIVE, Modifier::Native),
            (ACC_ABSTRACT, Modifier::Abstract),
            (ACC_STRICT, Modifier::Strict),
        ];
        for (flag, tag) in cases {
            let set = ModifierSet::decode(flag);
            assert_eq!(set.len(), 1, "{tag:?}");
            assert!(set.contains(tag));
        }
    }

    #[test]
    fn decode_of_combined_mask() {
        let set = ModifierSet::decode(ACC_PUBLIC | ACC_STATIC | ACC_FINAL);
        assert_eq!(set.len(), 3);
        assert!(set.is_public());
        assert!(set.is_static());
        assert!(set.is_final());
        assert!(!set.is_private());
    }

    #[test]
    fn decode_never_produces_unknown() {
        assert!(ModifierSet::decode(0).is_empty());
        let everything = ModifierSet::decode(u16::MAX);
        assert!(!everything.contains(Modifier::Unknown));
        assert_eq!(everything.len(), 11);
    }

    #[test]
    fn normalize_is_total_and_injective_outside_unknown() {
        let known = [
            "public",
            "protected",
            "private",
            "abstract",
            "static",
            "final",
            "transient",
            "volatile",
            "synchronized",
            "native",
            "strictfp",
        ];
        let mut seen = std::collections::HashSet::new();
        for name in known {
            let tag = Modifier::normalize(name);
            assert_ne!(tag, Modifier::Unknown, "{name}");
            assert!(seen.insert(tag), "{name} collided");
        }
        assert_eq!(Modifier::normalize("sealed"), Modifier::Unknown);
        assert_eq!(Modifier::normalize("default"), Modifier::Unknown);
        assert_eq!(Modifier::normalize(""), Modifier::Unknown);
    }

    #[test]
    fn normalize_ignores_origin_case() {
        assert_eq!(Modifier::normalize("PUBLIC"), Modifier::Public);
        assert_eq!(Modifier::normalize("StAtIc"), Modifier::Static);
    }

    #[test]
    fn denormalize_roundtrips_known_tags() {
        for name in ["public", "static", "strictfp"] {
            let tag = Modifier::normalize(name);
            assert_eq!(tag.denormalize().unwrap(), name);
        }
        assert!(Modifier::Unknown.denormalize().is_err());
    }

    #[test]
    fn type_kind_normalize_is_total() {
        assert_eq!(TypeKind::normalize("CLASS"), TypeKind::Class);
        assert_eq!(TypeKind::normalize("record"), TypeKind::Record);
        assert_eq!(TypeKind::normalize("INTERFACE"), TypeKind::Interface);
        assert_eq!(TypeKind::normalize("ENUM"), TypeKind::Enum);
        assert_eq!(TypeKind::normalize("ANNOTATION_TYPE"), TypeKind::Unknown);
        assert!(TypeKind::Unknown.denormalize().is_err());
    }

    #[test]
    fn type_kind_from_access_flags() {
        assert_eq!(TypeKind::from_access_flags(ACC_PUBLIC), TypeKind::Class);
        assert_eq!(
            TypeKind::from_access_flags(ACC_PUBLIC | ACC_INTERFACE),
            TypeKind::Interface
        );
        assert_eq!(
            TypeKind::from_access_flags(ACC_PUBLIC | ACC_ENUM),
            TypeKind::Enum
        );
    }
}
