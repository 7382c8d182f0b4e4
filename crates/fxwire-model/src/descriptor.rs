//! JVM descriptor parsing for the live backend.
//!
//! Classfile stubs describe member types with descriptor strings
//! (`(ILjava/lang/String;)[I`). This module parses that grammar straight
//! into the shared [`Type`] model, converting internal names (`java/lang/X`)
//! to binary names (`java.lang.X`) as it goes.

use thiserror::Error;

use fxwire_types::{PrimitiveType, Type};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("invalid descriptor: {0}")]
    Invalid(String),
}

type Result<T> = std::result::Result<T, DescriptorError>;

/// Parses a field descriptor (`Ljava/lang/String;`, `[[I`, ...).
pub fn parse_field_descriptor(desc: &str) -> Result<Type> {
    let (ty, rest) = parse_type(desc)?;
    if !rest.is_empty() {
        return Err(DescriptorError::Invalid(desc.to_string()));
    }
    Ok(ty)
}

/// Parses a method descriptor into `(parameter types, return type)`.
pub fn parse_method_descriptor(desc: &str) -> Result<(Vec<Type>, Type)> {
    let body = desc
        .strip_prefix('(')
        .ok_or_else(|| DescriptorError::Invalid(desc.to_string()))?;

    let mut rest = body;
    let mut params = Vec::new();
    loop {
        if let Some(after) = rest.strip_prefix(')') {
            rest = after;
            break;
        }
        if rest.is_empty() {
            return Err(DescriptorError::Invalid(desc.to_string()));
        }
        let (param, remaining) = parse_type(rest)?;
        params.push(param);
        rest = remaining;
    }

    let (return_type, trailing) = if let Some(after) = rest.strip_prefix('V') {
        (Type::Void, after)
    } else {
        parse_type(rest)?
    };
    if !trailing.is_empty() {
        return Err(DescriptorError::Invalid(desc.to_string()));
    }

    Ok((params, return_type))
}

fn parse_type(input: &str) -> Result<(Type, &str)> {
    let mut chars = input.chars();
    match chars.next() {
        Some('B') => Ok((Type::Primitive(PrimitiveType::Byte), &input[1..])),
        Some('C') => Ok((Type::Primitive(PrimitiveType::Char), &input[1..])),
        Some('D') => Ok((Type::Primitive(PrimitiveType::Double), &input[1..])),
        Some('F') => Ok((Type::Primitive(PrimitiveType::Float), &input[1..])),
        Some('I') => Ok((Type::Primitive(PrimitiveType::Int), &input[1..])),
        Some('J') => Ok((Type::Primitive(PrimitiveType::Long), &input[1..])),
        Some('S') => Ok((Type::Primitive(PrimitiveType::Short), &input[1..])),
        Some('Z') => Ok((Type::Primitive(PrimitiveType::Boolean), &input[1..])),
        Some('L') => match input.find(';') {
            Some(end) => {
                let binary = input[1..end].replace('/', ".");
                Ok((Type::named(binary), &input[end + 1..]))
            }
            None => Err(DescriptorError::Invalid(input.to_string())),
        },
        Some('[') => {
            let (component, rest) = parse_type(&input[1..])?;
            Ok((Type::array(component), rest))
        }
        _ => Err(DescriptorError::Invalid(input.to_string())),
    }
}
