use std::{fmt, fmt::Formatter, str::Chars};

use itertools::Itertools;

use ClassReaderError::InvalidTypeDescriptor;

use crate::{basic_type::BasicType, class_reader_error::ClassReaderError};

/// Models the type of one field, or one parameter of a method
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Primitive types
    Base(BaseType),

    /// Standard object
    Object(String),

    /// Flattenable value of a primitive class, i.e. a `Q` descriptor
    Inline(String),

    /// Array
    Array(Box<FieldType>),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Base(base) => write!(f, "{base}"),
            FieldType::Object(class) => f.write_str(class),
            FieldType::Inline(class) => write!(f, "{class}.val"),
            FieldType::Array(component_type) => write!(f, "{component_type}[]"),
        }
    }
}

/// Possible primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[repr(u8)]
pub enum BaseType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
}

impl From<BaseType> for BasicType {
    fn from(base_type: BaseType) -> Self {
        match base_type {
            BaseType::Byte => BasicType::Byte,
            BaseType::Char => BasicType::Char,
            BaseType::Double => BasicType::Double,
            BaseType::Float => BasicType::Float,
            BaseType::Int => BasicType::Int,
            BaseType::Long => BasicType::Long,
            BaseType::Short => BasicType::Short,
            BaseType::Boolean => BasicType::Boolean,
        }
    }
}

impl FieldType {
    /// The value type tag of a field declared with this type
    pub fn basic_type(&self) -> BasicType {
        match self {
            FieldType::Base(base_type) => (*base_type).into(),
            FieldType::Object(_) => BasicType::Object,
            FieldType::Inline(_) => BasicType::InlineType,
            FieldType::Array(_) => BasicType::Array,
        }
    }

    /// Name of the class a reference of this type points to. For arrays, this is the
    /// class of the innermost element, if any.
    pub fn referenced_class_name(&self) -> Option<&str> {
        match self {
            FieldType::Base(_) => None,
            FieldType::Object(class) | FieldType::Inline(class) => Some(class.as_str()),
            FieldType::Array(component_type) => component_type.referenced_class_name(),
        }
    }

    /// Parses a type descriptor as specified in the JVM specs:
    /// https://docs.oracle.com/javase/specs/jvms/se7/html/jvms-4.html#jvms-4.3.2
    pub fn parse(type_descriptor: &str) -> Result<FieldType, ClassReaderError> {
        let mut chars = type_descriptor.chars();
        let descriptor = Self::parse_from(type_descriptor, &mut chars)?;
        match chars.next() {
            None => Ok(descriptor),
            Some(_) => Err(InvalidTypeDescriptor(type_descriptor.to_string())),
        }
    }

    pub(crate) fn parse_from(
        type_descriptor: &str,
        chars: &mut Chars,
    ) -> Result<FieldType, ClassReaderError> {
        let first_char = chars
            .next()
            .ok_or(InvalidTypeDescriptor(type_descriptor.to_string()))?;

        Ok(match first_char {
            'B' => FieldType::Base(BaseType::Byte),
            'C' => FieldType::Base(BaseType::Char),
            'D' => FieldType::Base(BaseType::Double),
            'F' => FieldType::Base(BaseType::Float),
            'I' => FieldType::Base(BaseType::Int),
            'J' => FieldType::Base(BaseType::Long),
            'S' => FieldType::Base(BaseType::Short),
            'Z' => FieldType::Base(BaseType::Boolean),
            'L' => {
                let class_name: String = chars.take_while_ref(|c| *c != ';').collect();
                match chars.next() {
                    Some(';') => FieldType::Object(class_name),
                    _ => return Err(InvalidTypeDescriptor(type_descriptor.to_string())),
                }
            }
            'Q' => {
                let class_name: String = chars.take_while_ref(|c| *c != ';').collect();
                match chars.next() {
                    Some(';') if !class_name.is_empty() => FieldType::Inline(class_name),
                    _ => return Err(InvalidTypeDescriptor(type_descriptor.to_string())),
                }
            }
            '[' => {
                let component_type = Self::parse_from(type_descriptor, chars)?;
                FieldType::Array(Box::new(component_type))
            }
            _ => return Err(InvalidTypeDescriptor(type_descriptor.to_string())),
        })
    }
}
