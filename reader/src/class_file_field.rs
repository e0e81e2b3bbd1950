use crate::{class_reader_error::Result, field_flags::FieldFlags, field_type::FieldType};

/// Models a field in a class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassFileField {
    pub flags: FieldFlags,
    pub name: String,
    pub type_descriptor: FieldType,
}

impl ClassFileField {
    /// Builds a field, parsing its type descriptor
    pub fn new(flags: FieldFlags, name: &str, type_descriptor: &str) -> Result<Self> {
        Ok(Self {
            flags,
            name: name.to_string(),
            type_descriptor: FieldType::parse(type_descriptor)?,
        })
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(FieldFlags::STATIC)
    }

    /// Whether this field is recorded as a virtual field of its class
    pub fn is_virtual(&self) -> bool {
        self.flags.marks_virtual_field()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        class_file_field::ClassFileField,
        class_reader_error::ClassReaderError,
        field_flags::FieldFlags,
        field_type::{BaseType, FieldType},
    };

    #[test]
    fn can_create_field() {
        let field = ClassFileField::new(FieldFlags::PRIVATE, "x", "I").unwrap();
        assert_eq!("x", field.name);
        assert_eq!(FieldType::Base(BaseType::Int), field.type_descriptor);
        assert!(!field.is_static());
        assert!(!field.is_virtual());
    }

    #[test]
    fn invalid_descriptor_is_rejected() {
        assert_eq!(
            Err(ClassReaderError::InvalidTypeDescriptor("Lfoo".to_string())),
            ClassFileField::new(FieldFlags::PUBLIC, "x", "Lfoo")
        );
    }

    #[test]
    fn static_synthetic_fields_are_not_virtual() {
        let field = ClassFileField::new(
            FieldFlags::STATIC | FieldFlags::SYNTHETIC,
            "cache",
            "Ljava/lang/Object;",
        )
        .unwrap();
        assert!(!field.is_virtual());

        let field =
            ClassFileField::new(FieldFlags::SYNTHETIC, "next", "Ljava/lang/Object;").unwrap();
        assert!(field.is_virtual());
    }
}
