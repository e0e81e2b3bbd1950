use crate::class_file_field::ClassFileField;

/// The definition of a class, as handed to the class loader
#[derive(Debug, Clone, PartialEq)]
pub struct ClassFile {
    pub name: String,
    pub superclass: Option<String>,
    pub fields: Vec<ClassFileField>,
}

impl ClassFile {
    pub fn new(name: &str, superclass: Option<&str>, fields: Vec<ClassFileField>) -> Self {
        Self {
            name: name.to_string(),
            superclass: superclass.map(str::to_string),
            fields,
        }
    }
}
