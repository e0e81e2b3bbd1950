use std::{fmt, fmt::Formatter, mem::size_of};

use vfinfo_reader::{
    basic_type::BasicType, class_file_field::ClassFileField, field_type::FieldType,
};

use crate::{
    class_resolver_by_id::ClassByIdResolver,
    metadata_array::MetadataArray,
    metaspace_closure::{MetaspaceClosure, MetaspacePointers},
    metaspace_obj::{size_in_words, MetaspaceObj, MetaspaceObjType},
    virtual_field_info::{write_class_line, VirtualFieldInfo},
};

/// In various data structures, we store the class id rather than a reference to the
/// class, i.e. a progressive number assigned when we load the class. Ids can change
/// when the class manager compacts its classes, in which case every stored id is
/// rewritten through a [`MetaspaceClosure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ClassId(u32);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ClassId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// A loaded class
#[derive(Debug)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub superclass: Option<ClassId>,
    /// Fields declared by this class, excluding inherited ones. A field's local index
    /// is its position here.
    pub fields: Vec<ClassFileField>,
    /// Size of an instance in bytes, including the header and all inherited fields
    pub instance_size: usize,
    pub virtual_fields: MetadataArray<VirtualFieldInfo>,
}

impl Class {
    /// Declared type of the field with the given local index, if there is one
    pub fn field_signature(&self, local_index: i32) -> Option<&FieldType> {
        let index = usize::try_from(local_index).ok()?;
        self.fields.get(index).map(|field| &field.type_descriptor)
    }

    pub fn field_basic_type(&self, local_index: i32) -> Option<BasicType> {
        self.field_signature(local_index)
            .map(|field_type| field_type.basic_type())
    }

    /// Prints the class and all of its virtual fields
    pub fn print_on(
        &self,
        classes: &impl ClassByIdResolver,
        st: &mut dyn fmt::Write,
    ) -> fmt::Result {
        writeln!(st, "class {} (id {})", self.name, self.id)?;
        if self.superclass.is_some() {
            write_class_line(st, "super", self.superclass, classes)?;
        }
        writeln!(st, "  instance size: {}", self.instance_size)?;
        writeln!(st, "  virtual fields: {}", self.virtual_fields.len())?;
        VirtualFieldInfo::print_all(&self.virtual_fields, classes, st)
    }
}

impl MetaspacePointers for Class {
    fn metaspace_pointers_do(&mut self, it: &mut dyn MetaspaceClosure) {
        it.push(&mut self.superclass);
        self.virtual_fields.metaspace_pointers_do(it);
    }
}

impl MetaspaceObj for Class {
    fn metaspace_obj_type(&self) -> MetaspaceObjType {
        MetaspaceObjType::Class
    }

    fn internal_name(&self) -> &'static str {
        "{class}"
    }

    fn size_in_words(&self) -> usize {
        size_in_words(size_of::<Class>())
    }
}
