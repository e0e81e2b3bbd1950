use std::{
    fmt,
    mem::{offset_of, size_of},
};

use log::{log_enabled, trace, Level};

use vfinfo_reader::basic_type::BasicType;

use crate::{
    class::{Class, ClassId},
    class_resolver_by_id::ClassByIdResolver,
    metadata_array::MetadataArray,
    metaspace_closure::{MetaspaceClosure, MetaspacePointers},
    metaspace_obj::{size_in_words, MetaspaceObj, MetaspaceObjType},
};

/// Printed in place of a class name when a reference is absent
const ABSENT: &str = "NULL";

/// Writes `  {label}: {class name}` for a class handle. A handle the resolver does
/// not know is printed with its raw id, so it can't be mistaken for an absent one.
pub(crate) fn write_class_line(
    st: &mut dyn fmt::Write,
    label: &str,
    id: Option<ClassId>,
    classes: &impl ClassByIdResolver,
) -> fmt::Result {
    match id {
        None => writeln!(st, "  {label}: {ABSENT}"),
        Some(id) => match classes.class_name(id) {
            Some(name) => writeln!(st, "  {label}: {name}"),
            None => writeln!(st, "  {label}: <unknown class {id}>"),
        },
    }
}

/// Printed as the type of a record whose holder is absent or unknown, since there is no
/// field table to resolve its local index against
const UNRESOLVED_TYPE: &str = "unknown";

/// Metadata describing a virtual field of a class, i.e. a synthetic instance field
/// recorded by the class that declares it.
///
/// A record is created with sentinel values (`-1` indexes, illegal type, absent
/// references) and then filled in field by field by its owning class while that
/// class is being built. Setters never validate: keeping the values consistent is
/// the owner's job. Once the owner is registered, the record is only read, except
/// by a [`MetaspaceClosure`] relocating its references.
///
/// `holder` and `type_klass` are handles into the class manager. They do not keep
/// their target alive.
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFieldInfo {
    holder: Option<ClassId>,
    local_index: i32,
    offset: i32,
    basic_type: BasicType,
    type_klass: Option<ClassId>,
}

impl Default for VirtualFieldInfo {
    fn default() -> Self {
        Self {
            holder: None,
            local_index: -1,
            offset: -1,
            basic_type: BasicType::Illegal,
            type_klass: None,
        }
    }
}

impl VirtualFieldInfo {
    pub fn holder(&self) -> Option<ClassId> {
        self.holder
    }

    pub fn set_holder(&mut self, holder: Option<ClassId>) {
        self.holder = holder;
    }

    /// Index of the field in the holder's declared fields
    pub fn local_index(&self) -> i32 {
        self.local_index
    }

    pub fn set_local_index(&mut self, local_index: i32) {
        self.local_index = local_index;
    }

    /// Offset of the field's storage within an instance, in bytes
    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: i32) {
        self.offset = offset;
    }

    pub fn basic_type(&self) -> BasicType {
        self.basic_type
    }

    pub fn set_basic_type(&mut self, basic_type: BasicType) {
        self.basic_type = basic_type;
    }

    /// Class of the referenced value. Only meaningful for reference types.
    pub fn type_klass(&self) -> Option<ClassId> {
        self.type_klass
    }

    pub fn set_type_klass(&mut self, type_klass: Option<ClassId>) {
        self.type_klass = type_klass;
    }

    /// Byte offset of the `offset` attribute within the record itself, for code
    /// that needs to read it without going through [`VirtualFieldInfo::offset`].
    pub const fn offset_offset() -> usize {
        offset_of!(VirtualFieldInfo, offset)
    }

    /// Footprint of one record, in metaspace words
    pub const fn size() -> usize {
        size_in_words(size_of::<VirtualFieldInfo>())
    }

    /// Resolves the declared type of this field against the holder's field table.
    ///
    /// # Panics
    ///
    /// If the local index is not a valid index in the holder's declared fields.
    /// That only happens for a record that was never fully initialized, which the
    /// owning class must not let escape.
    fn resolve_basic_type(&self, holder: &Class) -> BasicType {
        holder
            .field_basic_type(self.local_index)
            .unwrap_or_else(|| {
                panic!(
                    "virtual field local index {} out of bounds for class {} with {} fields",
                    self.local_index,
                    holder.name,
                    holder.fields.len()
                )
            })
    }

    /// Prints a human-readable description of this record. The holder must know
    /// the field at `local_index`: an out of bounds index panics.
    pub fn print_value_on(
        &self,
        classes: &impl ClassByIdResolver,
        st: &mut dyn fmt::Write,
    ) -> fmt::Result {
        let holder = self.holder.and_then(|id| classes.find_class_by_id(id));
        write_class_line(st, "holder", self.holder, classes)?;
        writeln!(st, "  local index: {}", self.local_index)?;
        writeln!(st, "  offset: {}", self.offset)?;
        match holder.map(|holder| self.resolve_basic_type(holder)) {
            None => writeln!(st, "  type: {UNRESOLVED_TYPE}")?,
            Some(basic_type) => {
                writeln!(st, "  type: {}", basic_type.name())?;
                if basic_type.is_reference() {
                    write_class_line(st, "type_klass", self.type_klass, classes)?;
                }
            }
        }
        writeln!(st, "  ------------------")
    }

    /// Prints every record of the array, in order, each one preceded by its index
    pub fn print_all(
        array: &MetadataArray<VirtualFieldInfo>,
        classes: &impl ClassByIdResolver,
        st: &mut dyn fmt::Write,
    ) -> fmt::Result {
        for (index, virtual_field) in array.iter().enumerate() {
            writeln!(st, "Virtual field [{index}]")?;
            virtual_field.print_value_on(classes, st)?;
        }
        Ok(())
    }
}

impl MetaspacePointers for VirtualFieldInfo {
    fn metaspace_pointers_do(&mut self, it: &mut dyn MetaspaceClosure) {
        if log_enabled!(target: "cds", Level::Trace) {
            trace!(
                target: "cds",
                "Iter(VirtualFieldInfo): {:p} [offset={}]",
                self,
                self.offset
            );
        }
        it.push(&mut self.holder);
        it.push(&mut self.type_klass);
    }
}

impl MetaspaceObj for VirtualFieldInfo {
    fn metaspace_obj_type(&self) -> MetaspaceObjType {
        MetaspaceObjType::VirtualFieldInfo
    }

    fn internal_name(&self) -> &'static str {
        "{VirtualFieldInfo}"
    }

    fn size_in_words(&self) -> usize {
        Self::size()
    }
}
