use std::{collections::HashMap, fmt, fmt::Formatter};

use itertools::Itertools;
use log::debug;
use result::prelude::*;
use strum::IntoEnumIterator;

use vfinfo_reader::{class_file::ClassFile, class_file_field::ClassFileField};

use crate::{
    class::{Class, ClassId},
    class_resolver_by_id::ClassByIdResolver,
    field_layout::{FieldLayout, OBJECT_HEADER_SIZE},
    metadata_array::MetadataArray,
    metaspace_obj::{MetaspaceObj, MetaspaceObjType},
    virtual_field_info::VirtualFieldInfo,
    vm_error::VmError,
};

/// Owns every loaded class, and hence every virtual field record
pub struct ClassManager {
    pub(crate) classes_by_id: HashMap<ClassId, Class>,
    pub(crate) classes_by_name: HashMap<String, ClassId>,
    pub(crate) next_id: u32,
}

impl Default for ClassManager {
    fn default() -> Self {
        Self {
            classes_by_id: Default::default(),
            classes_by_name: Default::default(),
            next_id: 1,
        }
    }
}

impl fmt::Debug for ClassManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "class_manager={{loaded classes={}}}",
            self.classes_by_id.len()
        )
    }
}

impl ClassByIdResolver for ClassManager {
    fn find_class_by_id(&self, class_id: ClassId) -> Option<&Class> {
        self.classes_by_id.get(&class_id)
    }
}

impl ClassManager {
    pub fn len(&self) -> usize {
        self.classes_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes_by_id.is_empty()
    }

    pub fn find_class_by_name(&self, class_name: &str) -> Option<&Class> {
        self.classes_by_name
            .get(class_name)
            .and_then(|id| self.classes_by_id.get(id))
    }

    /// Ids of all loaded classes, in ascending order
    pub fn class_ids(&self) -> Vec<ClassId> {
        self.classes_by_id.keys().copied().sorted().collect()
    }

    /// Loads the given class. Its superclass must have been loaded already.
    /// Classes referenced by its fields do not need to be loaded, but fields
    /// referring to classes not yet loaded will have no type class.
    pub fn load_class(&mut self, class_file: ClassFile) -> Result<ClassId, VmError> {
        if self.classes_by_name.contains_key(&class_file.name) {
            return Err(VmError::ClassAlreadyLoaded(class_file.name));
        }
        let superclass = class_file
            .superclass
            .as_ref()
            .map(|superclass_name| {
                self.classes_by_name
                    .get(superclass_name)
                    .copied()
                    .ok_or_else(|| VmError::ClassNotFoundException(superclass_name.clone()))
            })
            .invert()?;

        let first_offset = superclass
            .and_then(|id| self.classes_by_id.get(&id))
            .map_or(OBJECT_HEADER_SIZE, |superclass| superclass.instance_size);
        let layout = FieldLayout::compute(first_offset, &class_file.fields);

        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or(VmError::TooManyClasses)?;
        let id = ClassId::new(self.next_id);
        let virtual_fields =
            self.new_virtual_fields(id, &class_file.name, &class_file.fields, &layout)?;
        self.next_id = next_id;

        let class = Class {
            id,
            name: class_file.name,
            superclass,
            fields: class_file.fields,
            instance_size: layout.instance_size(),
            virtual_fields,
        };
        debug!(
            "loaded class {} with id {}: instance size {}, {} virtual fields",
            class.name,
            class.id,
            class.instance_size,
            class.virtual_fields.len()
        );
        self.register_loaded_class(class);
        Ok(id)
    }

    fn new_virtual_fields(
        &self,
        holder: ClassId,
        holder_name: &str,
        fields: &[ClassFileField],
        layout: &FieldLayout,
    ) -> Result<MetadataArray<VirtualFieldInfo>, VmError> {
        let local_indexes: Vec<usize> = fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.is_virtual())
            .map(|(index, _)| index)
            .collect();

        let mut virtual_fields: MetadataArray<VirtualFieldInfo> =
            MetadataArray::new(local_indexes.len());
        for (slot, &local_index) in local_indexes.iter().enumerate() {
            let field = &fields[local_index];
            let offset = layout
                .offset_of(local_index)
                .ok_or(VmError::ValidationException)?;
            let basic_type = field.type_descriptor.basic_type();

            let info = virtual_fields.at_mut(slot);
            info.set_holder(Some(holder));
            info.set_local_index(
                i32::try_from(local_index).map_err(|_| VmError::ValidationException)?,
            );
            info.set_offset(i32::try_from(offset).map_err(|_| VmError::ValidationException)?);
            info.set_basic_type(basic_type);
            if basic_type.is_reference() {
                let type_klass = field
                    .type_descriptor
                    .referenced_class_name()
                    .and_then(|name| {
                        if name == holder_name {
                            Some(holder)
                        } else {
                            self.classes_by_name.get(name).copied()
                        }
                    });
                info.set_type_klass(type_klass);
            }
            debug!(
                "virtual field {}.{}: local index {}, offset {}, type {}",
                holder_name, field.name, local_index, offset, basic_type
            );
        }
        Ok(virtual_fields)
    }

    pub(crate) fn register_loaded_class(&mut self, class: Class) {
        self.classes_by_name.insert(class.name.clone(), class.id);
        self.classes_by_id.insert(class.id, class);
    }

    /// Words used by the loaded metadata, by kind of object
    pub fn usage(&self) -> HashMap<MetaspaceObjType, usize> {
        let mut usage: HashMap<MetaspaceObjType, usize> =
            MetaspaceObjType::iter().map(|obj_type| (obj_type, 0)).collect();
        for class in self.classes_by_id.values() {
            *usage.entry(class.metaspace_obj_type()).or_default() += class.size_in_words();
            *usage
                .entry(class.virtual_fields.metaspace_obj_type())
                .or_default() += class.virtual_fields.size_in_words();
            for virtual_field in class.virtual_fields.iter() {
                *usage
                    .entry(virtual_field.metaspace_obj_type())
                    .or_default() += virtual_field.size_in_words();
            }
        }
        usage
    }

    pub fn print_statistics(&self, st: &mut dyn fmt::Write) -> fmt::Result {
        let usage = self.usage();
        writeln!(st, "Metaspace usage ({} classes):", self.len())?;
        for obj_type in MetaspaceObjType::iter() {
            writeln!(
                st,
                "  {:<16} {} words",
                obj_type,
                usage.get(&obj_type).copied().unwrap_or_default()
            )?;
        }
        Ok(())
    }

    /// Prints one class with its virtual fields. Prints nothing for an unknown id.
    pub fn print_class(&self, id: ClassId, st: &mut dyn fmt::Write) -> fmt::Result {
        match self.classes_by_id.get(&id) {
            Some(class) => class.print_on(self, st),
            None => Ok(()),
        }
    }

    /// Prints every loaded class, in id order
    pub fn print_on(&self, st: &mut dyn fmt::Write) -> fmt::Result {
        for id in self.class_ids() {
            self.print_class(id, st)?;
        }
        Ok(())
    }
}
