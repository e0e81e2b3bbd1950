use vfinfo_reader::class_file_field::ClassFileField;

/// Every instance starts with a header holding the class id and the identity hash code
pub const OBJECT_HEADER_SIZE: usize = 8;

/// Instances sizes are always a multiple of this
pub const OBJECT_ALIGNMENT: usize = 8;

/// Placement of the instance fields declared by one class. Fields are laid out in
/// declaration order after the superclass' fields, each one aligned to its own size.
/// Static fields do not take space in instances.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldLayout {
    offsets: Vec<Option<usize>>,
    instance_size: usize,
}

impl FieldLayout {
    /// `first_offset` is the instance size of the superclass, or the header size
    /// for classes without a superclass
    pub fn compute(first_offset: usize, fields: &[ClassFileField]) -> Self {
        let mut next_offset = first_offset;
        let offsets = fields
            .iter()
            .map(|field| {
                if field.is_static() {
                    return None;
                }
                let size = field.type_descriptor.basic_type().storage_size();
                let offset = next_offset.next_multiple_of(size);
                next_offset = offset + size;
                Some(offset)
            })
            .collect();

        Self {
            offsets,
            instance_size: next_offset.next_multiple_of(OBJECT_ALIGNMENT),
        }
    }

    /// Offset of the field with the given local index; `None` for static fields
    pub fn offset_of(&self, local_index: usize) -> Option<usize> {
        self.offsets.get(local_index).copied().flatten()
    }

    pub fn instance_size(&self) -> usize {
        self.instance_size
    }
}

#[cfg(test)]
mod tests {
    use vfinfo_reader::{class_file_field::ClassFileField, field_flags::FieldFlags};

    use crate::field_layout::{FieldLayout, OBJECT_HEADER_SIZE};

    fn field(flags: FieldFlags, descriptor: &str) -> ClassFileField {
        ClassFileField::new(flags, "f", descriptor).unwrap()
    }

    #[test]
    fn class_without_fields_is_just_a_header() {
        let layout = FieldLayout::compute(OBJECT_HEADER_SIZE, &[]);
        assert_eq!(OBJECT_HEADER_SIZE, layout.instance_size());
        assert_eq!(None, layout.offset_of(0));
    }

    #[test]
    fn fields_are_aligned_to_their_size() {
        let layout = FieldLayout::compute(
            OBJECT_HEADER_SIZE,
            &[
                field(FieldFlags::PRIVATE, "Z"),
                field(FieldFlags::PRIVATE, "J"),
                field(FieldFlags::PRIVATE, "S"),
                field(FieldFlags::PRIVATE, "I"),
            ],
        );
        assert_eq!(Some(8), layout.offset_of(0));
        assert_eq!(Some(16), layout.offset_of(1));
        assert_eq!(Some(24), layout.offset_of(2));
        assert_eq!(Some(28), layout.offset_of(3));
        assert_eq!(32, layout.instance_size());
    }

    #[test]
    fn static_fields_take_no_space() {
        let layout = FieldLayout::compute(
            OBJECT_HEADER_SIZE,
            &[
                field(FieldFlags::STATIC, "J"),
                field(FieldFlags::PRIVATE, "I"),
            ],
        );
        assert_eq!(None, layout.offset_of(0));
        assert_eq!(Some(8), layout.offset_of(1));
        assert_eq!(16, layout.instance_size());
    }

    #[test]
    fn fields_start_after_superclass() {
        let layout = FieldLayout::compute(24, &[field(FieldFlags::PRIVATE, "B")]);
        assert_eq!(Some(24), layout.offset_of(0));
        assert_eq!(32, layout.instance_size());
    }
}
