use std::{mem::size_of, slice};

use crate::{
    metaspace_closure::{MetaspaceClosure, MetaspacePointers},
    metaspace_obj::{size_in_words, MetaspaceObj, MetaspaceObjType},
};

/// Fixed-length array of metadata records, allocated by the owning class.
/// Elements can be mutated in place while the owner builds them, but the array
/// can never grow or shrink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataArray<T> {
    data: Box<[T]>,
}

impl<T> Default for MetadataArray<T> {
    fn default() -> Self {
        Self {
            data: Vec::new().into_boxed_slice(),
        }
    }
}

impl<T: Default> MetadataArray<T> {
    /// Allocates an array of `length` default-constructed elements
    pub fn new(length: usize) -> Self {
        Self {
            data: (0..length).map(|_| T::default()).collect(),
        }
    }
}

impl<T> MetadataArray<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Panics if `index` is out of bounds
    pub fn at(&self, index: usize) -> &T {
        &self.data[index]
    }

    /// Panics if `index` is out of bounds
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T: MetaspacePointers> MetaspacePointers for MetadataArray<T> {
    fn metaspace_pointers_do(&mut self, it: &mut dyn MetaspaceClosure) {
        for element in self.data.iter_mut() {
            element.metaspace_pointers_do(it);
        }
    }
}

impl<T> MetaspaceObj for MetadataArray<T> {
    fn metaspace_obj_type(&self) -> MetaspaceObjType {
        MetaspaceObjType::Array
    }

    fn internal_name(&self) -> &'static str {
        "{array}"
    }

    /// One word for the length, followed by the elements
    fn size_in_words(&self) -> usize {
        size_in_words(size_of::<usize>() + self.len() * size_of::<T>())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        metadata_array::MetadataArray,
        metaspace_obj::{MetaspaceObj, MetaspaceObjType},
    };

    #[test]
    fn new_array_is_filled_with_defaults() {
        let array: MetadataArray<i32> = MetadataArray::new(3);
        assert_eq!(3, array.len());
        assert_eq!(vec![0, 0, 0], array.iter().copied().collect::<Vec<_>>());
    }

    #[test]
    fn elements_can_be_updated_in_place() {
        let mut array: MetadataArray<i32> = MetadataArray::new(2);
        *array.at_mut(1) = 42;
        assert_eq!(0, *array.at(0));
        assert_eq!(42, *array.at(1));
        assert_eq!(2, array.len());
    }

    #[test]
    #[should_panic]
    fn at_panics_when_out_of_bounds() {
        let array: MetadataArray<i32> = MetadataArray::new(1);
        array.at(1);
    }

    #[test]
    fn empty_array_still_has_a_length_word() {
        let array: MetadataArray<u64> = MetadataArray::default();
        assert!(array.is_empty());
        assert_eq!(1, array.size_in_words());
        assert_eq!(MetaspaceObjType::Array, array.metaspace_obj_type());
    }

    #[test]
    fn size_accounts_for_elements() {
        let array: MetadataArray<u64> = MetadataArray::new(4);
        assert_eq!(
            1 + 4 * std::mem::size_of::<u64>() / std::mem::size_of::<usize>(),
            array.size_in_words()
        );
    }
}
