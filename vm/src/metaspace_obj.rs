/// Native unit of the metadata allocator
pub const WORD_SIZE: usize = std::mem::size_of::<usize>();

/// Converts a size in bytes into metaspace words, rounding up
pub const fn size_in_words(size_in_bytes: usize) -> usize {
    size_in_bytes.div_ceil(WORD_SIZE)
}

/// Kinds of objects living in the metadata graph
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter,
)]
pub enum MetaspaceObjType {
    Class,
    VirtualFieldInfo,
    Array,
}

/// Common queries supported by everything allocated in metaspace
pub trait MetaspaceObj {
    fn metaspace_obj_type(&self) -> MetaspaceObjType;

    fn internal_name(&self) -> &'static str;

    /// Footprint, in words
    fn size_in_words(&self) -> usize;
}
