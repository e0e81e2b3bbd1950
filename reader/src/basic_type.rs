/// Value type tag of a field, a local or an array element. Discriminants are the
/// tags used across the VM metadata, and must never be renumbered.
#[repr(u8)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum_macros::Display,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum BasicType {
    Boolean = 4,
    Char = 5,
    Float = 6,
    Double = 7,
    Byte = 8,
    Short = 9,
    Int = 10,
    Long = 11,
    Object = 12,
    Array = 13,
    /// Flattenable value of a primitive (inline) class
    InlineType = 14,
    Void = 15,
    #[default]
    Illegal = 99,
}

impl BasicType {
    /// Canonical name, as printed by diagnostic tools
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Whether a value of this type is a reference to some class-typed value
    pub fn is_reference(self) -> bool {
        matches!(
            self,
            BasicType::Object | BasicType::Array | BasicType::InlineType
        )
    }

    /// Size in bytes of a value of this type stored in an instance field.
    /// References are stored as full machine words.
    pub fn storage_size(self) -> usize {
        match self {
            BasicType::Boolean | BasicType::Byte => 1,
            BasicType::Char | BasicType::Short => 2,
            BasicType::Int | BasicType::Float => 4,
            BasicType::Long | BasicType::Double => 8,
            BasicType::Object | BasicType::Array | BasicType::InlineType => {
                std::mem::size_of::<usize>()
            }
            BasicType::Void | BasicType::Illegal => 0,
        }
    }
}
