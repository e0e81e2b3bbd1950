bitflags! {
    /// Access and property flags of a field, with their class file encoding
    #[derive(Default)]
    pub struct FieldFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const VOLATILE = 0x0040;
        const TRANSIENT = 0x0080;
        /// Not present in source code
        const SYNTHETIC = 0x1000;
    }
}

impl FieldFlags {
    /// Synthetic instance fields get a virtual field record in their class.
    /// Access flags play no part in it.
    pub fn marks_virtual_field(self) -> bool {
        self.contains(FieldFlags::SYNTHETIC) && !self.contains(FieldFlags::STATIC)
    }
}
