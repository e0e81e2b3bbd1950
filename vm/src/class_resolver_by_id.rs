use crate::class::{Class, ClassId};

/// Lookup of loaded classes by id, used wherever metadata holding class handles
/// needs the class itself. Dangling ids resolve to nothing.
pub trait ClassByIdResolver {
    fn find_class_by_id(&self, class_id: ClassId) -> Option<&Class>;

    fn class_name(&self, class_id: ClassId) -> Option<&str> {
        self.find_class_by_id(class_id)
            .map(|class| class.name.as_str())
    }
}
