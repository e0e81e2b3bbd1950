use std::collections::HashMap;

use log::warn;

use crate::class::ClassId;

/// A walker of the metadata graph. Every metadata record shows it the slots where
/// it stores references to other classes; the closure can read them and, when
/// relocating, overwrite them in place.
pub trait MetaspaceClosure {
    /// Called once per reference slot. Absent references are pushed too, and
    /// closures must treat them as a no-op.
    fn push(&mut self, slot: &mut Option<ClassId>);
}

/// Implemented by every record that holds references into the metadata graph
pub trait MetaspacePointers {
    fn metaspace_pointers_do(&mut self, it: &mut dyn MetaspaceClosure);
}

/// Collects every present reference, in the order they are pushed.
/// Used to find the classes reachable from a set of roots.
#[derive(Debug, Default)]
pub struct ReferenceCollector {
    references: Vec<ClassId>,
}

impl ReferenceCollector {
    pub fn references(&self) -> &[ClassId] {
        &self.references
    }

    pub fn into_references(self) -> Vec<ClassId> {
        self.references
    }
}

impl MetaspaceClosure for ReferenceCollector {
    fn push(&mut self, slot: &mut Option<ClassId>) {
        if let Some(class_id) = *slot {
            self.references.push(class_id);
        }
    }
}

/// Maps the old id of a moved class to its new id
pub type ForwardingTable = HashMap<ClassId, ClassId>;

/// Rewrites references after classes have been moved. A reference to a class
/// missing from the forwarding table is cleared, since its target is gone.
#[derive(Debug)]
pub struct Relocator<'a> {
    forwarding: &'a ForwardingTable,
    relocated: usize,
    cleared: usize,
}

impl<'a> Relocator<'a> {
    pub fn new(forwarding: &'a ForwardingTable) -> Self {
        Self {
            forwarding,
            relocated: 0,
            cleared: 0,
        }
    }

    pub fn relocated(&self) -> usize {
        self.relocated
    }

    pub fn cleared(&self) -> usize {
        self.cleared
    }
}

impl<'a> MetaspaceClosure for Relocator<'a> {
    fn push(&mut self, slot: &mut Option<ClassId>) {
        if let Some(old_id) = *slot {
            match self.forwarding.get(&old_id) {
                Some(new_id) => {
                    *slot = Some(*new_id);
                    self.relocated += 1;
                }
                None => {
                    warn!("clearing reference to unloaded class {old_id}");
                    *slot = None;
                    self.cleared += 1;
                }
            }
        }
    }
}
