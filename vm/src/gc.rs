use std::collections::HashSet;

use itertools::Itertools;
use log::{debug, warn};

use crate::{
    class::ClassId,
    class_manager::ClassManager,
    metaspace_closure::{ForwardingTable, MetaspacePointers, ReferenceCollector, Relocator},
};

impl ClassManager {
    /// Unloads every class that is not reachable from the given roots, following
    /// superclasses and the references of virtual fields. The surviving classes
    /// get new dense ids, assigned in the order of their old ids, and every
    /// reference they hold is rewritten accordingly.
    ///
    /// Returns the mapping from old to new ids. Old ids missing from the
    /// mapping belong to unloaded classes.
    pub fn unload_unreachable(&mut self, roots: &[ClassId]) -> ForwardingTable {
        let reachable = self.mark(roots);
        let forwarding: ForwardingTable = reachable
            .iter()
            .copied()
            .sorted()
            .zip(1u32..)
            .map(|(old_id, new_id)| (old_id, ClassId::new(new_id)))
            .collect();

        let classes = std::mem::take(&mut self.classes_by_id);
        let unloaded = classes.len() - forwarding.len();
        self.classes_by_name.clear();

        let mut relocator = Relocator::new(&forwarding);
        for (old_id, mut class) in classes {
            let Some(new_id) = forwarding.get(&old_id) else {
                debug!("unloading class {} (id {})", class.name, old_id);
                continue;
            };
            class.id = *new_id;
            class.metaspace_pointers_do(&mut relocator);
            self.register_loaded_class(class);
        }
        // Survivors never outnumber the ids handed out so far
        self.next_id = u32::try_from(self.classes_by_id.len() + 1).unwrap_or(self.next_id);

        debug!(
            "unloaded {} classes, relocated {} references, cleared {}",
            unloaded,
            relocator.relocated(),
            relocator.cleared()
        );
        forwarding
    }

    fn mark(&mut self, roots: &[ClassId]) -> HashSet<ClassId> {
        let mut reachable = HashSet::new();
        let mut worklist = roots.to_vec();
        while let Some(id) = worklist.pop() {
            if reachable.contains(&id) {
                continue;
            }
            let Some(class) = self.classes_by_id.get_mut(&id) else {
                warn!("ignoring reference to unknown class {id}");
                continue;
            };
            reachable.insert(id);

            let mut collector = ReferenceCollector::default();
            class.metaspace_pointers_do(&mut collector);
            worklist.extend(collector.into_references());
        }
        reachable
    }
}
