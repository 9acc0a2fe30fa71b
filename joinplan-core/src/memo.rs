//! Planner-side deduplication of join plans. Equal descriptors share one [`PlanId`], so a join
//! that shows up several times in a query is planned once.

use std::{
    collections::HashMap,
    fmt::Display,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::{debug, trace};

use crate::{
    descriptor::JoinPlanDescriptor,
    rel_ref::{ColumnRef, TableRef},
};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct PlanId(pub usize);

impl Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "!{}", self.0)
    }
}

pub type DescriptorRef<T, C> = Arc<JoinPlanDescriptor<T, C>>;

struct MemoTable<T, C> {
    plan_id_to_descriptor: Vec<DescriptorRef<T, C>>,
    descriptor_to_plan_id: HashMap<DescriptorRef<T, C>, PlanId>,
}

/// Thread-safe table of distinct join plans.
///
/// The first descriptor registered for a plan is the one kept, hints included. Registering an
/// equal descriptor that prefers the other build side returns the existing entry untouched.
pub struct DescriptorMemo<T, C> {
    table: Mutex<MemoTable<T, C>>,
}

impl<T: TableRef, C: ColumnRef> DescriptorMemo<T, C> {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(MemoTable {
                plan_id_to_descriptor: Vec::new(),
                descriptor_to_plan_id: HashMap::new(),
            }),
        }
    }

    // Entries are only ever appended, so a table left behind by a panicking holder is intact.
    fn table(&self) -> MutexGuard<'_, MemoTable<T, C>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add or get a join plan. Returns its id and whether it was newly added.
    pub fn add_or_get(&self, descriptor: JoinPlanDescriptor<T, C>) -> (PlanId, bool) {
        let mut table = self.table();
        if let Some(&plan_id) = table.descriptor_to_plan_id.get(&descriptor) {
            trace!(event = "memo_hit", plan_id = %plan_id);
            return (plan_id, false);
        }
        let plan_id = PlanId(table.plan_id_to_descriptor.len());
        let descriptor = Arc::new(descriptor);
        table.plan_id_to_descriptor.push(descriptor.clone());
        table.descriptor_to_plan_id.insert(descriptor, plan_id);
        trace!(event = "memo_insert", plan_id = %plan_id);
        (plan_id, true)
    }

    pub fn lookup(&self, descriptor: &JoinPlanDescriptor<T, C>) -> Option<PlanId> {
        self.table().descriptor_to_plan_id.get(descriptor).copied()
    }

    pub fn get(&self, plan_id: PlanId) -> Option<DescriptorRef<T, C>> {
        self.table().plan_id_to_descriptor.get(plan_id.0).cloned()
    }

    pub fn len(&self) -> usize {
        self.table().plan_id_to_descriptor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dump(&self) {
        for (idx, descriptor) in self.table().plan_id_to_descriptor.iter().enumerate() {
            debug!(
                event = "memo_entry",
                plan_id = %PlanId(idx),
                join_type = %descriptor.join_type(),
                left = %descriptor.left_table(),
                right = %descriptor.right_table(),
                build_side = %descriptor.build_side()
            );
        }
    }
}
