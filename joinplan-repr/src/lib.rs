use joinplan_core::{descriptor::JoinPlanDescriptor, memo::DescriptorMemo};

pub use handle::{ColumnHandle, ColumnType, TableHandle};
pub use joinplan_core::{
    descriptor::{JoinInput, JoinPlanDescriptorBuilder},
    error::{JoinPlanError, Result},
    join::{BuildSide, JoinType},
    memo::PlanId,
};

pub mod handle;

/// A join node over catalog handles, as shipped to the workers.
pub type JoinHandle = JoinPlanDescriptor<TableHandle, ColumnHandle>;

pub type JoinHandleMemo = DescriptorMemo<TableHandle, ColumnHandle>;
