//! The join plan descriptor: everything an executor needs to set up a two-table equi-join, and
//! everything a planner needs to tell two join plans apart.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use itertools::Itertools;
use pretty_xmlish::{Pretty, PrettyConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    error::{JoinPlanError, Result},
    join::{BuildSide, JoinType},
    rel_ref::{ColumnRef, TableRef},
};

/// One input of the join as the planner hands it over.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JoinInput<T, C> {
    pub table: T,
    pub key_column: C,
    /// Columns of this input projected into the output, in output order.
    pub joined_columns: Vec<C>,
}

impl<T, C> JoinInput<T, C> {
    pub fn new(table: T, key_column: C, joined_columns: Vec<C>) -> Self {
        Self {
            table,
            key_column,
            joined_columns,
        }
    }
}

/// Borrowed view of one input of a [`JoinPlanDescriptor`].
#[derive(Clone, Debug)]
pub struct JoinInputRef<'a, T, C> {
    pub table: &'a T,
    pub key_column: &'a C,
    pub joined_columns: &'a [C],
}

/// Immutable description of a single equi-join node.
///
/// Equality and hashing ignore `include_key_columns` and `build_side`: two descriptors that only
/// disagree on those describe the same join plan. Both fields are still carried on the wire.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "T: TableRef, C: ColumnRef")]
pub struct JoinPlanDescriptor<T, C> {
    left_table: T,
    left_key_column: C,
    left_joined_columns: Vec<C>,
    right_table: T,
    right_key_column: C,
    right_joined_columns: Vec<C>,
    /// Whether the joined columns contain the key columns.
    include_key_columns: bool,
    #[serde(rename = "joinEndian")]
    build_side: BuildSide,
    join_type: JoinType,
}

impl<T: TableRef, C: ColumnRef> JoinPlanDescriptor<T, C> {
    pub fn new(
        left: JoinInput<T, C>,
        right: JoinInput<T, C>,
        include_key_columns: bool,
        build_side: BuildSide,
        join_type: JoinType,
    ) -> Self {
        trace!(
            event = "descriptor_built",
            left = %left.table,
            right = %right.table,
            join_type = %join_type,
            build_side = %build_side
        );
        Self {
            left_table: left.table,
            left_key_column: left.key_column,
            left_joined_columns: left.joined_columns,
            right_table: right.table,
            right_key_column: right.key_column,
            right_joined_columns: right.joined_columns,
            include_key_columns,
            build_side,
            join_type,
        }
    }

    pub fn builder() -> JoinPlanDescriptorBuilder<T, C> {
        JoinPlanDescriptorBuilder::new()
    }

    pub fn left_table(&self) -> &T {
        &self.left_table
    }

    pub fn left_key_column(&self) -> &C {
        &self.left_key_column
    }

    pub fn left_joined_columns(&self) -> &[C] {
        &self.left_joined_columns
    }

    pub fn right_table(&self) -> &T {
        &self.right_table
    }

    pub fn right_key_column(&self) -> &C {
        &self.right_key_column
    }

    pub fn right_joined_columns(&self) -> &[C] {
        &self.right_joined_columns
    }

    pub fn include_key_columns(&self) -> bool {
        self.include_key_columns
    }

    pub fn build_side(&self) -> BuildSide {
        self.build_side
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn input(&self, side: BuildSide) -> JoinInputRef<'_, T, C> {
        match side {
            BuildSide::Left => JoinInputRef {
                table: &self.left_table,
                key_column: &self.left_key_column,
                joined_columns: &self.left_joined_columns,
            },
            BuildSide::Right => JoinInputRef {
                table: &self.right_table,
                key_column: &self.right_key_column,
                joined_columns: &self.right_joined_columns,
            },
        }
    }

    /// The input the executor materializes and indexes by key.
    pub fn build_input(&self) -> JoinInputRef<'_, T, C> {
        self.input(self.build_side)
    }

    /// The input streamed against the build side.
    pub fn probe_input(&self) -> JoinInputRef<'_, T, C> {
        self.input(self.build_side.other())
    }

    /// Output columns in output order: the left projection followed by the right one.
    pub fn output_columns(&self) -> impl Iterator<Item = &C> + '_ {
        self.left_joined_columns
            .iter()
            .chain(self.right_joined_columns.iter())
    }

    pub fn output_width(&self) -> usize {
        self.left_joined_columns.len() + self.right_joined_columns.len()
    }

    /// Returns a copy that materializes `build_side` instead. The copy is the same plan.
    pub fn with_build_side(&self, build_side: BuildSide) -> Self {
        Self {
            build_side,
            ..self.clone()
        }
    }

    /// Implements A join B = B join A with the inputs swapped, so the output columns come out
    /// right-then-left of the original order. The same relation stays on the build side.
    /// Returns `None` for semi and anti joins, which keep rows of the left input only.
    pub fn commute(&self) -> Option<Self> {
        let join_type = self.join_type.commute()?;
        Some(Self::new(
            JoinInput::new(
                self.right_table.clone(),
                self.right_key_column.clone(),
                self.right_joined_columns.clone(),
            ),
            JoinInput::new(
                self.left_table.clone(),
                self.left_key_column.clone(),
                self.left_joined_columns.clone(),
            ),
            self.include_key_columns,
            self.build_side.other(),
            join_type,
        ))
    }

    /// Field-for-field comparison, including the execution hints that `==` ignores.
    pub fn same_plan_and_hints(&self, other: &Self) -> bool {
        self == other
            && self.include_key_columns == other.include_key_columns
            && self.build_side == other.build_side
    }

    pub fn explain(&self) -> Pretty<'static> {
        Pretty::simple_record(
            "JoinPlanDescriptor",
            vec![
                ("join_type", self.join_type.to_string().into()),
                ("build_side", self.build_side.to_string().into()),
                (
                    "include_key_columns",
                    self.include_key_columns.to_string().into(),
                ),
            ],
            vec![
                self.explain_input(BuildSide::Left),
                self.explain_input(BuildSide::Right),
            ],
        )
    }

    fn explain_input(&self, side: BuildSide) -> Pretty<'static> {
        let input = self.input(side);
        let name = match side {
            BuildSide::Left => "LeftInput",
            BuildSide::Right => "RightInput",
        };
        let role = if side == self.build_side {
            "build"
        } else {
            "probe"
        };
        Pretty::childless_record(
            name,
            vec![
                ("role", role.to_string().into()),
                ("table", input.table.to_string().into()),
                ("key", input.key_column.to_string().into()),
                (
                    "columns",
                    Pretty::Array(
                        input
                            .joined_columns
                            .iter()
                            .map(|column| column.to_string().into())
                            .collect_vec(),
                    ),
                ),
            ],
        )
    }

    pub fn explain_to_string(&self) -> String {
        let mut config = PrettyConfig {
            need_boundaries: false,
            reduced_spaces: false,
            ..Default::default()
        };
        let mut out = String::new();
        config.unicode(&mut out, &self.explain());
        out
    }
}

impl<T: PartialEq, C: PartialEq> PartialEq for JoinPlanDescriptor<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.left_table == other.left_table
            && self.left_key_column == other.left_key_column
            && self.left_joined_columns == other.left_joined_columns
            && self.right_table == other.right_table
            && self.right_key_column == other.right_key_column
            && self.right_joined_columns == other.right_joined_columns
            && self.join_type == other.join_type
    }
}

impl<T: Eq, C: Eq> Eq for JoinPlanDescriptor<T, C> {}

// Must hash exactly the fields compared by `eq`.
impl<T: Hash, C: Hash> Hash for JoinPlanDescriptor<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.left_table.hash(state);
        self.left_key_column.hash(state);
        self.left_joined_columns.hash(state);
        self.right_table.hash(state);
        self.right_key_column.hash(state);
        self.right_joined_columns.hash(state);
        self.join_type.hash(state);
    }
}

impl<T: TableRef, C: ColumnRef> fmt::Display for JoinPlanDescriptor<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.explain_to_string())
    }
}

/// Assembles a descriptor from parts that may be missing, e.g. while translating a plan node
/// whose inputs have not all been resolved.
#[derive(Clone, Debug)]
pub struct JoinPlanDescriptorBuilder<T, C> {
    left_table: Option<T>,
    left_key_column: Option<C>,
    left_joined_columns: Vec<C>,
    right_table: Option<T>,
    right_key_column: Option<C>,
    right_joined_columns: Vec<C>,
    include_key_columns: bool,
    build_side: BuildSide,
    join_type: JoinType,
}

impl<T: TableRef, C: ColumnRef> JoinPlanDescriptorBuilder<T, C> {
    pub fn new() -> Self {
        Self {
            left_table: None,
            left_key_column: None,
            left_joined_columns: Vec::new(),
            right_table: None,
            right_key_column: None,
            right_joined_columns: Vec::new(),
            include_key_columns: false,
            build_side: BuildSide::default(),
            join_type: JoinType::default(),
        }
    }

    pub fn left_table(mut self, table: T) -> Self {
        self.left_table = Some(table);
        self
    }

    pub fn left_key_column(mut self, column: C) -> Self {
        self.left_key_column = Some(column);
        self
    }

    pub fn left_joined_columns(mut self, columns: Vec<C>) -> Self {
        self.left_joined_columns = columns;
        self
    }

    pub fn right_table(mut self, table: T) -> Self {
        self.right_table = Some(table);
        self
    }

    pub fn right_key_column(mut self, column: C) -> Self {
        self.right_key_column = Some(column);
        self
    }

    pub fn right_joined_columns(mut self, columns: Vec<C>) -> Self {
        self.right_joined_columns = columns;
        self
    }

    pub fn include_key_columns(mut self, include_key_columns: bool) -> Self {
        self.include_key_columns = include_key_columns;
        self
    }

    pub fn build_side(mut self, build_side: BuildSide) -> Self {
        self.build_side = build_side;
        self
    }

    pub fn join_type(mut self, join_type: JoinType) -> Self {
        self.join_type = join_type;
        self
    }

    /// Fails with [`JoinPlanError::InvalidDescriptor`] naming the first missing table or key
    /// column. Nothing else is checked.
    pub fn build(self) -> Result<JoinPlanDescriptor<T, C>> {
        let left_table = required(self.left_table, "leftTable")?;
        let left_key_column = required(self.left_key_column, "leftKeyColumn")?;
        let right_table = required(self.right_table, "rightTable")?;
        let right_key_column = required(self.right_key_column, "rightKeyColumn")?;
        Ok(JoinPlanDescriptor::new(
            JoinInput::new(left_table, left_key_column, self.left_joined_columns),
            JoinInput::new(right_table, right_key_column, self.right_joined_columns),
            self.include_key_columns,
            self.build_side,
            self.join_type,
        ))
    }
}

fn required<V>(value: Option<V>, field: &'static str) -> Result<V> {
    value.ok_or_else(|| {
        debug!(event = "descriptor_rejected", missing = field);
        JoinPlanError::InvalidDescriptor { field }
    })
}
