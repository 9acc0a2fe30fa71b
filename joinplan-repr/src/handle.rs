//! Catalog handles for tables and columns. The catalog fills them in; everything downstream
//! treats them as opaque values.

use core::fmt;
use std::fmt::Display;

use joinplan_core::rel_ref::{ColumnRef, TableRef};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableHandle {
    pub connector_id: String,
    pub schema_name: String,
    pub table_name: String,
}

impl TableHandle {
    pub fn new(
        connector_id: impl Into<String>,
        schema_name: impl Into<String>,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            connector_id: connector_id.into(),
            schema_name: schema_name.into(),
            table_name: table_name.into(),
        }
    }
}

impl Display for TableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema_name, self.table_name)
    }
}

impl TableRef for TableHandle {}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    Bool,
    Int,
    Long,
    Double,
    Decimal,
    Utf8String,
    Date,
    Timestamp,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHandle {
    pub connector_id: String,
    pub table_name: String,
    pub column_name: String,
    pub column_type: ColumnType,
    /// Position of the column in the table schema.
    pub logical_ordinal: u32,
}

impl ColumnHandle {
    pub fn new(
        connector_id: impl Into<String>,
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        column_type: ColumnType,
        logical_ordinal: u32,
    ) -> Self {
        Self {
            connector_id: connector_id.into(),
            table_name: table_name.into(),
            column_name: column_name.into(),
            column_type,
            logical_ordinal,
        }
    }
}

impl Display for ColumnHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table_name, self.column_name)
    }
}

impl ColumnRef for ColumnHandle {}
