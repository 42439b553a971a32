//! Numeric / categorical partition of a table's columns.
//!
//! The partition is derived from the column dtypes and must be rebuilt
//! after cleaning, since mean imputation turns integer columns into floats.

use crate::profiler::DataProfiler;
use crate::types::{ColumnKind, Table};
use serde::{Deserialize, Serialize};

/// Columns eligible for numeric and categorical charts, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPartition {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl ColumnPartition {
    /// Partition the columns of `table` by their dtype.
    pub fn from_table(table: &Table) -> Self {
        let mut partition = Self::default();
        for column in DataProfiler::dtypes(table) {
            match column.kind {
                ColumnKind::Numeric => partition.numeric.push(column.name),
                ColumnKind::Categorical => partition.categorical.push(column.name),
            }
        }
        partition
    }
}
