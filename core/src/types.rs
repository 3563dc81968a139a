//! Record, page and output types.
//!
//! # Design
//! Pipedrive resources have no fixed schema, and custom fields show up as
//! hash-named keys, so a record is an untyped JSON object. `serde_json` is
//! built with `preserve_order`, so key order follows the response body and
//! table columns come out in the order Pipedrive sent them.

use serde_json::{Map, Value};

use crate::table::Table;

/// One Pipedrive object: an ordered map of field name to JSON value.
pub type Record = Map<String, Value>;

/// All records for one `fetch_all` call, in page order.
pub type RecordSet = Vec<Record>;

/// The `start` / `limit` pair sent with a paginated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: u32,
    pub limit: u32,
}

impl PageWindow {
    pub fn new(start: u32, limit: u32) -> Self {
        Self { start, limit }
    }
}

/// The records returned by one HTTP call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub records: Vec<Record>,
    /// `additional_data.pagination.more_items_in_collection`, when present.
    /// Informational only: pagination stops on a short page regardless.
    pub more_items_in_collection: Option<bool>,
}

impl Page {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// How `get_object` / `get_all` hand back their results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputShape {
    Records,
    #[default]
    Table,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Records(Vec<Record>),
    Table(Table),
}

impl Output {
    pub fn shape(records: Vec<Record>, shape: OutputShape) -> Self {
        match shape {
            OutputShape::Records => Output::Records(records),
            OutputShape::Table => Output::Table(Table::from_records(&records)),
        }
    }

    /// Number of records (rows).
    pub fn len(&self) -> usize {
        match self {
            Output::Records(records) => records.len(),
            Output::Table(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_table(self) -> Table {
        match self {
            Output::Records(records) => Table::from_records(&records),
            Output::Table(table) => table,
        }
    }

    pub fn into_records(self) -> Vec<Record> {
        match self {
            Output::Records(records) => records,
            Output::Table(table) => table.into_records(),
        }
    }
}
