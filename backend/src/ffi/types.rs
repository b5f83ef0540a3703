//! Type conversion utilities for FFI boundary
//!
//! Converts generated events into Python dicts keyed like the CSV columns.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::models::{TimedEvent, TransactionRecord};

/// Convert one event to a dict with keys
/// `timestamp, label, user_id, amount, merchant_id, trans_type, foreign`.
pub fn event_to_py<'py>(
    py: Python<'py>,
    event: &TimedEvent<TransactionRecord>,
) -> PyResult<Bound<'py, PyDict>> {
    let tx = &event.payload;
    let dict = PyDict::new_bound(py);

    dict.set_item("timestamp", event.time)?;
    dict.set_item("label", tx.label().as_str())?;
    dict.set_item("user_id", tx.user_id())?;
    dict.set_item("amount", tx.amount().as_units())?;
    dict.set_item("merchant_id", tx.merchant_id())?;
    dict.set_item("trans_type", tx.entry_type().as_str())?;
    dict.set_item("foreign", tx.foreign())?;

    Ok(dict)
}
