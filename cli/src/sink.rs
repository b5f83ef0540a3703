//! Delimited output sink
//!
//! One CSV row per generated event, in engine order, under the header
//! `timestamp,label,user_id,amount,merchant_id,trans_type,foreign`.

use std::io::Write;

use anyhow::{Context, Result};
use fraud_sim_core_rs::{Orchestrator, TimedEvent, TransactionRecord};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    timestamp: u64,
    label: &'a str,
    user_id: u32,
    amount: String,
    merchant_id: u32,
    trans_type: &'a str,
    foreign: bool,
}

impl<'a> From<&'a TimedEvent<TransactionRecord>> for OutputRow<'a> {
    fn from(event: &'a TimedEvent<TransactionRecord>) -> Self {
        let tx = &event.payload;
        Self {
            timestamp: event.time,
            label: tx.label().as_str(),
            user_id: tx.user_id(),
            amount: tx.amount().to_string(),
            merchant_id: tx.merchant_id(),
            trans_type: tx.entry_type().as_str(),
            foreign: tx.foreign(),
        }
    }
}

/// Counts reported after a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SinkSummary {
    pub records: u64,
    pub fraud_records: u64,
}

/// Pull `records` events from the orchestrator and write them as CSV.
pub fn write_records<W: Write>(
    orchestrator: &mut Orchestrator,
    records: u64,
    writer: W,
) -> Result<SinkSummary> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut summary = SinkSummary::default();

    for _ in 0..records {
        let event = orchestrator
            .next_event()
            .with_context(|| format!("simulation failed after {} records", summary.records))?;
        csv_writer
            .serialize(OutputRow::from(&event))
            .context("failed to write record")?;

        summary.records += 1;
        if event.payload.is_fraud() {
            summary.fraud_records += 1;
        }
    }

    csv_writer.flush().context("failed to flush output")?;
    Ok(summary)
}
