//! Plan CSV export
//!
//! UTF-8, comma-separated, header row in `PLAN_COLUMNS` order, one row per player.

use std::io::{Read, Write};

use crate::error::ExportError;
use crate::planner::PlanRow;

/// Default download file name
pub const PLAN_FILE_NAME: &str = "Plan.csv";

pub fn write_plan_csv<W: Write>(rows: &[PlanRow], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(crate::planner::PLAN_COLUMNS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(|e| ExportError::Flush(e.to_string()))?;
    Ok(())
}

pub fn plan_to_csv_string(rows: &[PlanRow]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_plan_csv(rows, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

pub fn read_plan_csv<R: Read>(reader: R) -> Result<Vec<PlanRow>, ExportError> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let rows = csv_reader.deserialize().collect::<Result<Vec<PlanRow>, csv::Error>>()?;
    Ok(rows)
}
