//! JSON Export functionality
//!
//! Exports the whole document in exactly the persisted shape, pretty-printed,
//! so an export can be imported back unchanged.

use std::io::Write;

use crate::error::{FincalcError, FincalcResult};
use crate::models::Document;
use crate::storage::Storage;

/// Write a document as pretty-printed JSON
pub fn write_document_json<W: Write>(document: &Document, writer: &mut W) -> FincalcResult<()> {
    serde_json::to_writer_pretty(&mut *writer, document)
        .map_err(|e| FincalcError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FincalcError::Export(e.to_string()))?;
    Ok(())
}

/// Export the stored document to JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W) -> FincalcResult<()> {
    let document = storage.ledger.snapshot()?;
    write_document_json(&document, writer)
}
