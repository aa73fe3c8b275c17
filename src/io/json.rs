//! JSON record codec.
//!
//! Output is pretty printed with 4-space indentation. JSON object keys are
//! strings, so every node, element and group id is written as a string.

use std::io::{Read, Write};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::io::record::{ExportRecord, RawRecord};
use crate::io::{RecordReader, RecordWriter};
use crate::mesh_error::MeshIoError;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl RecordWriter for JsonCodec {
    fn write_record(&self, writer: &mut dyn Write, record: &ExportRecord) -> Result<(), MeshIoError> {
        let mut serializer =
            serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
        record.serialize(&mut serializer)?;
        Ok(())
    }
}

impl RecordReader for JsonCodec {
    fn read_record(&self, reader: &mut dyn Read) -> Result<RawRecord, MeshIoError> {
        Ok(serde_json::from_reader(reader)?)
    }
}
