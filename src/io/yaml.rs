//! YAML record codec (`yaml` feature).
//!
//! Only plain YAML is written: maps, sequences and scalars, no custom tags.
//! Integer ids may come back as plain integer keys rather than strings;
//! [`RecordKey`](crate::io::record::RecordKey) accepts both.

use std::io::{Read, Write};

use crate::io::record::{ExportRecord, RawRecord};
use crate::io::{RecordReader, RecordWriter};
use crate::mesh_error::MeshIoError;

#[derive(Debug, Default, Clone, Copy)]
pub struct YamlCodec;

impl RecordWriter for YamlCodec {
    fn write_record(&self, writer: &mut dyn Write, record: &ExportRecord) -> Result<(), MeshIoError> {
        serde_yaml::to_writer(writer, record)?;
        Ok(())
    }
}

impl RecordReader for YamlCodec {
    fn read_record(&self, reader: &mut dyn Read) -> Result<RawRecord, MeshIoError> {
        Ok(serde_yaml::from_reader(reader)?)
    }
}
