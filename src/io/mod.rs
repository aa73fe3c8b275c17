//! Record import/export for FEM meshes.
//!
//! This module provides trait-based record readers and writers, one codec per
//! text format, and [`MeshIo`], which dispatches file paths to codecs and
//! moves records between files, mesh builders and host documents.
//!
//! Export: mesh -> [`convert::mesh_to_record`] -> codec -> file.
//! Import: file -> codec -> [`normalize::normalize`] -> [`record::ImportRecord`]
//! -> [`MeshBuilder`] -> new document object.

pub mod convert;
pub mod format;
pub mod json;
pub mod normalize;
pub mod record;
#[cfg(feature = "yaml")]
pub mod yaml;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::{DocumentHost, DocumentObject, ObjectId, ObjectKind};
use crate::io::convert::mesh_to_record;
use crate::io::format::MeshFormat;
use crate::io::normalize::normalize;
use crate::io::record::{ExportRecord, ImportRecord, RawRecord};
use crate::mesh_error::MeshIoError;
use crate::topology::mesh::{MeshBuilder, MeshSource};

/// Trait for codecs that parse text into a raw record.
pub trait RecordReader {
    fn read_record(&self, reader: &mut dyn Read) -> Result<RawRecord, MeshIoError>;
}

/// Trait for codecs that serialize an export record.
pub trait RecordWriter {
    fn write_record(&self, writer: &mut dyn Write, record: &ExportRecord) -> Result<(), MeshIoError>;
}

/// A codec able to read and write one format.
pub trait RecordCodec: RecordReader + RecordWriter {}

impl<T: RecordReader + RecordWriter> RecordCodec for T {}

/// Optional formats enabled for a [`MeshIo`].
///
/// JSON is always available. YAML additionally needs the `yaml` cargo
/// feature; enabling it here without the feature has no effect.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub yaml: bool,
}

impl Capabilities {
    /// Everything compiled into this build.
    pub fn detect() -> Self {
        let yaml = cfg!(feature = "yaml");
        if !yaml {
            log::info!("no YAML support compiled in, yaml import/export won't work");
        }
        Self { yaml }
    }

    /// JSON only, regardless of compiled features.
    pub const fn json_only() -> Self {
        Self { yaml: false }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}

/// Entry points for mesh import and export.
pub struct MeshIo {
    codecs: BTreeMap<MeshFormat, Box<dyn RecordCodec>>,
}

impl Default for MeshIo {
    fn default() -> Self {
        Self::new(Capabilities::detect())
    }
}

impl std::fmt::Debug for MeshIo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshIo")
            .field("formats", &self.codecs.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl MeshIo {
    /// Registers the codecs allowed by `capabilities`.
    pub fn new(capabilities: Capabilities) -> Self {
        let mut codecs: BTreeMap<MeshFormat, Box<dyn RecordCodec>> = BTreeMap::new();
        codecs.insert(MeshFormat::Json, Box::new(json::JsonCodec));
        if capabilities.yaml {
            match yaml_codec() {
                Some(codec) => {
                    codecs.insert(MeshFormat::Yaml, codec);
                }
                None => log::warn!("YAML requested but the `yaml` feature is not enabled"),
            }
        }
        Self { codecs }
    }

    /// True if a codec is registered for `format`.
    pub fn supports(&self, format: MeshFormat) -> bool {
        self.codecs.contains_key(&format)
    }

    /// The codec registered for `format`.
    pub fn codec(&self, format: MeshFormat) -> Result<&dyn RecordCodec, MeshIoError> {
        self.codecs
            .get(&format)
            .map(|codec| codec.as_ref())
            .ok_or(MeshIoError::CapabilityUnavailable(format))
    }

    /// Resolves the codec for a file path from its extension.
    pub fn codec_for_path(&self, path: &Path) -> Result<(MeshFormat, &dyn RecordCodec), MeshIoError> {
        let format = MeshFormat::from_path(path)?;
        Ok((format, self.codec(format)?))
    }

    /// Serializes `record` in `format`.
    pub fn encode<W: Write>(
        &self,
        format: MeshFormat,
        record: &ExportRecord,
        mut writer: W,
    ) -> Result<(), MeshIoError> {
        self.codec(format)?.write_record(&mut writer, record)
    }

    /// Parses, normalizes and decodes a record in `format`.
    pub fn decode<R: Read>(&self, format: MeshFormat, mut reader: R) -> Result<ImportRecord, MeshIoError> {
        let raw = self.codec(format)?.read_record(&mut reader)?;
        Self::finish_decode(raw)
    }

    fn finish_decode(raw: RawRecord) -> Result<ImportRecord, MeshIoError> {
        log::info!("converting indices to integer numbers");
        let normalized = normalize(raw)?;
        ImportRecord::try_from(&normalized)
    }

    /// Writes `mesh` to `path`, choosing the format from the extension.
    ///
    /// The record is fully encoded before the file is created, so nothing is
    /// written when conversion or encoding fails.
    pub fn export_mesh<M: MeshSource>(&self, mesh: &M, path: impl AsRef<Path>) -> Result<(), MeshIoError> {
        let path = path.as_ref();
        let (format, codec) = self.codec_for_path(path)?;
        let record = mesh_to_record(mesh)?;

        let mut buffer = Vec::new();
        codec.write_record(&mut buffer, &record)?;
        let mut file = File::create(path)?;
        file.write_all(&buffer)?;
        file.flush()?;
        log::info!(
            "exported {} nodes and {} elements to {} as {format}",
            record.nodes.len(),
            record.elements.len(),
            path.display()
        );
        Ok(())
    }

    /// Exports the single mesh object in `objects` to `path`.
    pub fn export_objects<M: MeshSource>(
        &self,
        objects: &[&DocumentObject<M>],
        path: impl AsRef<Path>,
    ) -> Result<(), MeshIoError> {
        let [object] = objects else {
            return Err(MeshIoError::SelectionCardinality(objects.len()));
        };
        let mesh = object
            .mesh()
            .ok_or_else(|| MeshIoError::NotMeshObject(object.name.clone()))?;
        self.export_mesh(mesh, path)
    }

    /// Reads `path` and adds the built mesh as a new object.
    ///
    /// The object goes into the active document, or into a document named
    /// after the file when none is active, and is named after the file stem.
    /// No object is created unless the builder returns a mesh.
    pub fn import_file<H, B>(&self, host: &mut H, builder: &B, path: impl AsRef<Path>) -> Result<ObjectId, MeshIoError>
    where
        H: DocumentHost<Mesh = B::Mesh>,
        B: MeshBuilder,
    {
        let path = path.as_ref();
        let (format, codec) = self.codec_for_path(path)?;
        let raw = {
            let mut reader = BufReader::new(File::open(path)?);
            codec.read_record(&mut reader)?
        };
        log::debug!("read {format} record with {} buckets from {}", raw.buckets.len(), path.display());
        let record = Self::finish_decode(raw)?;

        let mesh = builder
            .build_mesh(&record)?
            .ok_or_else(|| MeshIoError::MeshConstructionFailed(path.display().to_string()))?;

        let name = mesh_name(path);
        let document = match host.active_document() {
            Some(document) => document,
            None => {
                let document = host.get_or_create_document(&name);
                host.set_active(document)?;
                document
            }
        };
        let object = host.create_object(document, ObjectKind::FemMesh, &name)?;
        host.set_mesh(object, mesh)?;
        Ok(object)
    }

    /// Makes document `document` active, creating it if needed, then imports.
    pub fn insert_file<H, B>(
        &self,
        host: &mut H,
        builder: &B,
        path: impl AsRef<Path>,
        document: &str,
    ) -> Result<ObjectId, MeshIoError>
    where
        H: DocumentHost<Mesh = B::Mesh>,
        B: MeshBuilder,
    {
        let id = host.get_or_create_document(document);
        host.set_active(id)?;
        self.import_file(host, builder, path)
    }

    /// Imports `path` into a document named after the file.
    pub fn open_file<H, B>(&self, host: &mut H, builder: &B, path: impl AsRef<Path>) -> Result<ObjectId, MeshIoError>
    where
        H: DocumentHost<Mesh = B::Mesh>,
        B: MeshBuilder,
    {
        let path = path.as_ref();
        self.insert_file(host, builder, path, &mesh_name(path))
    }
}

#[cfg(feature = "yaml")]
fn yaml_codec() -> Option<Box<dyn RecordCodec>> {
    Some(Box::new(yaml::YamlCodec))
}

#[cfg(not(feature = "yaml"))]
fn yaml_codec() -> Option<Box<dyn RecordCodec>> {
    None
}

/// File name without directory and extension.
fn mesh_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
