//! Supported text formats and their file extensions.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshIoError;

/// Text formats a record can be stored in.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshFormat {
    Json,
    Yaml,
}

/// Lowercase extension to format lookup table.
const EXTENSIONS: &[(&str, MeshFormat)] = &[
    ("json", MeshFormat::Json),
    ("yaml", MeshFormat::Yaml),
    ("yml", MeshFormat::Yaml),
];

impl MeshFormat {
    /// Every format, in dispatch order.
    pub const ALL: [MeshFormat; 2] = [MeshFormat::Json, MeshFormat::Yaml];

    /// Looks up an extension (without the dot), ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        EXTENSIONS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(ext))
            .map(|&(_, format)| format)
    }

    /// Picks the format from the extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self, MeshIoError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| MeshIoError::UnsupportedFormat(path.display().to_string()))
    }

    /// Extensions mapped to this format.
    pub fn extensions(self) -> impl Iterator<Item = &'static str> {
        EXTENSIONS
            .iter()
            .filter(move |&&(_, format)| format == self)
            .map(|&(ext, _)| ext)
    }

    /// Display name used in log and error messages.
    pub fn name(self) -> &'static str {
        match self {
            MeshFormat::Json => "JSON",
            MeshFormat::Yaml => "YAML",
        }
    }
}

impl fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_case_insensitive() {
        assert_eq!(MeshFormat::from_extension("JSON"), Some(MeshFormat::Json));
        assert_eq!(MeshFormat::from_extension("Yml"), Some(MeshFormat::Yaml));
        assert_eq!(MeshFormat::from_extension("yaml"), Some(MeshFormat::Yaml));
        assert_eq!(MeshFormat::from_extension("xyz"), None);
    }

    #[test]
    fn paths_without_known_extension_are_rejected() {
        assert_eq!(
            MeshFormat::from_path(Path::new("/tmp/mesh.Json")).unwrap(),
            MeshFormat::Json
        );
        let err = MeshFormat::from_path(Path::new("mesh.xyz")).unwrap_err();
        assert!(matches!(err, MeshIoError::UnsupportedFormat(ref p) if p == "mesh.xyz"));
        assert!(MeshFormat::from_path(Path::new("mesh")).is_err());
    }

    #[test]
    fn every_format_resolves_from_its_own_extensions() {
        for format in MeshFormat::ALL {
            for ext in format.extensions() {
                let path = format!("mesh.{ext}");
                assert_eq!(MeshFormat::from_path(Path::new(&path)).unwrap(), format);
            }
        }
    }

    #[test]
    fn yaml_owns_two_extensions() {
        assert_eq!(MeshFormat::Yaml.extensions().collect::<Vec<_>>(), vec!["yaml", "yml"]);
        assert_eq!(MeshFormat::Json.extensions().count(), 1);
    }
}
