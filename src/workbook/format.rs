//! Spreadsheet container detection

use crate::error::{SheetMapError, SheetMapResult};
use std::fmt;
use std::path::Path;

/// OLE2 compound document header (legacy .xls)
const OLE2_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
/// ZIP local file header (OOXML .xlsx)
const ZIP_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Supported spreadsheet containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// Legacy binary workbook (Excel 97-2003)
    Xls,
    /// Office Open XML workbook
    Xlsx,
}

impl ContainerFormat {
    /// Detect from a file name's extension (case-insensitive)
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        match extension.as_str() {
            "xls" => Some(ContainerFormat::Xls),
            "xlsx" => Some(ContainerFormat::Xlsx),
            _ => None,
        }
    }

    /// Detect from the leading magic bytes
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&OLE2_SIGNATURE) {
            Some(ContainerFormat::Xls)
        } else if bytes.starts_with(&ZIP_SIGNATURE) {
            Some(ContainerFormat::Xlsx)
        } else {
            None
        }
    }

    /// Extension first, then signature
    pub fn detect(file_name: Option<&str>, bytes: &[u8]) -> SheetMapResult<Self> {
        if let Some(format) = file_name.and_then(Self::from_file_name) {
            return Ok(format);
        }
        Self::sniff(bytes).ok_or_else(|| {
            SheetMapError::UnsupportedContainerFormat(match file_name {
                Some(name) => format!("'{}' is neither .xls nor .xlsx", name),
                None => "unrecognized file signature".to_string(),
            })
        })
    }

    pub fn extension(self) -> &'static str {
        match self {
            ContainerFormat::Xls => "xls",
            ContainerFormat::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}
