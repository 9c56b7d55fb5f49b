//! The `.rsk` map file format
//!
//! A saved map is one JSON document, pretty-printed with four-space
//! indentation and, by default, gzip-compressed. The field names below are
//! the compatibility surface of the toolkit and must not change.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::scales::{Damage, Probability, Rating, ResultBand, Susceptibility};

/// File extension of saved maps, without the dot
pub const MAP_EXTENSION: &str = "rsk";

#[derive(Debug, Error)]
pub enum RskError {
    #[error("failed to access map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed map document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// `path` with the `.rsk` extension appended when missing
pub fn ensure_extension(path: &Path) -> PathBuf {
    let has_ext = path
        .extension()
        .map_or(false, |e| e.eq_ignore_ascii_case(MAP_EXTENSION));
    if has_ext {
        path.to_path_buf()
    } else {
        let mut s = path.as_os_str().to_os_string();
        s.push(".");
        s.push(MAP_EXTENSION);
        PathBuf::from(s)
    }
}

pub fn has_extension(path: &Path) -> bool {
    path.extension()
        .map_or(false, |e| e.eq_ignore_ascii_case(MAP_EXTENSION))
}

/// One serialized table row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDoc {
    pub n: Option<String>,
    pub danger: Option<String>,
    pub event: Option<String>,
    pub damage: Option<Damage>,
    #[serde(rename = "damagePts")]
    pub damage_pts: Option<u8>,
    pub susceptibility: Option<Susceptibility>,
    #[serde(rename = "susceptibilityPts")]
    pub susceptibility_pts: Option<u8>,
    pub probability: Option<Probability>,
    #[serde(rename = "probabilityPts")]
    pub probability_pts: Option<u8>,
    pub weight: Option<f64>,
    #[serde(rename = "identifiedDangersRisks")]
    pub identified_dangers_risks: Option<f64>,
    pub rating: Option<Rating>,
}

/// The full serialized map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDoc {
    #[serde(rename = "mapNo")]
    pub map_no: Option<String>,
    pub chairman: Option<String>,
    pub profession: Option<String>,
    #[serde(rename = "structDivision")]
    pub struct_division: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "toolsMaterials")]
    pub tools_materials: Option<String>,
    #[serde(rename = "regulatoryDocs", default)]
    pub regulatory_docs: Vec<String>,
    #[serde(rename = "kFactor")]
    pub k_factor: f64,
    #[serde(rename = "profRisk")]
    pub prof_risk: Option<f64>,
    pub result: Option<f64>,
    #[serde(rename = "resultStr")]
    pub result_str: Option<ResultBand>,
    pub name: Option<String>,
    #[serde(default)]
    pub table: Vec<RecordDoc>,
    #[serde(default)]
    pub methods: Vec<String>,
}

fn render(doc: &MapDoc) -> Result<Vec<u8>, RskError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser)?;
    Ok(buf)
}

/// Write a map document, gzip-compressed or as plain JSON
pub fn write(path: &Path, doc: &MapDoc, compressed: bool) -> Result<(), RskError> {
    let buf = render(doc)?;
    if compressed {
        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(&buf)?;
        encoder.finish()?;
    } else {
        std::fs::write(path, &buf)?;
    }
    Ok(())
}

/// Read a map document written by [`write`]
pub fn read(path: &Path, compressed: bool) -> Result<MapDoc, RskError> {
    let content = if compressed {
        let file = File::open(path)?;
        let mut decoder = GzDecoder::new(file);
        let mut s = String::new();
        decoder.read_to_string(&mut s)?;
        s
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}
