use crate::domain::model::{MakeModelIndex, OutputFormat};
use crate::utils::error::{IndexError, Result};
use indexmap::IndexMap;
use serde::Serialize;

const JSON_INDENT: &[u8] = b"    ";

/// Encodes the index in the requested format.
pub fn serialize_index(index: &MakeModelIndex, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => to_json_pretty(index),
        OutputFormat::Csv => to_csv(index),
    }
}

/// Pretty JSON with 4-space indentation and no trailing newline. Key and list order follow
/// the map.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

fn to_csv(index: &MakeModelIndex) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["make", "model"])?;

    for (make, models) in index {
        for model in models {
            writer.write_record([make, model])?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| IndexError::IoError(e.into_error()))
}

/// Reads a previously generated JSON index, keeping its key order.
pub fn load_index(data: &[u8]) -> Result<MakeModelIndex> {
    let index: IndexMap<String, Vec<String>> = serde_json::from_slice(data)?;
    Ok(index)
}
