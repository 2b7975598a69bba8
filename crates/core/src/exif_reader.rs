use crate::error::EntryError;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads the raw `DateTimeOriginal` string (`YYYY:MM:DD HH:MM:SS`) from the
/// primary image of `path`.
pub fn read_capture_timestamp(path: &Path) -> Result<String, EntryError> {
    let file = File::open(path).map_err(|err| EntryError::Metadata {
        path: path.to_path_buf(),
        source: exif::Error::Io(err),
    })?;
    let mut buf = BufReader::new(file);
    let exif = match Reader::new().read_from_container(&mut buf) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => {
            return Err(EntryError::MissingField {
                path: path.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(EntryError::Metadata {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    exif.get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .and_then(|field| ascii_value(&field.value))
        .ok_or_else(|| EntryError::MissingField {
            path: path.to_path_buf(),
        })
}

fn ascii_value(value: &Value) -> Option<String> {
    let Value::Ascii(parts) = value else {
        return None;
    };
    parts
        .first()
        .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
        .filter(|v| !v.is_empty())
}
