use crate::errors::{AppError, AppResult};
use flate2::read::GzDecoder;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use zip::ZipArchive;

/// Read a dump file as text. `.gz` and `.zip` archives are unpacked on the fly;
/// from a zip the first `*.sql` entry is used.
pub fn read_dump(path: &Path) -> AppResult<String> {
    if !path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Dump file not found: {}", path.display()),
        )
        .into());
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "gz" => {
            let file = fs::File::open(path)?;
            let mut text = String::new();
            GzDecoder::new(file).read_to_string(&mut text)?;
            Ok(text)
        }
        "zip" => read_zip_entry(path),
        _ => Ok(fs::read_to_string(path)?),
    }
}

fn read_zip_entry(path: &Path) -> AppResult<String> {
    let file = fs::File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let name = archive
        .file_names()
        .filter(|n| n.to_lowercase().ends_with(".sql"))
        .min()
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::Other(format!("No .sql entry found in archive {}", path.display()))
        })?;

    let mut entry = archive.by_name(&name)?;
    let mut text = String::new();
    entry.read_to_string(&mut text)?;
    Ok(text)
}
