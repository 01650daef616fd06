//! JSON backup of the review schedule.
//! Saves and loads the full live record list as a pretty-printed array in
//! the same shape the original web API used.

use std::fs::File;
use std::io::{Read, Write};

use log::info;

use crate::models::ReviewRecord;

/// Exports the review list to a JSON file at the specified path.
/// Returns an error if file creation or writing fails.
pub fn export_json_to_path(
    records: &[ReviewRecord],
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_string = serde_json::to_string_pretty(records)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

/// Imports a review list from a JSON file.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_json(filename: &str) -> Result<Vec<ReviewRecord>, Box<dyn std::error::Error>> {
    let mut file = File::open(filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let records: Vec<ReviewRecord> = serde_json::from_str(&contents)?;

    info!("imported {} review(s) from '{}'", records.len(), filename);
    Ok(records)
}
