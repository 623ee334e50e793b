use std::path::Path;

use docmerge_core::loader::{records, rustdoc};
use tracing::info;

/// Converts a rustdoc output tree into `<package>.json` record files.
pub fn run(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let records = rustdoc::load_rustdoc_dir(input)?;
    if records.is_empty() {
        println!("No rustdoc index files found under {}.", input.display());
        return Ok(());
    }

    std::fs::create_dir_all(output)?;
    for record in &records {
        let path = records::write_record(output, record)?;
        info!(package = %record.package, path = %path.display(), "wrote record");
        println!(
            "{:<24} {:>4} implementors  -> {}",
            record.package.as_str(),
            record.implementors.len(),
            path.display()
        );
    }
    println!("Imported {} packages.", records.len());
    Ok(())
}
