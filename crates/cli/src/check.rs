use docmerge_core::loader::{ArtifactFormat, records, rustdoc};
use docmerge_core::validate;

use crate::SourceArgs;

/// Validates every record under the source directory. Exits non-zero when
/// any record is rejected.
pub fn run(source: &SourceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut checked = 0usize;
    let mut failures = Vec::new();

    match source.artifact_format() {
        ArtifactFormat::Records => {
            for path in records::discover_record_files(&source.dir)? {
                checked += 1;
                let outcome = records::read_record(&path)
                    .and_then(|record| validate(&record).map_err(Into::into));
                if let Err(err) = outcome {
                    failures.push(format!("{}: {}", path.display(), err));
                }
            }
        }
        ArtifactFormat::Rustdoc => {
            for record in rustdoc::load_rustdoc_dir(&source.dir)? {
                checked += 1;
                if let Err(err) = validate(&record) {
                    failures.push(format!("{}: {}", record.package, err));
                }
            }
        }
    }

    for failure in &failures {
        println!("FAIL {}", failure);
    }
    println!("{} checked, {} rejected", checked, failures.len());

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} invalid records", failures.len()).into())
    }
}
