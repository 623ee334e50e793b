use docmerge_api::PartialIndexRecord;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let schema = schemars::schema_for!(PartialIndexRecord);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
