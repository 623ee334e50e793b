use std::fs;
use std::path::Path;
use std::sync::Arc;

use docmerge_api::{ImplementorEntry, ItemKind, PartialIndexRecord, SidebarNode};
use docmerge_core::config::LoaderConfig;
use docmerge_core::loader::{self, ArtifactFormat, records, rustdoc};
use docmerge_core::Session;
use tempfile::tempdir;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn rustdoc_fixture(root: &Path) {
    write(
        &root.join("bitcoin_hashes/sidebar-items.js"),
        r#"initSidebarItems({"mod":[["hmac","HMAC support"],["sha256","SHA256"]],"trait":[["Hash","Trait which applies to hashes of all types"],["HashEngine","A hashing engine which bytes can be serialized into"]]});"#,
    );
    write(
        &root.join("bitcoin_hashes/hmac/sidebar-items.js"),
        r#"initSidebarItems({"struct":[["Hmac","A hash computed from a RFC 2104 HMAC."],["HmacEngine","Pair of underlying hash engines."]]});"#,
    );
    write(
        &root.join("convert_case/sidebar-items.js"),
        r#"initSidebarItems({"enum":[["Case","Defines the type of casing a string can be."]],"trait":[["Casing","Describes items that can be converted into a case."]]});"#,
    );
    write(
        &root.join("implementors/core/borrow/trait.Borrow.js"),
        concat!(
            "(function() {var implementors = {};\n",
            r#"implementors["bitcoin_hashes"] = [{"text":"impl Borrow&lt;[u8]&gt; for Hash","synthetic":false,"types":["bitcoin_hashes::sha256::Hash"]}];"#,
            "\n",
            r#"implementors["bitcoin"] = [{"text":"impl Borrow&lt;[u8]&gt; for TapLeafHash","synthetic":false,"types":["bitcoin::util::taproot::TapLeafHash"]}];"#,
            "\nif (window.register_implementors) {window.register_implementors(implementors);} else {window.pending_implementors = implementors;}\n})()\n"
        ),
    );
    write(
        &root.join("source-files.js"),
        concat!(
            "var N = null;var sourcesIndex = {};\n",
            r#"sourcesIndex["bitcoin_hashes"] = {"name":"","files":["hmac.rs","lib.rs"]};"#,
            "\ncreateSourceSidebar();\n"
        ),
    );
    // Not part of any package sidebar.
    write(&root.join("implementors/sidebar-items.js"), "initSidebarItems({});");
}

#[test]
fn test_rustdoc_dir_into_records() {
    let dir = tempdir().unwrap();
    rustdoc_fixture(dir.path());

    let records = rustdoc::load_rustdoc_dir(dir.path()).unwrap();
    let packages: Vec<_> = records.iter().map(|r| r.package.as_str()).collect();
    assert_eq!(packages, vec!["bitcoin_hashes", "convert_case", "bitcoin"]);

    let hashes = &records[0];
    assert_eq!(hashes.sidebar.name, "bitcoin_hashes");
    let hmac = hashes.sidebar.find_child(&ItemKind::Module, "hmac").unwrap();
    assert_eq!(hmac.summary, "HMAC support");
    let nested: Vec<_> = hmac.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(nested, vec!["Hmac", "HmacEngine"]);
    assert_eq!(hashes.implementors.len(), 1);
    assert_eq!(hashes.implementors[0].trait_path, "core::borrow::Borrow");
    assert_eq!(
        hashes.sources.as_ref().unwrap().paths(),
        vec!["hmac.rs", "lib.rs"]
    );

    // Packages known only from implementors get a bare root.
    let bitcoin = &records[2];
    assert!(bitcoin.sidebar.children.is_empty());
    assert_eq!(bitcoin.implementors.len(), 1);

    for record in &records {
        docmerge_core::validate(record).unwrap();
    }
}

#[test]
fn test_format_detection() {
    let rustdoc_dir = tempdir().unwrap();
    rustdoc_fixture(rustdoc_dir.path());
    assert_eq!(ArtifactFormat::detect(rustdoc_dir.path()), ArtifactFormat::Rustdoc);

    let records_dir = tempdir().unwrap();
    records::write_record(records_dir.path(), &PartialIndexRecord::empty("a")).unwrap();
    assert_eq!(ArtifactFormat::detect(records_dir.path()), ArtifactFormat::Records);
}

#[test]
fn test_record_files_round_trip() {
    let dir = tempdir().unwrap();
    let record = PartialIndexRecord::new(
        "serde_value",
        SidebarNode::root("serde_value").with_child(SidebarNode::new(ItemKind::Enum, "Value")),
    )
    .with_implementor(
        ImplementorEntry::new(
            "serde::de::Deserializer",
            "serde_value::Value",
            "impl<'de> Deserializer<'de> for Value",
            "serde_value",
        )
        .synthetic(false),
    );

    let path = records::write_record(dir.path(), &record).unwrap();
    assert_eq!(path.file_name().unwrap(), "serde_value.json");
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let files = records::discover_record_files(dir.path()).unwrap();
    assert_eq!(files, vec![path.clone()]);
    assert_eq!(records::read_record(&path).unwrap(), record);
}

async fn load_with(dir: &Path, format: ArtifactFormat, ready_after: Option<usize>) -> Vec<String> {
    let session = Arc::new(Session::new());
    let config = LoaderConfig {
        concurrency: 2,
        ready_after,
    };
    let summary = loader::load_into(Arc::clone(&session), dir, format, &config)
        .await
        .unwrap();
    assert!(summary.rejected.is_empty());
    assert!(session.is_ready());

    let query = session.query();
    let mut seen: Vec<String> = query
        .search_by_prefix("")
        .map(|hit| format!("{}:{}", hit.package, hit.path()))
        .collect();
    for trait_path in query.trait_paths() {
        for entry in query.implementors_of(trait_path) {
            seen.push(format!("{} <- {}", trait_path, entry.owner_type_path));
        }
    }
    seen
}

#[tokio::test]
async fn test_load_result_independent_of_readiness_point() {
    let dir = tempdir().unwrap();
    rustdoc_fixture(dir.path());

    let early = load_with(dir.path(), ArtifactFormat::Rustdoc, Some(0)).await;
    let middle = load_with(dir.path(), ArtifactFormat::Rustdoc, Some(1)).await;
    let late = load_with(dir.path(), ArtifactFormat::Rustdoc, Some(100)).await;
    let default = load_with(dir.path(), ArtifactFormat::Rustdoc, None).await;

    assert_eq!(early, middle);
    assert_eq!(early, late);
    assert_eq!(early, default);
    assert!(early.contains(&"core::borrow::Borrow <- bitcoin::util::taproot::TapLeafHash".to_string()));
}

#[tokio::test]
async fn test_bad_record_file_is_reported_not_fatal() {
    let dir = tempdir().unwrap();
    records::write_record(dir.path(), &PartialIndexRecord::empty("good")).unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    let duplicate = PartialIndexRecord::new(
        "dup",
        SidebarNode::root("dup")
            .with_child(SidebarNode::new(ItemKind::Struct, "X"))
            .with_child(SidebarNode::new(ItemKind::Struct, "X")),
    );
    records::write_record(dir.path(), &duplicate).unwrap();

    let session = Arc::new(Session::new());
    let summary = loader::load_into(
        Arc::clone(&session),
        dir.path(),
        ArtifactFormat::Records,
        &LoaderConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(summary.registered(), 1);
    assert_eq!(summary.rejected.len(), 2);
    let query = session.query();
    let packages: Vec<_> = query.all_packages().iter().map(|p| p.to_string()).collect();
    assert_eq!(packages, vec!["good"]);
}
