use docmerge_api::ItemKind;
use docmerge_core::DocmergeConfig;
use tabled::Table;
use tabled::settings::Style;

use crate::SourceArgs;
use crate::load;
use crate::view::{ImplementorView, PackageView, SearchHitView, render_tree};

type CliResult = Result<(), Box<dyn std::error::Error>>;

pub async fn packages(source: &SourceArgs, config: &DocmergeConfig) -> CliResult {
    let query = load::open(source, config).await?;
    let views: Vec<PackageView> = query
        .all_packages()
        .into_iter()
        .map(|package| PackageView {
            package: package.to_string(),
            items: query
                .sidebar_of(package.as_str())
                .map(|root| root.node_count().saturating_sub(1))
                .unwrap_or(0),
            sources: query
                .sources_of(package.as_str())
                .map(|tree| tree.file_count().to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    if views.is_empty() {
        println!("No packages registered.");
    } else {
        println!("{}", Table::new(&views).with(Style::psql()));
    }
    Ok(())
}

pub async fn sidebar(source: &SourceArgs, config: &DocmergeConfig, package: &str) -> CliResult {
    let query = load::open(source, config).await?;
    match query.sidebar_of(package) {
        Some(root) => print!("{}", render_tree(root)),
        None => println!("Package '{}' is not registered.", package),
    }
    Ok(())
}

pub async fn implementors(
    source: &SourceArgs,
    config: &DocmergeConfig,
    trait_path: &str,
) -> CliResult {
    let query = load::open(source, config).await?;
    let views: Vec<ImplementorView> = query
        .implementors_of(trait_path)
        .iter()
        .filter(|entry| config.query.show_synthetic || !entry.synthetic)
        .map(ImplementorView::from_entry)
        .collect();

    if views.is_empty() {
        println!("No implementors recorded for '{}'.", trait_path);
    } else {
        println!("{}", Table::new(&views).with(Style::psql()));
    }
    Ok(())
}

pub async fn search(
    source: &SourceArgs,
    config: &DocmergeConfig,
    prefix: &str,
    kinds: &[String],
    limit: Option<usize>,
) -> CliResult {
    let query = load::open(source, config).await?;
    let kinds: Vec<ItemKind> = kinds.iter().map(|k| ItemKind::from(k.as_str())).collect();
    let limit = limit.unwrap_or(config.query.search_limit);

    let views: Vec<SearchHitView> = query
        .search_by_prefix_of_kind(prefix, &kinds)
        .take(limit)
        .map(|hit| SearchHitView::from_hit(&hit))
        .collect();

    if views.is_empty() {
        println!("No items start with '{}'.", prefix);
    } else {
        println!("{}", Table::new(&views).with(Style::psql()));
        if views.len() == limit {
            println!("(showing the first {} hits; raise --limit for more)", limit);
        }
    }
    Ok(())
}

pub async fn sources(source: &SourceArgs, config: &DocmergeConfig, package: &str) -> CliResult {
    let query = load::open(source, config).await?;
    match query.sources_of(package) {
        Some(tree) => {
            for path in tree.paths() {
                println!("{}", path);
            }
        }
        None => println!("No source listing for '{}'.", package),
    }
    Ok(())
}

pub async fn stats(source: &SourceArgs, config: &DocmergeConfig) -> CliResult {
    let query = load::open(source, config).await?;
    let stats = query.stats();
    println!("generation     {}", stats.generation);
    println!("packages       {}", stats.packages);
    println!("sidebar nodes  {}", stats.sidebar_nodes);
    println!("traits         {}", stats.traits);
    println!("implementors   {}", stats.implementors);
    Ok(())
}
