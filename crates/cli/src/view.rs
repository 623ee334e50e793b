use docmerge_api::{ImplementorEntry, SidebarNode};
use docmerge_core::SearchHit;
use nu_ansi_term::{Color, Style};
use tabled::Tabled;

#[derive(Tabled)]
pub struct ImplementorView {
    pub package: String,
    pub owner: String,
    pub description: String,
    pub synthetic: String,
}

impl ImplementorView {
    pub fn from_entry(entry: &ImplementorEntry) -> Self {
        Self {
            package: entry.source_package.to_string(),
            owner: entry.owner_type_path.clone(),
            description: strip_markup(&entry.target_description),
            synthetic: if entry.synthetic { "yes" } else { "-" }.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct SearchHitView {
    pub package: String,
    pub kind: String,
    pub path: String,
    pub summary: String,
}

impl SearchHitView {
    pub fn from_hit(hit: &SearchHit<'_>) -> Self {
        Self {
            package: hit.package.to_string(),
            kind: hit.node.kind.to_string(),
            path: hit.path(),
            summary: truncate(&hit.node.summary, 60),
        }
    }
}

#[derive(Tabled)]
pub struct PackageView {
    pub package: String,
    pub items: usize,
    pub sources: String,
}

/// Indented rendering of a sidebar tree, modules highlighted.
pub fn render_tree(root: &SidebarNode) -> String {
    let mut out = String::new();
    render_node(root, 0, &mut out);
    out
}

fn render_node(node: &SidebarNode, depth: usize, out: &mut String) {
    let name = if node.kind.is_container() {
        Style::new().fg(Color::LightBlue).bold().paint(format!("{}/", node.name)).to_string()
    } else {
        node.name.clone()
    };
    let kind = Color::DarkGray.paint(node.kind.to_string());

    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!("{} {}", kind, name));
    if !node.summary.is_empty() {
        out.push_str(&format!("  {}", Color::DarkGray.paint(truncate(&node.summary, 60))));
    }
    out.push('\n');

    for child in &node.children {
        render_node(child, depth + 1, out);
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

/// Implementor descriptions arrive as rendered HTML; tables want plain text.
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
}
