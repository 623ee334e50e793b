use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Item category of a sidebar grouping.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemKind {
    Module,
    Macro,
    Struct,
    Enum,
    Union,
    Trait,
    TraitAlias,
    Function,
    Constant,
    Static,
    TypeAlias,
    Primitive,
    Keyword,
    AttributeMacro,
    DeriveMacro,
    // Extension
    Other(String),
}

impl ItemKind {
    pub fn as_str(&self) -> &str {
        match self {
            ItemKind::Module => "module",
            ItemKind::Macro => "macro",
            ItemKind::Struct => "struct",
            ItemKind::Enum => "enum",
            ItemKind::Union => "union",
            ItemKind::Trait => "trait",
            ItemKind::TraitAlias => "traitalias",
            ItemKind::Function => "function",
            ItemKind::Constant => "constant",
            ItemKind::Static => "static",
            ItemKind::TypeAlias => "type",
            ItemKind::Primitive => "primitive",
            ItemKind::Keyword => "keyword",
            ItemKind::AttributeMacro => "attr",
            ItemKind::DeriveMacro => "derive",
            ItemKind::Other(s) => s,
        }
    }

    /// Whether nodes of this kind may hold nested sidebar groupings.
    pub fn is_container(&self) -> bool {
        matches!(self, ItemKind::Module)
    }
}

impl From<&str> for ItemKind {
    fn from(s: &str) -> Self {
        // Short forms are the keys rustdoc writes into `sidebar-items.js`.
        match s.to_lowercase().as_str() {
            "module" | "mod" => ItemKind::Module,
            "macro" => ItemKind::Macro,
            "struct" => ItemKind::Struct,
            "enum" => ItemKind::Enum,
            "union" => ItemKind::Union,
            "trait" => ItemKind::Trait,
            "traitalias" => ItemKind::TraitAlias,
            "function" | "fn" => ItemKind::Function,
            "constant" | "const" => ItemKind::Constant,
            "static" => ItemKind::Static,
            "type" | "typedef" => ItemKind::TypeAlias,
            "primitive" => ItemKind::Primitive,
            "keyword" => ItemKind::Keyword,
            "attr" => ItemKind::AttributeMacro,
            "derive" => ItemKind::DeriveMacro,
            _ => ItemKind::Other(s.to_string()),
        }
    }
}

impl From<String> for ItemKind {
    fn from(s: String) -> Self {
        ItemKind::from(s.as_str())
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ItemKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ItemKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ItemKind::from(s))
    }
}

/// One navigable grouping in a package's sidebar.
///
/// Children are kept in insertion order, which is also display order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct SidebarNode {
    #[schemars(with = "String")]
    pub kind: ItemKind,
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SidebarNode>,
}

impl SidebarNode {
    pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            summary: String::new(),
            children: Vec::new(),
        }
    }

    /// Root grouping for a package: a module named after it.
    pub fn root(package: impl Into<String>) -> Self {
        Self::new(ItemKind::Module, package)
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_child(mut self, child: SidebarNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_child(&mut self, child: SidebarNode) {
        self.children.push(child);
    }

    pub fn find_child(&self, kind: &ItemKind, name: &str) -> Option<&SidebarNode> {
        self.children
            .iter()
            .find(|c| &c.kind == kind && c.name == name)
    }

    pub fn find_child_mut(&mut self, kind: &ItemKind, name: &str) -> Option<&mut SidebarNode> {
        self.children
            .iter_mut()
            .find(|c| &c.kind == kind && c.name == name)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SidebarNode::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_kind_accepts_rustdoc_short_forms() {
        assert_eq!(ItemKind::from("mod"), ItemKind::Module);
        assert_eq!(ItemKind::from("fn"), ItemKind::Function);
        assert_eq!(ItemKind::from("Struct"), ItemKind::Struct);
        assert_eq!(
            ItemKind::from("opaque"),
            ItemKind::Other("opaque".to_string())
        );
    }

    #[test]
    fn test_sidebar_node_serde_shape() {
        let node = SidebarNode::root("hashes")
            .with_child(SidebarNode::new(ItemKind::Struct, "Hmac").with_summary("keyed hash"));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["kind"], "module");
        assert_eq!(value["children"][0]["kind"], "struct");
        assert_eq!(value["children"][0]["summary"], "keyed hash");
        // Leaf nodes omit the empty children list
        assert!(value["children"][0].get("children").is_none());

        let back: SidebarNode = serde_json::from_value(value).unwrap();
        assert_eq!(back, node);
        assert_eq!(back.node_count(), 2);
    }

    #[test]
    fn test_find_child_matches_kind_and_name() {
        let root = SidebarNode::root("p")
            .with_child(SidebarNode::new(ItemKind::Module, "hash"))
            .with_child(SidebarNode::new(ItemKind::Function, "hash"));
        assert_eq!(
            root.find_child(&ItemKind::Function, "hash").map(|n| &n.kind),
            Some(&ItemKind::Function)
        );
        assert!(root.find_child(&ItemKind::Struct, "hash").is_none());
    }
}
