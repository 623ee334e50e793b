use std::collections::{BTreeMap, btree_map};
use std::sync::Arc;

use docmerge_api::{PackageName, SidebarNode};

use crate::validate::PATH_SEPARATOR;

/// One prefix-search match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub package: &'a PackageName,
    pub node: &'a SidebarNode,
    /// Ancestors from the package root down to the parent, `::`-joined.
    /// Empty for the root itself.
    pub parent_path: String,
}

impl SearchHit<'_> {
    pub fn path(&self) -> String {
        if self.parent_path.is_empty() {
            self.node.name.clone()
        } else {
            format!("{}{}{}", self.parent_path, PATH_SEPARATOR, self.node.name)
        }
    }
}

/// Lazy walk over every sidebar, packages in name order and each tree in
/// pre-order, yielding nodes whose name starts with the prefix.
///
/// Cloning the iterator (or asking the query engine again) restarts the walk.
#[derive(Clone)]
pub struct PrefixSearch<'a> {
    prefix: &'a str,
    packages: btree_map::Iter<'a, PackageName, Arc<SidebarNode>>,
    package: Option<&'a PackageName>,
    stack: Vec<(&'a SidebarNode, usize)>,
    ancestors: Vec<&'a str>,
}

impl<'a> PrefixSearch<'a> {
    pub fn new(sidebars: &'a BTreeMap<PackageName, Arc<SidebarNode>>, prefix: &'a str) -> Self {
        Self {
            prefix,
            packages: sidebars.iter(),
            package: None,
            stack: Vec::new(),
            ancestors: Vec::new(),
        }
    }
}

impl<'a> Iterator for PrefixSearch<'a> {
    type Item = SearchHit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some((node, depth)) = self.stack.pop() {
                self.ancestors.truncate(depth);

                let hit = match self.package {
                    Some(package) if node.name.starts_with(self.prefix) => Some(SearchHit {
                        package,
                        node,
                        parent_path: self.ancestors.join(PATH_SEPARATOR),
                    }),
                    _ => None,
                };

                self.ancestors.push(&node.name);
                self.stack
                    .extend(node.children.iter().rev().map(|child| (child, depth + 1)));

                if hit.is_some() {
                    return hit;
                }
            }

            let (package, root) = self.packages.next()?;
            self.package = Some(package);
            self.stack.push((root.as_ref(), 0));
        }
    }
}
