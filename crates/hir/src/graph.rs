use common::indexmap::IndexMap;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::Dfs,
};

use crate::hir_def::PackagePath;

/// Import graph of the packages in a program. An edge `a -> b` means `a`
/// imports `b`.
#[derive(Debug, Clone, Default)]
pub struct PackageGraph {
    graph: DiGraph<PackagePath, ()>,
    nodes: IndexMap<PackagePath, NodeIndex>,
}

impl PackageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_package(&mut self, path: PackagePath) -> NodeIndex {
        if let Some(&node) = self.nodes.get(&path) {
            return node;
        }
        let node = self.graph.add_node(path.clone());
        self.nodes.insert(path, node);
        node
    }

    pub fn add_import(&mut self, from: &PackagePath, to: &PackagePath) {
        let from = self.add_package(from.clone());
        let to = self.add_package(to.clone());
        self.graph.update_edge(from, to, ());
    }

    pub fn contains(&self, path: &PackagePath) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn imports(&self, path: &PackagePath) -> Vec<PackagePath> {
        let Some(&node) = self.nodes.get(path) else {
            return Vec::new();
        };
        let mut imports: Vec<_> = self
            .graph
            .neighbors(node)
            .map(|node| self.graph[node].clone())
            .collect();
        imports.sort();
        imports
    }

    /// `path` together with every package it transitively imports.
    pub fn dependency_closure(&self, path: &PackagePath) -> DependencyClosure {
        let Some(&root) = self.nodes.get(path) else {
            return DependencyClosure::new(vec![path.clone()]);
        };

        let mut packages = Vec::new();
        let mut dfs = Dfs::new(&self.graph, root);
        while let Some(node) = dfs.next(&self.graph) {
            packages.push(self.graph[node].clone());
        }
        DependencyClosure::new(packages)
    }
}

/// A set of packages closed under imports, used as the cache key of
/// everything derived from package scopes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyClosure {
    /// Sorted and deduplicated.
    packages: Vec<PackagePath>,
}

impl DependencyClosure {
    pub fn new(mut packages: Vec<PackagePath>) -> Self {
        packages.sort();
        packages.dedup();
        Self { packages }
    }

    pub fn contains(&self, path: &PackagePath) -> bool {
        self.packages.binary_search(path).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackagePath> {
        self.packages.iter()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> PackagePath {
        PackagePath::new(s)
    }

    #[test]
    fn closure_follows_imports_transitively() {
        let mut graph = PackageGraph::new();
        graph.add_import(&path("app"), &path("app/color"));
        graph.add_import(&path("app/color"), &path("app/base"));
        graph.add_package(path("unrelated"));

        let closure = graph.dependency_closure(&path("app"));
        assert_eq!(
            closure.iter().map(PackagePath::as_str).collect::<Vec<_>>(),
            vec!["app", "app/base", "app/color"]
        );
        assert!(!closure.contains(&path("unrelated")));

        let closure = graph.dependency_closure(&path("app/color"));
        assert!(!closure.contains(&path("app")));
    }

    #[test]
    fn closure_is_order_independent() {
        let mut a = PackageGraph::new();
        a.add_import(&path("main"), &path("x"));
        a.add_import(&path("main"), &path("y"));

        let mut b = PackageGraph::new();
        b.add_import(&path("main"), &path("y"));
        b.add_import(&path("main"), &path("x"));

        assert_eq!(
            a.dependency_closure(&path("main")),
            b.dependency_closure(&path("main"))
        );
        assert_eq!(a.imports(&path("main")), vec![path("x"), path("y")]);
    }

    #[test]
    fn unknown_package_closure_is_itself() {
        let graph = PackageGraph::new();
        let closure = graph.dependency_closure(&path("ghost"));
        assert_eq!(closure.len(), 1);
        assert!(closure.contains(&path("ghost")));
    }
}
