//! Where generated files go, and which file declares each module.
//!
//! Every node is written to `<namespace>/<module>.rs`. A directory's
//! child modules are declared by the node file of the same name when one
//! exists, like `models/pet.rs` for `models/pet/`, and by a `mod.rs`
//! inside the directory otherwise.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use oasc_core::ir::Model;

use crate::type_mapper::node_module;

/// The modules declared by one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleIndex {
    /// Child modules, in name order.
    pub modules: BTreeSet<String>,
    /// `(module, type)` for each node file in the directory.
    pub exports: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct Layout {
    indexes: BTreeMap<Vec<String>, ModuleIndex>,
    nodes: HashSet<Vec<String>>,
}

impl Layout {
    pub fn new(model: &Model) -> Self {
        let mut layout = Self::default();
        for node in &model.nodes {
            let module = node_module(&node.reference());
            let Some((name, directory)) = module.split_last() else {
                continue;
            };
            // Every ancestor directory declares the next segment down.
            for depth in 0..directory.len() {
                layout
                    .indexes
                    .entry(directory[..depth].to_vec())
                    .or_default()
                    .modules
                    .insert(directory[depth].clone());
            }
            let index = layout.indexes.entry(directory.to_vec()).or_default();
            index.modules.insert(name.clone());
            index.exports.push((name.clone(), node.name().to_string()));
            layout.nodes.insert(module);
        }
        // The user declares the outermost module.
        if !model.base.is_empty() {
            layout.indexes.remove(&Vec::new());
        }
        layout
    }

    /// The file path of a module that holds a node.
    pub fn node_file(module: &[String]) -> String {
        format!("{}.rs", module.join("/"))
    }

    /// The declarations that the node file for `module` carries for its
    /// directory, if it has one.
    pub fn hosted(&self, module: &[String]) -> Option<&ModuleIndex> {
        self.indexes.get(module)
    }

    /// `mod.rs` files for directories without a node file of their own.
    pub fn index_files(&self) -> impl Iterator<Item = (String, &ModuleIndex)> {
        self.indexes
            .iter()
            .filter(|(directory, _)| !self.nodes.contains(*directory))
            .map(|(directory, index)| {
                let path = if directory.is_empty() {
                    "mod.rs".to_string()
                } else {
                    format!("{}/mod.rs", directory.join("/"))
                };
                (path, index)
            })
    }
}
