//! Box-drawing display of a [`TreeModel`] via termtree.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::model::TreeModel;

pub trait TreeNodeConvert {
    /// One termtree per root element.
    fn to_tree_string(&self) -> Vec<Tree<String>>;
}

impl TreeNodeConvert for TreeModel {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Vec<Tree<String>> {
        fn build_tree(model: &TreeModel, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = model.get(node_idx) {
                for &child_idx in &node.children {
                    if let Some(child) = model.get(child_idx) {
                        let mut child_tree = Tree::new(child.label.clone());
                        build_tree(model, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        self.roots()
            .iter()
            .filter_map(|&root_idx| {
                let root = self.get(root_idx)?;
                let mut tree = Tree::new(root.label.clone());
                build_tree(self, root_idx, &mut tree);
                Some(tree)
            })
            .collect()
    }
}
