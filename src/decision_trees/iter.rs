use std::collections::VecDeque;
use std::iter::Iterator;

use super::TreeNode;
use crate::Float;

/// Level-order (BFT) iterator of nodes in a decision tree
///
/// Siblings are visited in the domain order of their parent's split attribute.
pub struct NodeIter<'a, F> {
    queue: VecDeque<&'a TreeNode<F>>,
}

impl<'a, F> NodeIter<'a, F> {
    pub fn new(root: &'a TreeNode<F>) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(root);

        NodeIter { queue }
    }
}

impl<'a, F: Float> Iterator for NodeIter<'a, F> {
    type Item = &'a TreeNode<F>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front().map(|node| {
            self.queue.extend(node.children());

            node
        })
    }
}
