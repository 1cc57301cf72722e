//! The free-space tree used by `RecursivePacker`.
//!
//! Every node covers a region of the container. A free node is a leaf that
//! can receive a rectangle. Placing a rectangle into a node marks it used and
//! splits the leftover space into two new leaves: the strip to the right of the
//! placed rectangle ("secondary") and the strip below it ("successor").
//!
//! Nodes live in an arena owned by the tree and refer to each other by index,
//! so dropping the tree releases every node at once.

use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

#[derive(Debug, Clone, Copy)]
struct Children {
    secondary: NodeId,
    successor: NodeId,
}

#[derive(Debug, Clone)]
struct Node {
    rect: Rect,

    /// Set once a rectangle has been placed into this node. Used nodes are
    /// never placed into again.
    children: Option<Children>,
}

impl Node {
    fn new(rect: Rect) -> Self {
        Self {
            rect,
            children: None,
        }
    }

    fn is_used(&self) -> bool {
        self.children.is_some()
    }
}

#[derive(Debug)]
pub(crate) struct FreeTree {
    nodes: Vec<Node>,

    /// Scratch stack for `find`, kept here to reuse its allocation between
    /// searches.
    unvisited: Vec<NodeId>,
}

impl FreeTree {
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            nodes: vec![Node::new(Rect::new((0, 0), size))],
            unvisited: Vec::new(),
        }
    }

    /// Finds the first free node that can hold `size`.
    ///
    /// Used nodes are searched depth-first, with the whole secondary subtree
    /// visited before the successor subtree. The first free node that fits
    /// wins.
    pub fn find(&mut self, size: (u32, u32)) -> Option<NodeId> {
        self.unvisited.clear();
        self.unvisited.push(ROOT);

        while let Some(id) = self.unvisited.pop() {
            let node = &self.nodes[id.0];

            match node.children {
                Some(children) => {
                    // Pushed in reverse so that secondary is popped first.
                    self.unvisited.push(children.successor);
                    self.unvisited.push(children.secondary);
                }
                None => {
                    if node.rect.can_hold(size) {
                        return Some(id);
                    }
                }
            }
        }

        None
    }

    /// Places a rectangle of `size` at the origin of the free node `id` and
    /// returns that origin.
    ///
    /// Both children are always created, even if one of them ends up with no
    /// area.
    pub fn split(&mut self, id: NodeId, size: (u32, u32)) -> (u32, u32) {
        let node = &self.nodes[id.0];
        debug_assert!(!node.is_used(), "node {:?} was already used", id);
        debug_assert!(node.rect.can_hold(size));

        let Rect {
            pos,
            size: node_size,
        } = node.rect;

        let secondary = self.push(Rect::new(
            (pos.0 + size.0, pos.1),
            (node_size.0 - size.0, size.1),
        ));
        let successor = self.push(Rect::new(
            (pos.0, pos.1 + size.1),
            (node_size.0, node_size.1 - size.1),
        ));

        self.nodes[id.0].children = Some(Children {
            secondary,
            successor,
        });

        log::trace!(
            "Split node {:?} at {:?}, secondary {:?}, successor {:?}",
            id,
            pos,
            self.nodes[secondary.0].rect,
            self.nodes[successor.0].rect,
        );

        pos
    }

    fn push(&mut self, rect: Rect) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(rect));
        id
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    fn rect(&self, id: NodeId) -> Rect {
        self.nodes[id.0].rect
    }

    #[cfg(test)]
    fn free_leaves(&self) -> impl Iterator<Item = Rect> + '_ {
        self.nodes
            .iter()
            .filter(|node| !node.is_used())
            .map(|node| node.rect)
    }
}
