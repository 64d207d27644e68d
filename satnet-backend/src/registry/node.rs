//! Tree node and the structural primitives shared by every registry operation.
//!
//! All mutating helpers take ownership of a subtree and hand back its new
//! root, so the caller stores the result into whichever slot it came from.

use satnet_common::{SatId, Satellite};

pub(crate) type Link = Option<Box<Node>>;

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) sat: Satellite,
    pub(crate) height: usize,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl Node {
    pub(crate) fn new(sat: Satellite) -> Self {
        Self {
            sat,
            height: 1,
            left: None,
            right: None,
        }
    }

    pub(crate) fn id(&self) -> SatId {
        self.sat.id()
    }

    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// Left height minus right height
    pub(crate) fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

pub(crate) fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

fn rotate_right(mut y: Box<Node>) -> Box<Node> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

fn rotate_left(mut x: Box<Node>) -> Box<Node> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Rebalance after an insertion of `id` somewhere below `node`.
///
/// The inserted key decides between single and double rotation.
fn rebalance_for_insert(mut node: Box<Node>, id: SatId) -> Box<Node> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        let outer = node.left.as_ref().is_some_and(|l| id < l.id());
        if !outer {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if balance < -1 {
        let outer = node.right.as_ref().is_some_and(|r| id > r.id());
        if !outer {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

/// Rebalance on the unwind path of a removal.
///
/// The taller child's balance factor decides; a level child gets a single rotation.
pub(crate) fn rebalance(mut node: Box<Node>) -> Box<Node> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        if node.left.as_ref().map_or(0, |l| l.balance_factor()) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if balance < -1 {
        if node.right.as_ref().map_or(0, |r| r.balance_factor()) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

/// Insert `sat` below `link`. Returns the new subtree root and whether a node was created.
///
/// An id that is already present leaves the subtree untouched.
pub(crate) fn insert(link: Link, sat: Satellite) -> (Box<Node>, bool) {
    let Some(mut node) = link else {
        return (Box::new(Node::new(sat)), true);
    };

    let id = sat.id();
    let inserted = if id < node.id() {
        let (child, inserted) = insert(node.left.take(), sat);
        node.left = Some(child);
        inserted
    } else if id > node.id() {
        let (child, inserted) = insert(node.right.take(), sat);
        node.right = Some(child);
        inserted
    } else {
        return (node, false);
    };

    (rebalance_for_insert(node, id), inserted)
}

/// Remove `id` from below `link`. Returns the new subtree root and the removed record.
pub(crate) fn remove(link: Link, id: SatId) -> (Link, Option<Satellite>) {
    let Some(mut node) = link else {
        return (None, None);
    };

    let removed = if id < node.id() {
        let (child, removed) = remove(node.left.take(), id);
        node.left = child;
        removed
    } else if id > node.id() {
        let (child, removed) = remove(node.right.take(), id);
        node.right = child;
        removed
    } else {
        match (node.left.take(), node.right.take()) {
            (None, None) => return (None, Some(node.sat)),
            (Some(child), None) | (None, Some(child)) => return (Some(child), Some(node.sat)),
            (Some(left), Some(right)) => {
                // Two children: take over the successor's payload, then drop
                // the successor's own node from the right subtree.
                let successor = min_node(&right).sat.clone();
                let successor_id = successor.id();
                let removed = std::mem::replace(&mut node.sat, successor);
                node.left = Some(left);
                node.right = remove(Some(right), successor_id).0;
                Some(removed)
            }
        }
    };

    (Some(rebalance(node)), removed)
}

fn min_node(node: &Node) -> &Node {
    let mut current = node;
    while let Some(left) = current.left.as_deref() {
        current = left;
    }
    current
}

pub(crate) fn find(link: &Link, id: SatId) -> Option<&Node> {
    let mut current = link.as_deref();
    while let Some(node) = current {
        current = if id < node.id() {
            node.left.as_deref()
        } else if id > node.id() {
            node.right.as_deref()
        } else {
            return Some(node);
        };
    }
    None
}

pub(crate) fn find_mut(link: &mut Link, id: SatId) -> Option<&mut Node> {
    let mut current = link.as_deref_mut();
    while let Some(node) = current {
        current = if id < node.id() {
            node.left.as_deref_mut()
        } else if id > node.id() {
            node.right.as_deref_mut()
        } else {
            return Some(node);
        };
    }
    None
}

/// Post-order walk collecting the ids of deorbited records, deepest first.
pub(crate) fn collect_deorbited(link: &Link, out: &mut Vec<SatId>) {
    if let Some(node) = link {
        collect_deorbited(&node.left, out);
        collect_deorbited(&node.right, out);
        if node.sat.is_deorbited() {
            out.push(node.id());
        }
    }
}

/// Post-order release of a subtree. Returns the number of nodes freed.
pub(crate) fn release(link: Link) -> usize {
    match link {
        Some(mut node) => {
            let freed = release(node.left.take()) + release(node.right.take());
            drop(node);
            freed + 1
        }
        None => 0,
    }
}
