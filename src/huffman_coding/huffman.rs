use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::trace;

use crate::tools::freq_count::FreqTable;

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Node {
    Leaf { symbol: u8, weight: u64 },
    Kids { weight: u64, left: Box<Node>, right: Box<Node> },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Kids { weight, .. } => *weight,
        }
    }

    /// Join two nodes under a new parent. `left` is the node taken off the queue first.
    fn join(left: Node, right: Node) -> Node {
        Node::Kids {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Depth of the deepest leaf below this node.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Kids { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// A queue slot. The sequence number records insertion order so that equal weights
/// always come off the queue in the order they went on.
#[derive(Debug)]
struct Queued {
    seq: u32,
    node: Node,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    /// Reversed so the max-heap pops the lightest, earliest-inserted node.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .weight()
            .cmp(&self.node.weight())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Build the prefix tree for a frequency table. Returns None for an empty table.
///
/// Leaves go on the queue in ascending symbol order; every merged parent goes on
/// after everything already queued. Among equal weights the earlier entry is taken
/// first, and the first node taken becomes the left child.
pub fn build_tree(freqs: &FreqTable) -> Option<Node> {
    let mut heap = BinaryHeap::with_capacity(freqs.len());
    let mut seq = 0_u32;
    for (symbol, weight) in freqs.iter() {
        heap.push(Queued {
            seq,
            node: Node::Leaf { symbol, weight },
        });
        seq += 1;
    }

    while heap.len() > 1 {
        let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
            break;
        };
        trace!(
            "Joining weights {} and {}",
            left.node.weight(),
            right.node.weight()
        );
        heap.push(Queued {
            seq,
            node: Node::join(left.node, right.node),
        });
        seq += 1;
    }
    heap.pop().map(|q| q.node)
}
