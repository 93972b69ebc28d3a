use std::fmt;

/// A node of a binary decision tree: either a leaf holding a class, or a
/// decision on one attribute with a child for each of its two values.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(LeafNode),
    Decision(DecisionNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeafNode {
    pub majority_class: u8,
    /// Entropy or impurity of the rows that reached this node during training.
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionNode {
    pub split_attribute: String,
    /// Class predicted if this node is turned into a leaf.
    pub majority_class: u8,
    pub score: f64,
    pub split_gain: f64,
    /// Subtree for rows where the split attribute is 0.
    pub left: Box<Node>,
    /// Subtree for rows where the split attribute is 1.
    pub right: Box<Node>,
}

impl LeafNode {
    pub fn new(majority_class: u8, score: f64) -> Self {
        LeafNode { majority_class, score }
    }
}

impl DecisionNode {
    /// Get the child that should be traveled down, given the attribute value.
    pub fn get_child(&self, value: u8) -> &Node {
        if value == 0 {
            &self.left
        } else {
            &self.right
        }
    }
}

impl Node {
    pub fn leaf(majority_class: u8, score: f64) -> Self {
        Node::Leaf(LeafNode::new(majority_class, score))
    }

    pub fn decision(split_attribute: String, majority_class: u8, score: f64, split_gain: f64, left: Node, right: Node) -> Self {
        Node::Decision(DecisionNode {
            split_attribute,
            majority_class,
            score,
            split_gain,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn majority_class(&self) -> u8 {
        match self {
            Node::Leaf(leaf) => leaf.majority_class,
            Node::Decision(node) => node.majority_class,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Node::Leaf(leaf) => leaf.score,
            Node::Decision(node) => node.score,
        }
    }

    /// Turn a decision node into a leaf predicting its majority class,
    /// dropping both subtrees. Leaves are left untouched.
    pub fn make_leaf(&mut self) {
        let leaf = match self {
            Node::Decision(node) => LeafNode::new(node.majority_class, node.score),
            Node::Leaf(_) => return,
        };
        *self = Node::Leaf(leaf);
    }

    /// Turn the `target`-th decision node, counted in pre-order from zero, into a leaf.
    /// Returns false if the tree has fewer decision nodes.
    pub fn make_leaf_at(&mut self, target: usize) -> bool {
        let mut seen = 0;
        self.make_leaf_at_inner(target, &mut seen)
    }

    fn make_leaf_at_inner(&mut self, target: usize, seen: &mut usize) -> bool {
        if self.is_leaf() {
            return false;
        }
        if *seen == target {
            self.make_leaf();
            return true;
        }
        *seen += 1;
        match self {
            Node::Decision(node) => {
                node.left.make_leaf_at_inner(target, seen) || node.right.make_leaf_at_inner(target, seen)
            }
            Node::Leaf(_) => false,
        }
    }

    /// Decision nodes in pre-order: the node itself, then the left subtree, then the right.
    pub fn internal_nodes(&self) -> Vec<&DecisionNode> {
        let mut nodes = Vec::new();
        self.collect_internal(&mut nodes);
        nodes
    }

    fn collect_internal<'a>(&'a self, nodes: &mut Vec<&'a DecisionNode>) {
        if let Node::Decision(node) = self {
            nodes.push(node);
            node.left.collect_internal(nodes);
            node.right.collect_internal(nodes);
        }
    }

    pub fn n_internal(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Decision(node) => 1 + node.left.n_internal() + node.right.n_internal(),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Decision(node) => node.left.n_leaves() + node.right.n_leaves(),
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.n_internal() + self.n_leaves()
    }

    /// Number of decisions on the longest path from this node to a leaf.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Decision(node) => 1 + node.left.depth().max(node.right.depth()),
        }
    }
}

impl fmt::Display for Node {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Leaf(leaf) => write!(f, "leaf={},score={}", leaf.majority_class, leaf.score),
            Node::Decision(node) => write!(
                f,
                "[{}] majority={},score={},gain={}",
                node.split_attribute, node.majority_class, node.score, node.split_gain
            ),
        }
    }
}
