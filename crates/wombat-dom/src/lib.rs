//! Document tree consumed by the Wombat box construction core.
//!
//! This crate provides an arena-based node tree following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), restricted to what
//! box construction needs: node kind, element name, attribute lookup by
//! name, and child/sibling traversal. The tree is produced by an external
//! markup parser and treated as read-only here.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow
//! checker issues.

use std::collections::HashMap;

/// Map of attribute names to values for an element.
///
/// Attribute names are stored lowercased, as an HTML parser emits them.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the document tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    /// "An object A's next sibling is the object immediately following A
    /// in the children of A's parent."
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    /// "An object A's previous sibling is the object immediately preceding A
    /// in the children of A's parent."
    pub prev_sibling: Option<NodeId>,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
///
/// Box construction only distinguishes elements and text; every other kind
/// is skipped (comments, processing instructions).
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
    /// [§ 4.6 Interface ProcessingInstruction](https://dom.spec.whatwg.org/#interface-processinginstruction)
    ProcessingInstruction(String),
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// "When an element is created, its local name is always given."
///
/// NOTE: Only the local name and attribute list are stored; namespaces and
/// custom elements are a parser concern outside this pipeline.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Look up an attribute value by name (names are ASCII
    /// case-insensitive in HTML).
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .get(name)
            .map(String::as_str)
            .or_else(|| {
                let lower = name.to_ascii_lowercase();
                self.attrs.get(&lower).map(String::as_str)
            })
    }

    /// Whether the attribute is present at all (boolean attributes such as
    /// `selected` and `noresize`).
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }
}

/// Arena-based document tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree."
///
/// All nodes live in a contiguous vector, using indices for all
/// relationships. This provides O(1) access by [`NodeId`], O(1)
/// parent/sibling traversal, and no borrowing issues.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by NodeId.
    /// The Document node is always at index 0 (NodeId::ROOT).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new document tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        DomTree {
            nodes: vec![document],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Appends `child` as the last child of `parent`, updating all
    /// relationships. Only used while the external parser populates the
    /// tree; box construction never mutates it.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get the lowercased element name, if this node is an element.
    #[must_use]
    pub fn element_name(&self, id: NodeId) -> Option<String> {
        self.as_element(id).map(|e| e.tag_name.to_ascii_lowercase())
    }

    /// Get an attribute value by name, if this node is an element carrying
    /// that attribute.
    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id).and_then(|e| e.attr(name))
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// "The descendant text content of a node node is the concatenation of
    /// the data of all the Text node descendants of node, in tree order."
    #[must_use]
    pub fn descendant_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(node) = self.get(id) {
            if let NodeType::Text(s) = &node.node_type {
                out.push_str(s);
            }
            for &child in &node.children {
                self.collect_text(child, out);
            }
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
