//! # Groups and Scene Nodes
//!
//! The scene graph is a tree of [`SceneNode`]s: drawable leaves and groups
//! that own an ordered list of children. A group's transform applies to all
//! of its descendants.

use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::math::Vector3;

use super::object::SceneObject;
use super::transform::Transform;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a node in a scene graph.
///
/// Ids are handed out when a node is created and never reused within a
/// process, so they identify a node across moves between groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where [`Group::add`] places a new child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertionPolicy {
    /// Children keep the order they were added in
    #[default]
    Sequential,
    /// Leaves are appended, groups are prepended, so nested groups draw
    /// before their sibling leaves
    GroupsFirst,
}

/// A node of the scene graph.
///
/// Cloning gives the copy, and every node below it, a fresh [`NodeId`].
#[derive(Debug)]
pub enum SceneNode {
    Leaf { id: NodeId, object: SceneObject },
    Group(Group),
}

impl SceneNode {
    pub fn id(&self) -> NodeId {
        match self {
            SceneNode::Leaf { id, .. } => *id,
            SceneNode::Group(group) => group.id(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, SceneNode::Leaf { .. })
    }

    pub fn transform(&self) -> &Transform {
        match self {
            SceneNode::Leaf { object, .. } => object.transform(),
            SceneNode::Group(group) => group.transform(),
        }
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        match self {
            SceneNode::Leaf { object, .. } => object.transform_mut(),
            SceneNode::Group(group) => group.transform_mut(),
        }
    }

    pub fn as_object(&self) -> Option<&SceneObject> {
        match self {
            SceneNode::Leaf { object, .. } => Some(object),
            SceneNode::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            SceneNode::Group(group) => Some(group),
            SceneNode::Leaf { .. } => None,
        }
    }
}

impl Clone for SceneNode {
    fn clone(&self) -> Self {
        match self {
            SceneNode::Leaf { object, .. } => SceneNode::Leaf {
                id: NodeId::next(),
                object: object.clone(),
            },
            SceneNode::Group(group) => SceneNode::Group(group.clone()),
        }
    }
}

impl From<SceneObject> for SceneNode {
    fn from(object: SceneObject) -> Self {
        SceneNode::Leaf {
            id: NodeId::next(),
            object,
        }
    }
}

impl From<Group> for SceneNode {
    fn from(group: Group) -> Self {
        SceneNode::Group(group)
    }
}

/// Ordered collection of child nodes sharing one transform.
///
/// A clone is a new subtree: it and all of its descendants get fresh ids.
#[derive(Debug)]
pub struct Group {
    id: NodeId,
    transform: Transform,
    children: Vec<SceneNode>,
    policy: InsertionPolicy,
}

impl Clone for Group {
    fn clone(&self) -> Self {
        Self {
            id: NodeId::next(),
            transform: self.transform.clone(),
            children: self.children.clone(),
            policy: self.policy,
        }
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new(Vector3::zero())
    }
}

impl Group {
    pub fn new(position: Vector3) -> Self {
        Self {
            id: NodeId::next(),
            transform: Transform::new(position),
            children: Vec::new(),
            policy: InsertionPolicy::default(),
        }
    }

    pub fn with_insertion_policy(mut self, policy: InsertionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn insertion_policy(&self) -> InsertionPolicy {
        self.policy
    }

    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Adds a child and returns its id
    pub fn add(&mut self, node: impl Into<SceneNode>) -> NodeId {
        insert_node(&mut self.children, node.into(), self.policy)
    }

    /// Removes a direct child by id, keeping the order of the rest
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        remove_node(&mut self.children, id)
    }

    /// Removes a node by id from anywhere below this group
    pub fn remove_recursive(&mut self, id: NodeId) -> Option<SceneNode> {
        remove_node_recursive(&mut self.children, id)
    }

    /// Depth-first search below this group
    pub fn find(&self, id: NodeId) -> Option<&SceneNode> {
        find_node(&self.children, id)
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        find_node_mut(&mut self.children, id)
    }

    pub fn object_mut(&mut self, id: NodeId) -> Option<&mut SceneObject> {
        match self.find_mut(id)? {
            SceneNode::Leaf { object, .. } => Some(object),
            SceneNode::Group(_) => None,
        }
    }

    pub fn group_mut(&mut self, id: NodeId) -> Option<&mut Group> {
        match self.find_mut(id)? {
            SceneNode::Group(group) => Some(group),
            SceneNode::Leaf { .. } => None,
        }
    }
}

pub(crate) fn insert_node(
    nodes: &mut Vec<SceneNode>,
    node: SceneNode,
    policy: InsertionPolicy,
) -> NodeId {
    let id = node.id();
    match policy {
        InsertionPolicy::GroupsFirst if !node.is_leaf() => nodes.insert(0, node),
        _ => nodes.push(node),
    }
    id
}

pub(crate) fn remove_node(nodes: &mut Vec<SceneNode>, id: NodeId) -> Option<SceneNode> {
    let index = nodes.iter().position(|node| node.id() == id)?;
    Some(nodes.remove(index))
}

pub(crate) fn remove_node_recursive(nodes: &mut Vec<SceneNode>, id: NodeId) -> Option<SceneNode> {
    if let Some(node) = remove_node(nodes, id) {
        return Some(node);
    }
    nodes.iter_mut().find_map(|node| match node {
        SceneNode::Group(group) => group.remove_recursive(id),
        SceneNode::Leaf { .. } => None,
    })
}

pub(crate) fn find_node(nodes: &[SceneNode], id: NodeId) -> Option<&SceneNode> {
    nodes.iter().find_map(|node| {
        if node.id() == id {
            return Some(node);
        }
        match node {
            SceneNode::Group(group) => group.find(id),
            SceneNode::Leaf { .. } => None,
        }
    })
}

pub(crate) fn find_node_mut(nodes: &mut [SceneNode], id: NodeId) -> Option<&mut SceneNode> {
    for node in nodes.iter_mut() {
        if node.id() == id {
            return Some(node);
        }
        if let SceneNode::Group(group) = node {
            if let Some(found) = group.find_mut(id) {
                return Some(found);
            }
        }
    }
    None
}
