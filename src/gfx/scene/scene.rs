use crate::gfx::camera::Camera;
use crate::gfx::rendering::draw_list::{DrawCall, DrawList, FrameUniforms};
use crate::math::{Matrix4, Vector3};

use super::group::{
    find_node, find_node_mut, insert_node, remove_node_recursive, Group, InsertionPolicy, NodeId,
    SceneNode,
};
use super::object::SceneObject;
use super::vertex::DrawMode;

/// Main scene: a forest of nodes viewed through one camera under one light.
///
/// Cloning a scene clones its nodes, so the copy's nodes have new ids.
#[derive(Debug, Clone)]
pub struct Scene {
    camera: Camera,
    lighting: Vector3,
    wireframe: bool,
    policy: InsertionPolicy,
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub const DEFAULT_LIGHTING: Vector3 = Vector3::new(0.0, 1.0, 1.0);

    /// Creates an empty scene viewed through `camera`
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            lighting: Self::DEFAULT_LIGHTING,
            wireframe: false,
            policy: InsertionPolicy::default(),
            nodes: Vec::new(),
        }
    }

    /// Sets the light direction used for diffuse shading
    pub fn with_lighting(mut self, lighting: Vector3) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn with_insertion_policy(mut self, policy: InsertionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Adds a top-level node and returns its id
    pub fn add(&mut self, node: impl Into<SceneNode>) -> NodeId {
        insert_node(&mut self.nodes, node.into(), self.policy)
    }

    /// Removes a node by id from anywhere in the scene
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        remove_node_recursive(&mut self.nodes, id)
    }

    pub fn find(&self, id: NodeId) -> Option<&SceneNode> {
        find_node(&self.nodes, id)
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        find_node_mut(&mut self.nodes, id)
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

    /// Forces every leaf to draw as lines while enabled
    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn lighting(&self) -> Vector3 {
        self.lighting
    }

    pub fn set_lighting(&mut self, lighting: Vector3) {
        self.lighting = lighting;
    }

    /// Top-level nodes in draw order
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Number of nodes at every depth, groups included
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[SceneNode]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    SceneNode::Leaf { .. } => 1,
                    SceneNode::Group(group) => 1 + count(group.children()),
                })
                .sum()
        }
        count(&self.nodes)
    }

    pub fn statistics(&self) -> SceneStatistics {
        let mut stats = SceneStatistics::default();
        accumulate_statistics(&self.nodes, &mut stats);
        stats
    }

    /// Flattens the scene into draw calls for one frame.
    ///
    /// Leaves are visited depth-first starting from the identity. Each group
    /// multiplies its combined transform onto the accumulated one before
    /// descending; a leaf's model matrix is the accumulated transform times
    /// its own combined transform. Hidden leaves and groups emit no calls.
    pub fn draw_list(&self) -> DrawList<'_> {
        let uniforms = FrameUniforms {
            projection: self.camera.projection_matrix(),
            camera: self.camera.camera_matrix(),
            lighting: self.lighting,
        };

        let mut list = DrawList::new(uniforms);
        let forced_mode = self.wireframe.then_some(DrawMode::Lines);
        collect_draws(&self.nodes, Matrix4::identity(), forced_mode, &mut list.calls);
        list
    }
}

fn collect_draws<'a>(
    nodes: &'a [SceneNode],
    parent: Matrix4,
    forced_mode: Option<DrawMode>,
    calls: &mut Vec<DrawCall<'a>>,
) {
    for node in nodes {
        match node {
            SceneNode::Leaf { id, object } => {
                if !object.visible {
                    continue;
                }
                let mode = forced_mode.unwrap_or(object.mode());
                calls.push(DrawCall {
                    node: *id,
                    model: parent * object.transform().combined(),
                    mode,
                    buffers: object.buffers_for(mode),
                });
            }
            SceneNode::Group(group) => {
                let accumulated = parent * group.transform().combined();
                collect_draws(group.children(), accumulated, forced_mode, calls);
            }
        }
    }
}

fn accumulate_statistics(nodes: &[SceneNode], stats: &mut SceneStatistics) {
    for node in nodes {
        match node {
            SceneNode::Leaf { object, .. } => {
                stats.object_count += 1;
                stats.total_triangles += object.mesh().faces().len();
                stats.total_vertices += object.mesh().vertices().len();
            }
            SceneNode::Group(group) => {
                stats.group_count += 1;
                accumulate_statistics(group.children(), stats);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub group_count: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
}
