//! Declarative description of the mascot: a flat list of nodes where every
//! parent precedes its children, plus lights, camera and materials. The
//! renderer instantiates this once; afterwards only the nodes named in
//! [`MascotParts`] are touched.

use std::f64::consts::{FRAC_PI_2, PI};

use super::JointState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Group,
    Box { width: f64, height: f64, depth: f64 },
    Sphere { radius: f64 },
    Capsule { radius: f64, length: f64 },
    Cylinder { top: f64, bottom: f64, height: f64 },
    Torus { radius: f64, tube: f64 },
    Plane { width: f64, height: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    Shell,
    Accent,
    Visor,
    Joint,
    Glow,
    Panel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSpec {
    pub color: u32,
    pub metalness: f64,
    pub roughness: f64,
    pub emissive: u32,
    pub emissive_intensity: f64,
}

impl Surface {
    pub const ALL: [Surface; 6] = [
        Self::Shell,
        Self::Accent,
        Self::Visor,
        Self::Joint,
        Self::Glow,
        Self::Panel,
    ];

    pub fn spec(self) -> SurfaceSpec {
        match self {
            Self::Shell => SurfaceSpec {
                color: 0xf4f4f5,
                metalness: 0.15,
                roughness: 0.35,
                emissive: 0x000000,
                emissive_intensity: 0.0,
            },
            Self::Accent => SurfaceSpec {
                color: 0x7c5cff,
                metalness: 0.4,
                roughness: 0.3,
                emissive: 0x1e1046,
                emissive_intensity: 0.3,
            },
            Self::Visor => SurfaceSpec {
                color: 0x0f172a,
                metalness: 0.6,
                roughness: 0.15,
                emissive: 0x000000,
                emissive_intensity: 0.0,
            },
            Self::Joint => SurfaceSpec {
                color: 0x9ca3af,
                metalness: 0.7,
                roughness: 0.4,
                emissive: 0x000000,
                emissive_intensity: 0.0,
            },
            Self::Glow => SurfaceSpec {
                color: 0x38bdf8,
                metalness: 0.0,
                roughness: 0.2,
                emissive: 0x38bdf8,
                emissive_intensity: 1.2,
            },
            Self::Panel => SurfaceSpec {
                color: 0x111827,
                metalness: 0.1,
                roughness: 0.5,
                emissive: 0xffffff,
                emissive_intensity: 0.6,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChestFace {
    Pattern,
    Heart,
    Flower,
}

impl ChestFace {
    pub const ALL: [ChestFace; 3] = [Self::Pattern, Self::Heart, Self::Flower];

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Pattern => "</>",
            Self::Heart => "♥",
            Self::Flower => "✿",
        }
    }

    pub fn background(self) -> (&'static str, &'static str) {
        match self {
            Self::Pattern => ("#1e1b4b", "#0f172a"),
            Self::Heart => ("#4c0519", "#1f0310"),
            Self::Flower => ("#052e16", "#022c22"),
        }
    }

    pub fn ink(self) -> &'static str {
        match self {
            Self::Pattern => "#a5b4fc",
            Self::Heart => "#fb7185",
            Self::Flower => "#fde047",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: [0.0; 3],
        rotation: [0.0; 3],
        scale: [1.0; 3],
    };

    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: [x, y, z],
            ..Self::IDENTITY
        }
    }

    pub fn rotated(self, x: f64, y: f64, z: f64) -> Self {
        Self {
            rotation: [x, y, z],
            ..self
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeSpec {
    pub parent: Option<NodeId>,
    pub name: &'static str,
    pub shape: Shape,
    pub surface: Option<Surface>,
    pub transform: Transform,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional,
    Point { distance: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSpec {
    pub kind: LightKind,
    pub color: u32,
    pub intensity: f64,
    pub position: [f64; 3],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSpec {
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    pub position: [f64; 3],
    pub target: [f64; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MascotParts {
    pub root: NodeId,
    pub body: NodeId,
    pub head: NodeId,
    pub chest_panel: NodeId,
    pub left_shoulder: NodeId,
    pub right_shoulder: NodeId,
    pub right_elbow: NodeId,
    pub halo: NodeId,
    pub orbit_ring: NodeId,
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    fn pick(self, left: &'static str, right: &'static str) -> &'static str {
        match self {
            Self::Left => left,
            Self::Right => right,
        }
    }
}

#[derive(Default)]
struct Builder {
    nodes: Vec<NodeSpec>,
}

impl Builder {
    fn add(
        &mut self,
        parent: Option<NodeId>,
        name: &'static str,
        shape: Shape,
        surface: Option<Surface>,
        transform: Transform,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeSpec {
            parent,
            name,
            shape,
            surface,
            transform,
        });
        id
    }

    fn mesh(
        &mut self,
        parent: NodeId,
        name: &'static str,
        shape: Shape,
        surface: Surface,
        transform: Transform,
    ) -> NodeId {
        self.add(Some(parent), name, shape, Some(surface), transform)
    }

    fn pivot(&mut self, parent: NodeId, name: &'static str, transform: Transform) -> NodeId {
        self.add(Some(parent), name, Shape::Group, None, transform)
    }

    fn arm(&mut self, body: NodeId, side: Side) -> (NodeId, NodeId) {
        let sign = side.sign();
        let shoulder = self.pivot(
            body,
            side.pick("left_shoulder", "right_shoulder"),
            Transform::at(0.68 * sign, 0.42, 0.0).rotated(0.0, 0.0, -0.18 * sign),
        );
        self.mesh(
            shoulder,
            side.pick("left_shoulder_cap", "right_shoulder_cap"),
            Shape::Sphere { radius: 0.16 },
            Surface::Joint,
            Transform::IDENTITY,
        );
        self.mesh(
            shoulder,
            side.pick("left_upper_arm", "right_upper_arm"),
            Shape::Capsule {
                radius: 0.12,
                length: 0.34,
            },
            Surface::Shell,
            Transform::at(0.0, -0.28, 0.0),
        );
        let elbow = self.pivot(
            shoulder,
            side.pick("left_elbow", "right_elbow"),
            Transform::at(0.0, -0.56, 0.0),
        );
        self.mesh(
            elbow,
            side.pick("left_forearm", "right_forearm"),
            Shape::Capsule {
                radius: 0.11,
                length: 0.28,
            },
            Surface::Accent,
            Transform::at(0.0, -0.22, 0.0),
        );
        self.mesh(
            elbow,
            side.pick("left_hand", "right_hand"),
            Shape::Sphere { radius: 0.14 },
            Surface::Joint,
            Transform::at(0.0, -0.48, 0.0),
        );
        (shoulder, elbow)
    }

    fn leg(&mut self, body: NodeId, side: Side) {
        let sign = side.sign();
        let hip = self.pivot(
            body,
            side.pick("left_hip", "right_hip"),
            Transform::at(0.24 * sign, -0.62, 0.0),
        );
        self.mesh(
            hip,
            side.pick("left_leg", "right_leg"),
            Shape::Capsule {
                radius: 0.14,
                length: 0.36,
            },
            Surface::Shell,
            Transform::at(0.0, -0.32, 0.0),
        );
        self.mesh(
            hip,
            side.pick("left_foot", "right_foot"),
            Shape::Box {
                width: 0.26,
                height: 0.12,
                depth: 0.4,
            },
            Surface::Accent,
            Transform::at(0.0, -0.68, 0.08),
        );
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MascotBlueprint {
    nodes: Vec<NodeSpec>,
    parts: MascotParts,
    lights: Vec<LightSpec>,
    camera: CameraSpec,
}

impl MascotBlueprint {
    pub fn humanoid() -> Self {
        let mut builder = Builder::default();

        let root = builder.add(None, "mascot", Shape::Group, None, Transform::IDENTITY);
        let body = builder.mesh(
            root,
            "body",
            Shape::Capsule {
                radius: 0.55,
                length: 0.7,
            },
            Surface::Shell,
            Transform::at(0.0, 0.1, 0.0),
        );
        let chest_panel = builder.mesh(
            body,
            "chest_panel",
            Shape::Plane {
                width: 0.52,
                height: 0.38,
            },
            Surface::Panel,
            Transform::at(0.0, 0.16, 0.553),
        );
        builder.mesh(
            body,
            "belt",
            Shape::Torus {
                radius: 0.56,
                tube: 0.05,
            },
            Surface::Accent,
            Transform::at(0.0, -0.34, 0.0).rotated(FRAC_PI_2, 0.0, 0.0),
        );
        builder.mesh(
            body,
            "backpack",
            Shape::Box {
                width: 0.5,
                height: 0.6,
                depth: 0.16,
            },
            Surface::Accent,
            Transform::at(0.0, 0.12, -0.58),
        );
        builder.mesh(
            body,
            "neck",
            Shape::Cylinder {
                top: 0.12,
                bottom: 0.15,
                height: 0.2,
            },
            Surface::Joint,
            Transform::at(0.0, 0.72, 0.0),
        );

        let head = builder.mesh(
            body,
            "head",
            Shape::Sphere { radius: 0.48 },
            Surface::Shell,
            Transform::at(0.0, 1.14, 0.0),
        );
        builder.mesh(
            head,
            "visor",
            Shape::Box {
                width: 0.66,
                height: 0.26,
                depth: 0.12,
            },
            Surface::Visor,
            Transform::at(0.0, 0.04, 0.41),
        );
        builder.mesh(
            head,
            "left_eye",
            Shape::Sphere { radius: 0.06 },
            Surface::Glow,
            Transform::at(-0.14, 0.05, 0.48),
        );
        builder.mesh(
            head,
            "right_eye",
            Shape::Sphere { radius: 0.06 },
            Surface::Glow,
            Transform::at(0.14, 0.05, 0.48),
        );
        let antenna = builder.mesh(
            head,
            "antenna",
            Shape::Cylinder {
                top: 0.02,
                bottom: 0.025,
                height: 0.28,
            },
            Surface::Joint,
            Transform::at(0.0, 0.58, 0.0),
        );
        builder.mesh(
            antenna,
            "antenna_tip",
            Shape::Sphere { radius: 0.07 },
            Surface::Glow,
            Transform::at(0.0, 0.18, 0.0),
        );
        let halo = builder.mesh(
            head,
            "halo",
            Shape::Torus {
                radius: 0.34,
                tube: 0.025,
            },
            Surface::Glow,
            Transform::at(0.0, 0.74, 0.0).rotated(FRAC_PI_2, 0.0, 0.0),
        );

        let (left_shoulder, _) = builder.arm(body, Side::Left);
        let (right_shoulder, right_elbow) = builder.arm(body, Side::Right);
        builder.leg(body, Side::Left);
        builder.leg(body, Side::Right);

        let orbit_ring = builder.mesh(
            root,
            "orbit_ring",
            Shape::Torus {
                radius: 1.25,
                tube: 0.015,
            },
            Surface::Glow,
            Transform::at(0.0, -0.2, 0.0).rotated(PI / 2.2, 0.0, 0.0),
        );
        builder.mesh(
            orbit_ring,
            "orbit_bead",
            Shape::Sphere { radius: 0.06 },
            Surface::Accent,
            Transform::at(1.25, 0.0, 0.0),
        );

        Self {
            nodes: builder.nodes,
            parts: MascotParts {
                root,
                body,
                head,
                chest_panel,
                left_shoulder,
                right_shoulder,
                right_elbow,
                halo,
                orbit_ring,
            },
            lights: vec![
                LightSpec {
                    kind: LightKind::Ambient,
                    color: 0xffffff,
                    intensity: 0.55,
                    position: [0.0; 3],
                },
                LightSpec {
                    kind: LightKind::Directional,
                    color: 0xffffff,
                    intensity: 1.1,
                    position: [3.0, 4.0, 5.0],
                },
                LightSpec {
                    kind: LightKind::Point { distance: 12.0 },
                    color: 0x7c5cff,
                    intensity: 1.4,
                    position: [-3.0, 2.0, -2.0],
                },
                LightSpec {
                    kind: LightKind::Point { distance: 10.0 },
                    color: 0x38bdf8,
                    intensity: 0.8,
                    position: [2.0, -1.0, 3.0],
                },
            ],
            camera: CameraSpec {
                fov_deg: 35.0,
                near: 0.1,
                far: 50.0,
                position: [0.0, 0.4, 6.2],
                target: [0.0, 0.3, 0.0],
            },
        }
    }

    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &NodeSpec {
        &self.nodes[id.0]
    }

    pub fn parts(&self) -> &MascotParts {
        &self.parts
    }

    pub fn lights(&self) -> &[LightSpec] {
        &self.lights
    }

    pub fn camera(&self) -> &CameraSpec {
        &self.camera
    }

    pub fn rest_joints(&self) -> JointState {
        let head = self.node(self.parts.head).transform.rotation;
        let shoulder = self.node(self.parts.right_shoulder).transform.rotation;
        let elbow = self.node(self.parts.right_elbow).transform.rotation;

        JointState {
            head_yaw: head[1],
            right_shoulder_x: shoulder[0],
            right_shoulder_z: shoulder[2],
            right_elbow_z: elbow[2],
            chest_glow: Surface::Panel.spec().emissive_intensity,
            chest_face: ChestFace::Pattern,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parents_precede_children() {
        let blueprint = MascotBlueprint::humanoid();
        for (index, node) in blueprint.nodes().iter().enumerate() {
            if let Some(parent) = node.parent {
                assert!(parent.index() < index, "{} appears before its parent", node.name);
            }
        }
        assert_eq!(blueprint.nodes()[0].parent, None);
        assert_eq!(
            blueprint.nodes().iter().filter(|node| node.parent.is_none()).count(),
            1
        );
    }

    #[test]
    fn node_names_are_unique() {
        let blueprint = MascotBlueprint::humanoid();
        let names: HashSet<_> = blueprint.nodes().iter().map(|node| node.name).collect();
        assert_eq!(names.len(), blueprint.nodes().len());
    }

    #[test]
    fn part_handles_point_at_the_expected_nodes() {
        let blueprint = MascotBlueprint::humanoid();
        let parts = blueprint.parts();

        assert_eq!(blueprint.node(parts.root).name, "mascot");
        assert_eq!(blueprint.node(parts.head).name, "head");
        assert_eq!(blueprint.node(parts.chest_panel).name, "chest_panel");
        assert_eq!(blueprint.node(parts.chest_panel).surface, Some(Surface::Panel));
        assert_eq!(blueprint.node(parts.right_shoulder).name, "right_shoulder");
        assert_eq!(blueprint.node(parts.right_elbow).name, "right_elbow");
        assert_eq!(blueprint.node(parts.right_elbow).parent, Some(parts.right_shoulder));
        assert_eq!(blueprint.node(parts.orbit_ring).parent, Some(parts.root));
    }

    #[test]
    fn groups_carry_no_surface_and_meshes_do() {
        let blueprint = MascotBlueprint::humanoid();
        for node in blueprint.nodes() {
            assert_eq!(
                node.shape == Shape::Group,
                node.surface.is_none(),
                "{}",
                node.name
            );
        }
    }

    #[test]
    fn arms_mirror_each_other() {
        let blueprint = MascotBlueprint::humanoid();
        let left = blueprint.node(blueprint.parts().left_shoulder).transform;
        let right = blueprint.node(blueprint.parts().right_shoulder).transform;
        assert_eq!(left.position[0], -right.position[0]);
        assert_eq!(left.rotation[2], -right.rotation[2]);
    }

    #[test]
    fn rest_joints_come_from_the_blueprint() {
        let blueprint = MascotBlueprint::humanoid();
        let rest = blueprint.rest_joints();
        assert_eq!(rest.head_yaw, 0.0);
        assert_eq!(rest.right_shoulder_z, -0.18);
        assert_eq!(rest.chest_face, ChestFace::Pattern);
        assert_eq!(rest.chest_glow, 0.6);
    }

    #[test]
    fn scene_is_lit() {
        let blueprint = MascotBlueprint::humanoid();
        assert!(blueprint
            .lights()
            .iter()
            .any(|light| light.kind == LightKind::Ambient));
        assert!(blueprint.lights().len() >= 3);
    }
}
