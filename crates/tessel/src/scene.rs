//! # Scene — Static Scene Description and Render List
//!
//! A scene is data: which meshes exist, where each object sits, what it
//! looks like, and which lights shine on it. [`SceneDescription`] is that
//! data in a form that round-trips through JSON; [`RenderList::build`] turns
//! it into generated geometry plus one [`RenderItem`] per object, ready for
//! the render driver.
//!
//! ## One Buffer per Mesh Kind
//!
//! Objects never own geometry. Every object names a [`MeshKind`], the scene's
//! [`Resolution`] block says how finely each kind is tessellated, and the
//! render list generates each kind once, in order of first use. Twelve desk
//! legs share one cylinder buffer and differ only in their model matrix.
//!
//! ## Lifecycle
//!
//! ```text
//!  SceneDescription ──build──▶ RenderList { meshes, items, lighting }
//!   (JSON or desk())             built once at startup, never mutated
//!                                      │
//!                                      ▼
//!                              MeshStore::upload_all (gpu feature)
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::geometry::shapes::{
    DEFAULT_CYLINDER_SEGMENTS, DEFAULT_PLANE_DIMENSION, DEFAULT_SPHERE_TESSELLATION,
};
use crate::geometry::{GeometryBuffer, Shape};
use crate::math::{Mat4, Transform, TransformDesc};

// ── Description types ───────────────────────────────────────────────────

/// Which generated mesh an object uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshKind {
    Plane,
    Sphere,
    Cube,
    Cylinder,
}

/// Tessellation settings shared by every object of a mesh kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resolution {
    pub plane_dimension: u32,
    pub sphere_tessellation: u32,
    pub cylinder_segments: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            plane_dimension: DEFAULT_PLANE_DIMENSION,
            sphere_tessellation: DEFAULT_SPHERE_TESSELLATION,
            cylinder_segments: DEFAULT_CYLINDER_SEGMENTS,
        }
    }
}

impl Resolution {
    /// The concrete shape (kind + resolution) for a mesh kind.
    pub fn shape(&self, kind: MeshKind) -> Shape {
        match kind {
            MeshKind::Plane => Shape::Plane { dimension: self.plane_dimension },
            MeshKind::Sphere => Shape::Sphere { tessellation: self.sphere_tessellation },
            MeshKind::Cube => Shape::Cube,
            MeshKind::Cylinder => Shape::Cylinder { segments: self.cylinder_segments },
        }
    }
}

/// Surface appearance. Textures are referenced by name only; decoding them is
/// the render driver's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub texture: Option<String>,
    /// Linear RGB multiplied with the texture sample.
    pub tint: [f32; 3],
    /// Specular exponent.
    pub shininess: f32,
    /// Drawn unlit (lamps).
    pub emissive: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            texture: None,
            tint: [1.0, 1.0, 1.0],
            shininess: 32.0,
            emissive: false,
        }
    }
}

impl Material {
    pub fn textured(name: &str) -> Self {
        Self {
            texture: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn emissive(tint: [f32; 3]) -> Self {
        Self {
            tint,
            emissive: true,
            ..Self::default()
        }
    }
}

/// One placed object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub mesh: MeshKind,
    #[serde(default)]
    pub transform: TransformDesc,
    #[serde(default)]
    pub material: Material,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, mesh: MeshKind, transform: TransformDesc, material: Material) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform,
            material,
        }
    }
}

/// Phong light colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightColors {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

/// Parallel light from infinitely far away.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// Direction the light shines toward.
    pub direction: [f32; 3],
    #[serde(flatten)]
    pub colors: LightColors,
}

/// Positional light with `1 / (constant + linear·d + quadratic·d²)` falloff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: [f32; 3],
    #[serde(flatten)]
    pub colors: LightColors,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl PointLight {
    /// Falloff factor at distance `d`. The lighting itself runs in the
    /// shader; this is what its parameters mean.
    pub fn attenuation(&self, d: f32) -> f32 {
        1.0 / (self.constant + self.linear * d + self.quadratic * d * d)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Lighting {
    pub directional: Option<DirectionalLight>,
    pub point_lights: Vec<PointLight>,
}

/// Everything needed to build a static scene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub resolution: Resolution,
    pub objects: Vec<SceneObject>,
    pub lighting: Lighting,
}

impl SceneDescription {
    /// Parse a scene from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scene JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let scene = Self::from_json_str(&json)?;
        log::info!("loaded scene '{}' ({} objects)", path.display(), scene.objects.len());
        Ok(scene)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The built-in desk scene: a desk top on twelve leg segments, two
    /// containers, two cups, a ball, a black mat, a floor and four ceiling
    /// lamps lighting it all.
    pub fn desk() -> Self {
        let mut objects = Vec::new();

        objects.push(SceneObject::new(
            "floor",
            MeshKind::Plane,
            TransformDesc::at(-3.4, -3.9, -2.2).scaled(14.0, 1.0, 14.0),
            Material::textured("360.jpg"),
        ));
        objects.push(SceneObject::new(
            "desk_top",
            MeshKind::Cube,
            TransformDesc::at(-3.4, -0.25, -2.15).scaled(9.9, 0.1, 10.1),
            Material::textured("A_black_image.jpg"),
        ));
        objects.push(SceneObject::new(
            "mat",
            MeshKind::Plane,
            TransformDesc::at(-3.0, -0.19, -2.0).scaled(0.56, 1.0, 0.56),
            Material::textured("A_black_image.jpg"),
        ));

        for (i, [x, y, z]) in [[-2.2, -0.2, 0.0], [-5.2, 0.0, -0.4]].into_iter().enumerate() {
            // Container footprint: 1.5 wide, 0.3 tall, 2.0 deep.
            objects.push(SceneObject::new(
                format!("container_{i}"),
                MeshKind::Cube,
                TransformDesc::at(x + 1.25, y + 0.15, z - 1.0).scaled(1.5, 0.3, 2.0),
                Material::textured("lightblue2.jpg"),
            ));
        }

        objects.push(SceneObject::new(
            "cup",
            MeshKind::Cylinder,
            TransformDesc::at(-0.95, 0.89, -1.0).scaled(1.5, 2.25, 1.5),
            Material::textured("wall.jpg"),
        ));
        objects.push(SceneObject::new(
            "tipped_cup",
            MeshKind::Cylinder,
            TransformDesc {
                translation: [-3.95, 0.65, -2.7],
                rotation_axis: [-3.95, 0.75, -2.7],
                rotation_degrees: -50.0,
                scale: [0.9, 1.35, 0.9],
            },
            Material::textured("Red_rectangle.svg.png"),
        ));

        let leg_columns = [[-8.0, 2.7], [1.1, 2.7], [1.3, -7.0], [-8.0, -7.0]];
        for (column, [x, z]) in leg_columns.into_iter().enumerate() {
            for (segment, y) in [-0.65, -1.95, -3.35].into_iter().enumerate() {
                objects.push(SceneObject::new(
                    format!("leg_{column}_{segment}"),
                    MeshKind::Cylinder,
                    TransformDesc::at(x, y, z).scaled(0.9, 1.35, 0.9),
                    Material::textured("A_black_image.jpg"),
                ));
            }
        }

        objects.push(SceneObject::new(
            "ball",
            MeshKind::Sphere,
            TransformDesc::at(-6.7, 0.8, -1.7).scaled(0.7, 0.7, 0.7),
            Material::textured("Color-Green.jpg"),
        ));

        let lamp_positions = [[0.0, 5.0, -0.3], [-3.0, 5.0, -0.3], [-6.0, 5.0, -0.3], [-9.0, 5.0, -0.3]];
        let mut point_lights = Vec::new();
        for (i, [x, y, z]) in lamp_positions.into_iter().enumerate() {
            objects.push(SceneObject::new(
                format!("lamp_{i}"),
                MeshKind::Cube,
                TransformDesc::at(x, y, z).scaled(0.5, 0.5, 0.5),
                Material::emissive([1.0, 1.0, 1.0]),
            ));
            point_lights.push(PointLight {
                position: [x, y, z],
                colors: LightColors {
                    ambient: [0.05; 3],
                    diffuse: [0.8; 3],
                    specular: [1.0; 3],
                },
                constant: 1.0,
                linear: 0.09,
                quadratic: 0.032,
            });
        }

        Self {
            resolution: Resolution {
                plane_dimension: 20,
                ..Resolution::default()
            },
            objects,
            lighting: Lighting {
                directional: Some(DirectionalLight {
                    direction: [-5.2, -0.2, 0.0],
                    colors: LightColors {
                        ambient: [0.05; 3],
                        diffuse: [0.4; 3],
                        specular: [0.5; 3],
                    },
                }),
                point_lights,
            },
        }
    }
}

// ── Render list ─────────────────────────────────────────────────────────

/// Index into [`RenderList::meshes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshId(pub usize);

/// A generated mesh and the shape it was generated from.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneMesh {
    pub shape: Shape,
    pub geometry: GeometryBuffer,
}

/// One draw: which mesh, where, and how it looks.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub name: String,
    pub mesh: MeshId,
    pub model: Mat4,
    pub normal_matrix: Mat4,
    pub material: Material,
}

/// The built scene: shared meshes, per-object draws, and lights.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderList {
    meshes: Vec<SceneMesh>,
    items: Vec<RenderItem>,
    lighting: Lighting,
}

impl RenderList {
    /// Generate every mesh the scene uses (once per kind) and resolve each
    /// object's transform. Fails on the first mesh whose resolution is out of
    /// range; nothing partial is returned.
    pub fn build(scene: &SceneDescription) -> Result<Self, SceneError> {
        let mut meshes: Vec<SceneMesh> = Vec::new();
        let mut ids: HashMap<MeshKind, MeshId> = HashMap::new();
        let mut items = Vec::with_capacity(scene.objects.len());

        for object in &scene.objects {
            let mesh = match ids.get(&object.mesh) {
                Some(&id) => id,
                None => {
                    let shape = scene.resolution.shape(object.mesh);
                    let geometry = shape.generate()?;
                    let id = MeshId(meshes.len());
                    meshes.push(SceneMesh { shape, geometry });
                    ids.insert(object.mesh, id);
                    id
                }
            };

            let transform = Transform::from(object.transform);
            items.push(RenderItem {
                name: object.name.clone(),
                mesh,
                model: transform.matrix(),
                normal_matrix: transform.normal_matrix(),
                material: object.material.clone(),
            });
        }

        if items.is_empty() {
            log::warn!("scene has no objects; render list is empty");
        }
        log::info!(
            "built render list: {} meshes, {} items, {} point lights",
            meshes.len(),
            items.len(),
            scene.lighting.point_lights.len()
        );

        Ok(Self {
            meshes,
            items,
            lighting: scene.lighting.clone(),
        })
    }

    pub fn meshes(&self) -> &[SceneMesh] {
        &self.meshes
    }

    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn mesh(&self, id: MeshId) -> Option<&SceneMesh> {
        self.meshes.get(id.0)
    }

    /// Items drawn with the given mesh, in scene order.
    pub fn items_using(&self, id: MeshId) -> impl Iterator<Item = &RenderItem> + '_ {
        self.items.iter().filter(move |item| item.mesh == id)
    }
}
