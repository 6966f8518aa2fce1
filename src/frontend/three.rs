//! Thin bindings over the `THREE` global and the stage that turns a
//! [`MascotBlueprint`] into live scene objects.

use std::collections::HashMap;

use js_sys::{Array, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlScriptElement};

use super::dom::document;
use crate::content::THREE_SCRIPT_URL;
use crate::mascot::scene::{
    ChestFace, LightKind, MascotBlueprint, NodeId, Shape, Surface, Transform,
};
use crate::mascot::MascotPose;

const CHEST_TEXTURE_WIDTH: u32 = 256;
const CHEST_TEXTURE_HEIGHT: u32 = 192;
const FALLBACK_CANVAS_SIZE: f64 = 480.0;

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    #[derive(Clone, Debug)]
    type Object3D;

    #[wasm_bindgen(method, getter)]
    fn position(this: &Object3D) -> Vector3;

    #[wasm_bindgen(method, getter)]
    fn rotation(this: &Object3D) -> Euler;

    #[wasm_bindgen(method, getter)]
    fn scale(this: &Object3D) -> Vector3;

    #[wasm_bindgen(method, setter)]
    fn set_name(this: &Object3D, name: &str);

    #[wasm_bindgen(method)]
    fn add(this: &Object3D, child: &Object3D);

    #[wasm_bindgen(method, js_name = lookAt)]
    fn look_at(this: &Object3D, x: f64, y: f64, z: f64);

    #[derive(Clone, Debug)]
    type Vector3;

    #[wasm_bindgen(method)]
    fn set(this: &Vector3, x: f64, y: f64, z: f64);

    #[wasm_bindgen(method, setter = y)]
    fn set_y(this: &Vector3, value: f64);

    #[derive(Clone, Debug)]
    type Euler;

    #[wasm_bindgen(method, js_name = set)]
    fn set_xyz(this: &Euler, x: f64, y: f64, z: f64);

    #[wasm_bindgen(method, setter = x)]
    fn set_x(this: &Euler, value: f64);

    #[wasm_bindgen(method, setter = y)]
    fn set_y(this: &Euler, value: f64);

    #[wasm_bindgen(method, setter = z)]
    fn set_z(this: &Euler, value: f64);

    #[derive(Clone, Debug)]
    type Vector2;

    #[wasm_bindgen(constructor, catch)]
    fn new(x: f64, y: f64) -> Result<Vector2, JsValue>;

    #[wasm_bindgen(extends = Object3D)]
    #[derive(Clone, Debug)]
    type Scene;

    #[wasm_bindgen(constructor, catch)]
    fn new() -> Result<Scene, JsValue>;

    #[wasm_bindgen(extends = Object3D)]
    #[derive(Clone, Debug)]
    type Group;

    #[wasm_bindgen(constructor, catch)]
    fn new() -> Result<Group, JsValue>;

    #[wasm_bindgen(extends = Object3D)]
    #[derive(Clone, Debug)]
    type PerspectiveCamera;

    #[wasm_bindgen(constructor, catch)]
    fn new(fov: f64, aspect: f64, near: f64, far: f64) -> Result<PerspectiveCamera, JsValue>;

    #[wasm_bindgen(method, setter)]
    fn set_aspect(this: &PerspectiveCamera, aspect: f64);

    #[wasm_bindgen(method, js_name = updateProjectionMatrix)]
    fn update_projection_matrix(this: &PerspectiveCamera);

    #[wasm_bindgen(js_name = WebGLRenderer)]
    #[derive(Clone, Debug)]
    type WebGlRenderer;

    #[wasm_bindgen(constructor, catch, js_class = "WebGLRenderer")]
    fn new(parameters: &Object) -> Result<WebGlRenderer, JsValue>;

    #[wasm_bindgen(method, js_class = "WebGLRenderer", js_name = setPixelRatio)]
    fn set_pixel_ratio(this: &WebGlRenderer, ratio: f64);

    #[wasm_bindgen(method, js_class = "WebGLRenderer", js_name = setSize)]
    fn set_size(this: &WebGlRenderer, width: f64, height: f64, update_style: bool);

    #[wasm_bindgen(method, js_class = "WebGLRenderer")]
    fn render(this: &WebGlRenderer, scene: &Scene, camera: &PerspectiveCamera);

    #[wasm_bindgen(method, js_class = "WebGLRenderer")]
    fn dispose(this: &WebGlRenderer);

    #[derive(Clone, Debug)]
    type BufferGeometry;

    #[wasm_bindgen(method)]
    fn dispose(this: &BufferGeometry);

    #[wasm_bindgen(extends = BufferGeometry)]
    #[derive(Clone, Debug)]
    type BoxGeometry;

    #[wasm_bindgen(constructor, catch)]
    fn new(width: f64, height: f64, depth: f64) -> Result<BoxGeometry, JsValue>;

    #[wasm_bindgen(extends = BufferGeometry)]
    #[derive(Clone, Debug)]
    type SphereGeometry;

    #[wasm_bindgen(constructor, catch)]
    fn new(radius: f64, width_segments: u32, height_segments: u32)
        -> Result<SphereGeometry, JsValue>;

    #[wasm_bindgen(extends = BufferGeometry)]
    #[derive(Clone, Debug)]
    type CapsuleGeometry;

    #[wasm_bindgen(constructor, catch)]
    fn new(
        radius: f64,
        length: f64,
        cap_segments: u32,
        radial_segments: u32,
    ) -> Result<CapsuleGeometry, JsValue>;

    #[wasm_bindgen(extends = BufferGeometry)]
    #[derive(Clone, Debug)]
    type CylinderGeometry;

    #[wasm_bindgen(constructor, catch)]
    fn new(
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        radial_segments: u32,
    ) -> Result<CylinderGeometry, JsValue>;

    #[wasm_bindgen(extends = BufferGeometry)]
    #[derive(Clone, Debug)]
    type TorusGeometry;

    #[wasm_bindgen(constructor, catch)]
    fn new(
        radius: f64,
        tube: f64,
        radial_segments: u32,
        tubular_segments: u32,
    ) -> Result<TorusGeometry, JsValue>;

    #[wasm_bindgen(extends = BufferGeometry)]
    #[derive(Clone, Debug)]
    type PlaneGeometry;

    #[wasm_bindgen(constructor, catch)]
    fn new(width: f64, height: f64) -> Result<PlaneGeometry, JsValue>;

    #[derive(Clone, Debug)]
    type Texture;

    #[wasm_bindgen(method)]
    fn dispose(this: &Texture);

    #[wasm_bindgen(extends = Texture)]
    #[derive(Clone, Debug)]
    type CanvasTexture;

    #[wasm_bindgen(constructor, catch)]
    fn new(canvas: &HtmlCanvasElement) -> Result<CanvasTexture, JsValue>;

    #[derive(Clone, Debug)]
    type MeshStandardMaterial;

    #[wasm_bindgen(constructor, catch)]
    fn new(parameters: &Object) -> Result<MeshStandardMaterial, JsValue>;

    #[wasm_bindgen(method, setter)]
    fn set_map(this: &MeshStandardMaterial, texture: &Texture);

    #[wasm_bindgen(method, setter = emissiveMap)]
    fn set_emissive_map(this: &MeshStandardMaterial, texture: &Texture);

    #[wasm_bindgen(method, setter = emissiveIntensity)]
    fn set_emissive_intensity(this: &MeshStandardMaterial, intensity: f64);

    #[wasm_bindgen(method, setter = needsUpdate)]
    fn set_needs_update(this: &MeshStandardMaterial, value: bool);

    #[wasm_bindgen(method)]
    fn dispose(this: &MeshStandardMaterial);

    #[wasm_bindgen(extends = Object3D)]
    #[derive(Clone, Debug)]
    type Mesh;

    #[wasm_bindgen(constructor, catch)]
    fn new(geometry: &BufferGeometry, material: &MeshStandardMaterial) -> Result<Mesh, JsValue>;

    #[wasm_bindgen(extends = Object3D)]
    #[derive(Clone, Debug)]
    type AmbientLight;

    #[wasm_bindgen(constructor, catch)]
    fn new(color: u32, intensity: f64) -> Result<AmbientLight, JsValue>;

    #[wasm_bindgen(extends = Object3D)]
    #[derive(Clone, Debug)]
    type DirectionalLight;

    #[wasm_bindgen(constructor, catch)]
    fn new(color: u32, intensity: f64) -> Result<DirectionalLight, JsValue>;

    #[wasm_bindgen(extends = Object3D)]
    #[derive(Clone, Debug)]
    type PointLight;

    #[wasm_bindgen(constructor, catch)]
    fn new(color: u32, intensity: f64, distance: f64) -> Result<PointLight, JsValue>;

    #[derive(Clone, Debug)]
    type Raycaster;

    #[wasm_bindgen(constructor, catch)]
    fn new() -> Result<Raycaster, JsValue>;

    #[wasm_bindgen(method, js_name = setFromCamera)]
    fn set_from_camera(this: &Raycaster, coords: &Vector2, camera: &PerspectiveCamera);

    #[wasm_bindgen(method, js_name = intersectObject)]
    fn intersect_object(this: &Raycaster, object: &Object3D, recursive: bool) -> Array;
}

fn three_available() -> bool {
    Reflect::get(&js_sys::global(), &JsValue::from_str("THREE"))
        .map(|value| value.is_object())
        .unwrap_or(false)
}

/// Injects the three.js script tag once and resolves when the global is usable.
pub(crate) async fn load_three() -> Result<(), JsValue> {
    if three_available() {
        return Ok(());
    }

    let document = document().ok_or("document unavailable")?;
    let script: HtmlScriptElement = document.create_element("script")?.dyn_into()?;
    script.set_src(THREE_SCRIPT_URL);
    script.set_async(true);

    let loaded = Promise::new(&mut |resolve, reject| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });
    document
        .head()
        .ok_or("document has no <head>")?
        .append_child(&script)?;
    JsFuture::from(loaded).await?;

    if three_available() {
        Ok(())
    } else {
        Err("THREE global missing after script load".into())
    }
}

fn set_param(target: &Object, key: &str, value: impl Into<JsValue>) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), &value.into()).map(|_| ())
}

fn renderer_parameters(canvas: &HtmlCanvasElement) -> Result<Object, JsValue> {
    let parameters = Object::new();
    set_param(&parameters, "canvas", canvas.clone())?;
    set_param(&parameters, "antialias", true)?;
    set_param(&parameters, "alpha", true)?;
    set_param(&parameters, "powerPreference", "low-power")?;
    Ok(parameters)
}

fn material(surface: Surface, texture: Option<&CanvasTexture>) -> Result<MeshStandardMaterial, JsValue> {
    let spec = surface.spec();
    let parameters = Object::new();
    set_param(&parameters, "color", spec.color)?;
    set_param(&parameters, "metalness", spec.metalness)?;
    set_param(&parameters, "roughness", spec.roughness)?;
    set_param(&parameters, "emissive", spec.emissive)?;
    set_param(&parameters, "emissiveIntensity", spec.emissive_intensity)?;
    if let Some(texture) = texture {
        set_param(&parameters, "map", texture.clone())?;
        set_param(&parameters, "emissiveMap", texture.clone())?;
    }
    MeshStandardMaterial::new(&parameters)
}

fn geometry(shape: Shape) -> Result<Option<BufferGeometry>, JsValue> {
    let geometry: BufferGeometry = match shape {
        Shape::Group => return Ok(None),
        Shape::Box {
            width,
            height,
            depth,
        } => BoxGeometry::new(width, height, depth)?.into(),
        Shape::Sphere { radius } => SphereGeometry::new(radius, 32, 24)?.into(),
        Shape::Capsule { radius, length } => CapsuleGeometry::new(radius, length, 8, 20)?.into(),
        Shape::Cylinder {
            top,
            bottom,
            height,
        } => CylinderGeometry::new(top, bottom, height, 20)?.into(),
        Shape::Torus { radius, tube } => TorusGeometry::new(radius, tube, 12, 64)?.into(),
        Shape::Plane { width, height } => PlaneGeometry::new(width, height)?.into(),
    };
    Ok(Some(geometry))
}

fn apply_transform(object: &Object3D, transform: &Transform) {
    let [x, y, z] = transform.position;
    object.position().set(x, y, z);
    let [x, y, z] = transform.rotation;
    object.rotation().set_xyz(x, y, z);
    let [x, y, z] = transform.scale;
    object.scale().set(x, y, z);
}

fn chest_texture(face: ChestFace) -> Result<CanvasTexture, JsValue> {
    let document = document().ok_or("document unavailable")?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(CHEST_TEXTURE_WIDTH);
    canvas.set_height(CHEST_TEXTURE_HEIGHT);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or("2d context unavailable")?
        .dyn_into()?;
    let width = f64::from(CHEST_TEXTURE_WIDTH);
    let height = f64::from(CHEST_TEXTURE_HEIGHT);

    let (top, bottom) = face.background();
    let gradient = context.create_linear_gradient(0.0, 0.0, 0.0, height);
    gradient.add_color_stop(0.0, top)?;
    gradient.add_color_stop(1.0, bottom)?;
    context.set_fill_style_canvas_gradient(&gradient);
    context.fill_rect(0.0, 0.0, width, height);

    context.set_stroke_style_str(face.ink());
    context.set_global_alpha(0.18);
    context.set_line_width(2.0);
    let mut x = 16.0;
    while x < width {
        context.begin_path();
        context.move_to(x, 0.0);
        context.line_to(x, height);
        context.stroke();
        x += 32.0;
    }
    context.set_global_alpha(1.0);

    let font = match face {
        ChestFace::Pattern => "bold 72px ui-monospace, monospace",
        ChestFace::Heart | ChestFace::Flower => "bold 112px system-ui, sans-serif",
    };
    context.set_font(font);
    context.set_text_align("center");
    context.set_text_baseline("middle");
    context.set_fill_style_str(face.ink());
    context.fill_text(face.glyph(), width / 2.0, height / 2.0 + 6.0)?;

    CanvasTexture::new(&canvas)
}

fn canvas_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
    let width = f64::from(canvas.client_width());
    let height = f64::from(canvas.client_height());
    if width <= 0.0 || height <= 0.0 {
        (FALLBACK_CANVAS_SIZE, FALLBACK_CANVAS_SIZE)
    } else {
        (width, height)
    }
}

pub(crate) struct MascotStage {
    renderer: WebGlRenderer,
    scene: Scene,
    camera: PerspectiveCamera,
    raycaster: Raycaster,
    root: Object3D,
    head: Object3D,
    chest_panel: Object3D,
    right_shoulder: Object3D,
    right_elbow: Object3D,
    halo: Object3D,
    orbit_ring: Object3D,
    chest_material: MeshStandardMaterial,
    chest_textures: Vec<(ChestFace, CanvasTexture)>,
    shown_face: ChestFace,
    geometries: Vec<BufferGeometry>,
    materials: Vec<MeshStandardMaterial>,
}

impl MascotStage {
    pub(crate) fn build(
        canvas: &HtmlCanvasElement,
        blueprint: &MascotBlueprint,
        pixel_ratio: f64,
    ) -> Result<Self, JsValue> {
        let renderer = WebGlRenderer::new(&renderer_parameters(canvas)?)?;
        renderer.set_pixel_ratio(pixel_ratio);
        let (width, height) = canvas_size(canvas);
        renderer.set_size(width, height, false);

        let scene = Scene::new()?;
        let spec = blueprint.camera();
        let camera = PerspectiveCamera::new(spec.fov_deg, width / height, spec.near, spec.far)?;
        let [x, y, z] = spec.position;
        camera.position().set(x, y, z);
        let [x, y, z] = spec.target;
        camera.look_at(x, y, z);

        let chest_textures = ChestFace::ALL
            .iter()
            .map(|face| Ok((*face, chest_texture(*face)?)))
            .collect::<Result<Vec<_>, JsValue>>()?;
        let pattern = chest_textures
            .iter()
            .find(|(face, _)| *face == ChestFace::Pattern)
            .map(|(_, texture)| texture);

        let mut by_surface = HashMap::new();
        for surface in Surface::ALL {
            let texture = if surface == Surface::Panel { pattern } else { None };
            by_surface.insert(surface, material(surface, texture)?);
        }
        let chest_material = by_surface
            .get(&Surface::Panel)
            .cloned()
            .ok_or("panel material missing")?;

        let mut geometries = Vec::new();
        let mut objects: Vec<Object3D> = Vec::with_capacity(blueprint.nodes().len());
        for node in blueprint.nodes() {
            let object: Object3D = match geometry(node.shape)? {
                None => Group::new()?.into(),
                Some(geometry) => {
                    let surface = node.surface.unwrap_or(Surface::Shell);
                    let material = by_surface.get(&surface).ok_or("surface material missing")?;
                    let mesh = Mesh::new(&geometry, material)?;
                    geometries.push(geometry);
                    mesh.into()
                }
            };
            object.set_name(node.name);
            apply_transform(&object, &node.transform);

            match node.parent.and_then(|parent| objects.get(parent.index())) {
                Some(parent) => parent.add(&object),
                None => scene.add(&object),
            }
            objects.push(object);
        }

        for light in blueprint.lights() {
            let object: Object3D = match light.kind {
                LightKind::Ambient => AmbientLight::new(light.color, light.intensity)?.into(),
                LightKind::Directional => {
                    DirectionalLight::new(light.color, light.intensity)?.into()
                }
                LightKind::Point { distance } => {
                    PointLight::new(light.color, light.intensity, distance)?.into()
                }
            };
            let [x, y, z] = light.position;
            object.position().set(x, y, z);
            scene.add(&object);
        }

        let parts = blueprint.parts();
        let part = |id: NodeId| -> Result<Object3D, JsValue> {
            objects
                .get(id.index())
                .cloned()
                .ok_or_else(|| JsValue::from_str("mascot part missing"))
        };

        Ok(Self {
            root: part(parts.root)?,
            head: part(parts.head)?,
            chest_panel: part(parts.chest_panel)?,
            right_shoulder: part(parts.right_shoulder)?,
            right_elbow: part(parts.right_elbow)?,
            halo: part(parts.halo)?,
            orbit_ring: part(parts.orbit_ring)?,
            renderer,
            scene,
            camera,
            raycaster: Raycaster::new()?,
            chest_material,
            chest_textures,
            shown_face: ChestFace::Pattern,
            geometries,
            materials: by_surface.into_values().collect(),
        })
    }

    pub(crate) fn set_pixel_ratio(&self, ratio: f64) {
        self.renderer.set_pixel_ratio(ratio);
    }

    pub(crate) fn resize(&self, canvas: &HtmlCanvasElement) {
        let (width, height) = canvas_size(canvas);
        self.camera.set_aspect(width / height);
        self.camera.update_projection_matrix();
        self.renderer.set_size(width, height, false);
    }

    pub(crate) fn apply(&mut self, pose: &MascotPose) {
        let motion = pose.motion;
        self.root.position().set_y(motion.bob_y);
        self.root.rotation().set_xyz(motion.pitch, motion.yaw, 0.0);
        self.orbit_ring.rotation().set_z(motion.ring_spin);
        self.halo.rotation().set_z(motion.halo_spin);

        let joints = pose.joints;
        self.head.rotation().set_y(joints.head_yaw);
        let shoulder = self.right_shoulder.rotation();
        shoulder.set_x(joints.right_shoulder_x);
        shoulder.set_z(joints.right_shoulder_z);
        self.right_elbow.rotation().set_z(joints.right_elbow_z);
        self.chest_material.set_emissive_intensity(joints.chest_glow);

        if joints.chest_face != self.shown_face {
            if let Some((_, texture)) = self
                .chest_textures
                .iter()
                .find(|(face, _)| *face == joints.chest_face)
            {
                self.chest_material.set_map(texture);
                self.chest_material.set_emissive_map(texture);
                self.chest_material.set_needs_update(true);
            }
            self.shown_face = joints.chest_face;
        }
    }

    pub(crate) fn render(&self) {
        self.renderer.render(&self.scene, &self.camera);
    }

    /// True when the nearest surface under the pointer is the chest panel.
    pub(crate) fn hits_chest(&self, ndc: (f64, f64)) -> bool {
        let Ok(pointer) = Vector2::new(ndc.0, ndc.1) else {
            return false;
        };
        self.raycaster.set_from_camera(&pointer, &self.camera);

        let hits = self.raycaster.intersect_object(&self.root, true);
        let nearest = hits.get(0);
        if nearest.is_undefined() {
            return false;
        }

        Reflect::get(&nearest, &JsValue::from_str("object"))
            .map(|object| Object::is(&object, self.chest_panel.as_ref()))
            .unwrap_or(false)
    }
}

impl Drop for MascotStage {
    fn drop(&mut self) {
        for geometry in &self.geometries {
            geometry.dispose();
        }
        for material in &self.materials {
            material.dispose();
        }
        for (_, texture) in &self.chest_textures {
            texture.dispose();
        }
        self.renderer.dispose();
    }
}
