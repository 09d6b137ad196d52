//! Rendering, lighting and debug overlay systems driving recording backends

use reify_engine::prelude::*;
use reify_engine::render::{BackendResult, RenderError};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Begin,
    Draw(TextureHandle, Vec2),
    End,
    Lights(usize),
    Outline(DebugOutline, i32),
    Resize(f32, f32),
    Release,
}

type CallLog = Rc<RefCell<Vec<Call>>>;

struct RecordingRenderer {
    calls: CallLog,
    fail_release: bool,
}

impl RenderBackend for RecordingRenderer {
    fn begin(&mut self, _camera: &Camera2D) -> BackendResult<()> {
        self.calls.borrow_mut().push(Call::Begin);
        Ok(())
    }

    fn draw(&mut self, request: &DrawRequest) -> BackendResult<()> {
        self.calls.borrow_mut().push(Call::Draw(request.texture, request.position));
        Ok(())
    }

    fn end(&mut self) -> BackendResult<()> {
        self.calls.borrow_mut().push(Call::End);
        Ok(())
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.calls.borrow_mut().push(Call::Resize(width, height));
    }

    fn release(&mut self) -> BackendResult<()> {
        self.calls.borrow_mut().push(Call::Release);
        if self.fail_release {
            Err(RenderError::ReleaseFailed("device lost".into()))
        } else {
            Ok(())
        }
    }
}

struct RecordingLights {
    calls: CallLog,
}

impl LightingBackend for RecordingLights {
    fn render(&mut self, _camera: &Camera2D, lights: &[ActiveLight]) -> BackendResult<()> {
        self.calls.borrow_mut().push(Call::Lights(lights.len()));
        Ok(())
    }

    fn release(&mut self) -> BackendResult<()> {
        self.calls.borrow_mut().push(Call::Release);
        Ok(())
    }
}

struct RecordingOutlines {
    calls: CallLog,
}

impl DebugDrawBackend for RecordingOutlines {
    fn begin(&mut self, _camera: &Camera2D) -> BackendResult<()> {
        self.calls.borrow_mut().push(Call::Begin);
        Ok(())
    }

    fn outline(&mut self, request: &DebugDrawRequest) -> BackendResult<()> {
        self.calls.borrow_mut().push(Call::Outline(request.outline.clone(), request.depth));
        Ok(())
    }

    fn end(&mut self) -> BackendResult<()> {
        self.calls.borrow_mut().push(Call::End);
        Ok(())
    }

    fn release(&mut self) -> BackendResult<()> {
        self.calls.borrow_mut().push(Call::Release);
        Ok(())
    }
}

fn sprite(scene: &mut Scene, texture: u32, position: Vec2, depth: i32) -> Entity {
    let entity = scene.create_entity("sprite");
    scene.add_component(&entity, TransformComponent::new(position, 10.0, 10.0));
    scene.add_component(&entity, RenderComponent::new(TextureHandle(texture)).with_depth(depth));
    entity
}

#[test]
fn draws_visible_sprites_in_depth_order() {
    let calls = CallLog::default();
    let mut scene = Scene::new("render");
    scene.add_system(RenderingSystem::new(
        RecordingRenderer { calls: Rc::clone(&calls), fail_release: false },
        Camera2D::new(100.0, 100.0),
    ));

    sprite(&mut scene, 1, Vec2::new(10.0, 10.0), 5);
    sprite(&mut scene, 2, Vec2::new(20.0, 20.0), -1);
    sprite(&mut scene, 3, Vec2::new(500.0, 500.0), 0);
    let hidden = sprite(&mut scene, 4, Vec2::new(30.0, 30.0), 0);
    scene.get_component_mut::<RenderComponent>(&hidden).unwrap().visible = false;
    let offset = sprite(&mut scene, 5, Vec2::new(40.0, 40.0), 5);
    scene.get_component_mut::<RenderComponent>(&offset).unwrap().sprite_offset = Vec2::new(1.0, 2.0);

    scene.update(0.0).unwrap();

    assert_eq!(
        *calls.borrow(),
        vec![
            Call::Begin,
            Call::Draw(TextureHandle(2), Vec2::new(20.0, 20.0)),
            Call::Draw(TextureHandle(1), Vec2::new(10.0, 10.0)),
            Call::Draw(TextureHandle(5), Vec2::new(41.0, 42.0)),
            Call::End,
        ]
    );
}

#[test]
fn resize_reaches_camera_and_backend() {
    let calls = CallLog::default();
    let mut scene = Scene::new("render");
    scene.add_system(RenderingSystem::new(
        RecordingRenderer { calls: Rc::clone(&calls), fail_release: false },
        Camera2D::new(100.0, 100.0),
    ));

    scene.resize(320.0, 200.0);
    assert_eq!(*calls.borrow(), vec![Call::Resize(320.0, 200.0)]);

    let system = scene.get_system::<RenderingSystem<RecordingRenderer>>().unwrap();
    assert_eq!(system.camera().viewport_width, 320.0);
    assert_eq!(system.camera().viewport_height, 200.0);
}

#[test]
fn only_enabled_lights_are_submitted() {
    let calls = CallLog::default();
    let mut scene = Scene::new("lights");
    scene.add_system(LightingSystem::new(
        RecordingLights { calls: Rc::clone(&calls) },
        Camera2D::new(100.0, 100.0),
    ));

    let lamp = scene.create_entity("lamp");
    scene.add_component(&lamp, TransformComponent::new(Vec2::new(0.0, 0.0), 10.0, 10.0));
    scene.add_component(&lamp, LightComponent::new(50.0));
    let off = scene.create_entity("lamp");
    scene.add_component(&off, TransformComponent::new(Vec2::new(0.0, 0.0), 10.0, 10.0));
    scene.add_component(&off, LightComponent::new(50.0));
    scene.get_component_mut::<LightComponent>(&off).unwrap().enabled = false;

    scene.update(0.0).unwrap();
    assert_eq!(*calls.borrow(), vec![Call::Lights(1)]);

    let system = scene.get_system::<LightingSystem<RecordingLights>>().unwrap();
    assert_eq!(system.active_lights()[0].position, Vec2::new(5.0, 5.0));
}

#[test]
fn dispose_releases_each_backend_once_and_reports_failure() {
    let calls = CallLog::default();
    let mut scene = Scene::new("dispose");
    scene.add_system(RenderingSystem::new(
        RecordingRenderer { calls: Rc::clone(&calls), fail_release: true },
        Camera2D::new(100.0, 100.0),
    ));
    scene.add_system(LightingSystem::new(
        RecordingLights { calls: Rc::clone(&calls) },
        Camera2D::new(100.0, 100.0),
    ));

    assert!(matches!(
        scene.dispose(),
        Err(SceneError::System(SystemError::ResourceRelease { system: "RenderingSystem", .. }))
    ));
    assert!(scene.dispose().is_ok());
    assert_eq!(*calls.borrow(), vec![Call::Release, Call::Release]);
}

#[test]
fn debug_overlay_outlines_resolved_hitboxes_in_depth_order() {
    let calls = CallLog::default();
    let mut scene = Scene::new("debug");
    scene.add_system(CollisionSystem::with_size(100.0, 100.0).unwrap());
    scene.add_system(DebugRenderingSystem::new(
        RecordingOutlines { calls: Rc::clone(&calls) },
        Camera2D::new(100.0, 100.0),
    ));

    let ball = scene.create_entity("ball");
    scene.add_component(&ball, TransformComponent::new(Vec2::new(10.0, 10.0), 20.0, 20.0));
    scene.add_component(&ball, HitboxComponent::new(CollisionShape::circle(10.0)));
    scene.add_component(&ball, DebugRenderComponent::default().with_depth(2));

    let spike = scene.create_entity("spike");
    scene.add_component(&spike, TransformComponent::new(Vec2::new(40.0, 40.0), 20.0, 20.0));
    scene.add_component(
        &spike,
        HitboxComponent::new(CollisionShape::polygon(vec![
            Vec2::new(-10.0, -10.0),
            Vec2::new(10.0, -10.0),
            Vec2::new(0.0, 10.0),
        ])),
    );
    scene.add_component(&spike, DebugRenderComponent::default().with_depth(1));

    // No hitbox: falls back to the transform rectangle
    let crate_box = scene.create_entity("crate");
    scene.add_component(&crate_box, TransformComponent::new(Vec2::new(70.0, 70.0), 10.0, 10.0));
    scene.add_component(&crate_box, DebugRenderComponent::default().with_depth(-1));

    let far = scene.create_entity("far");
    scene.add_component(&far, TransformComponent::new(Vec2::new(500.0, 500.0), 10.0, 10.0));
    scene.add_component(&far, DebugRenderComponent::new(DebugShape::Circle));

    scene.update(0.035).unwrap();

    assert_eq!(
        *calls.borrow(),
        vec![
            Call::Begin,
            Call::Outline(DebugOutline::Rect(Rect::new(70.0, 70.0, 10.0, 10.0)), -1),
            Call::Outline(
                DebugOutline::Polygon(vec![
                    Vec2::new(40.0, 40.0),
                    Vec2::new(60.0, 40.0),
                    Vec2::new(50.0, 60.0),
                ]),
                1
            ),
            Call::Outline(
                DebugOutline::Circle {
                    center: Vec2::new(20.0, 20.0),
                    radius: 10.0
                },
                2
            ),
            Call::End,
        ]
    );
    let system = scene.get_system::<DebugRenderingSystem<RecordingOutlines>>().unwrap();
    assert_eq!(system.last_frame().len(), 3);
    assert_eq!(system.last_frame()[0].color, DebugRenderComponent::DEFAULT_COLOR);
}

#[test]
fn debug_overlay_stops_drawing_after_dispose() {
    let calls = CallLog::default();
    let mut scene = Scene::new("debug");
    scene.add_system(DebugRenderingSystem::new(
        RecordingOutlines { calls: Rc::clone(&calls) },
        Camera2D::new(100.0, 100.0),
    ));
    let marker = scene.create_entity("marker");
    scene.add_component(&marker, TransformComponent::new(Vec2::new(0.0, 0.0), 10.0, 10.0));
    scene.add_component(&marker, DebugRenderComponent::new(DebugShape::Rect));

    assert!(scene.dispose().is_ok());
    assert!(scene.dispose().is_ok());
    assert_eq!(*calls.borrow(), vec![Call::Release]);
}
