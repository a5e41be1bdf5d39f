use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Mat4;

use freelook::camera::Camera;
use freelook::config::Settings;
use freelook::math::Versor;
use freelook::motion::{self, MoveDirection};
use freelook::traits::{Button, Controller, ViewTarget};

struct AlwaysForward;

impl Controller for AlwaysForward {
    fn is_down(&self, button: Button) -> bool {
        button == Button::KeyW
    }
}

struct NullTarget;

impl ViewTarget for NullTarget {
    fn set_view_matrix(&mut self, _view: Mat4) {}

    fn projection_matrix(&self) -> Mat4 {
        Mat4::IDENTITY
    }
}

/// Benchmark: versor construction and matrix conversion
fn bench_versor_to_matrix(c: &mut Criterion) {
    c.bench_function("versor_to_matrix", |b| {
        b.iter(|| {
            let v = Versor::from_axis_angle(black_box(37.5), 0.0, 1.0, 0.0);
            black_box(v.to_mat4())
        })
    });
}

/// Benchmark: full mouse-look update (angles, versors, view composition)
fn bench_look_update(c: &mut Criterion) {
    let mut camera = Camera::default();

    c.bench_function("look_update", |b| {
        b.iter(|| {
            camera.look(black_box(3.0), black_box(-2.0));
            black_box(camera.view_matrix())
        })
    });
}

/// Benchmark: one motion-model frame with a held forward key
fn bench_motion_step(c: &mut Criterion) {
    let mut camera = Camera::default();
    camera.move_direction = Some(MoveDirection::Forward);
    let controller = AlwaysForward;
    let settings = Settings::default();
    let mut target = NullTarget;

    c.bench_function("motion_step", |b| {
        b.iter(|| {
            motion::step(&mut camera, &controller, &settings, &mut target);
            black_box(camera.position)
        })
    });
}

criterion_group!(
    benches,
    bench_versor_to_matrix,
    bench_look_update,
    bench_motion_step
);
criterion_main!(benches);
