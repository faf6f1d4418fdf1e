// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The escape-time fractal program.
//!
//! Every fragment maps to a plane point `p` through the center/scale uniforms
//! and iterates `z <- z^2 + p + c`. The orbit is seeded at its first iterate,
//! `z = p + c`, with orbit derivative `1`. Escaping points are coloured
//! by their smooth iteration count through a palette that cycles with time.
//! Points that never escape, or whose orbit derivative collapses below the
//! interior threshold, are black.
//!
//! The same program exists twice: [`FRACTAL_WGSL`] for GPU hosts and
//! [`shade`] for CPU hosts. Both read the uniforms named in [`uniform`].

use canopy_surface::{ShaderProgram, Uniforms};
use kurbo::Point;

/// Uniform names understood by the fractal program.
pub mod uniform {
    /// Seconds since the viewer started, `f32`.
    pub const TIME: &str = "u_time";
    /// Backing size in physical pixels, `vec2`.
    pub const RESOLUTION: &str = "u_resolution";
    /// Plane point at the view center, `vec2`.
    pub const CENTER: &str = "u_center";
    /// Visible plane height, `f32`.
    pub const SCALE: &str = "u_scale";
    /// Constant added at each iteration, `vec2`.
    pub const C: &str = "u_c";
    /// Iteration budget, `u32`.
    pub const ITERATIONS: &str = "u_iterations";
    /// Interior threshold on the orbit derivative, `f32`.
    pub const INTERIOR_EPSILON: &str = "u_int_eps";
    /// Escape radius, `f32`.
    pub const ESCAPE_RADIUS: &str = "escape_radius";
}

/// WGSL source of the fractal program.
///
/// Uniforms are read from a single buffer at group 0, binding 0, laid out as
/// [`FRACTAL_PARAMS_SIZE`] bytes by [`fractal_params_bytes`].
pub const FRACTAL_WGSL: &str = r"
struct Params {
    time: f32,
    scale: f32,
    int_eps: f32,
    escape_radius: f32,
    resolution: vec2<f32>,
    center: vec2<f32>,
    c: vec2<f32>,
    iterations: u32,
    _pad: u32,
};

@group(0) @binding(0) var<uniform> params: Params;

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> @builtin(position) vec4<f32> {
    // One oversized triangle covers the viewport.
    let x = f32((index << 1u) & 2u);
    let y = f32(index & 2u);
    return vec4<f32>(x * 2.0 - 1.0, 1.0 - y * 2.0, 0.0, 1.0);
}

fn palette(nu: f32) -> vec3<f32> {
    let phase = params.time * 0.05 + nu * 0.02 + vec3<f32>(0.0, 0.33, 0.67);
    return 0.5 + 0.5 * cos(6.2831853 * phase);
}

@fragment
fn fs_main(@builtin(position) frag: vec4<f32>) -> @location(0) vec4<f32> {
    let uv = frag.xy / params.resolution;
    let aspect = params.resolution.x / params.resolution.y;
    let p = params.center
        + vec2<f32>((uv.x - 0.5) * aspect * params.scale, -(uv.y - 0.5) * params.scale);
    let r2 = params.escape_radius * params.escape_radius;
    let eps2 = params.int_eps * params.int_eps;

    var z = p + params.c;
    var der = vec2<f32>(1.0, 0.0);
    for (var i = 0u; i < params.iterations; i = i + 1u) {
        der = 2.0 * vec2<f32>(z.x * der.x - z.y * der.y, z.x * der.y + z.y * der.x);
        z = vec2<f32>(z.x * z.x - z.y * z.y, 2.0 * z.x * z.y) + p + params.c;
        let m2 = dot(z, z);
        if (m2 > r2) {
            let nu = f32(i) + 1.0 - log2(0.5 * log(m2));
            return vec4<f32>(palette(nu), 1.0);
        }
        if (dot(der, der) < eps2) {
            break;
        }
    }
    return vec4<f32>(0.0, 0.0, 0.0, 1.0);
}
";

/// Size in bytes of the WGSL `Params` uniform buffer.
pub const FRACTAL_PARAMS_SIZE: usize = 48;

/// The fractal program, with GPU source and CPU evaluation.
pub const FRACTAL_PROGRAM: ShaderProgram = ShaderProgram {
    label: "canopy-fractal",
    wgsl: FRACTAL_WGSL,
    cpu: Some(shade),
};

/// Packs `uniforms` into the little-endian `Params` buffer of
/// [`FRACTAL_WGSL`].
///
/// Missing uniforms are written as zero.
#[must_use]
pub fn fractal_params_bytes(uniforms: &Uniforms) -> [u8; FRACTAL_PARAMS_SIZE] {
    let mut out = [0_u8; FRACTAL_PARAMS_SIZE];
    let mut put = |offset: usize, bytes: [u8; 4]| {
        out[offset..offset + 4].copy_from_slice(&bytes);
    };
    let f = |name| uniforms.f32(name).unwrap_or(0.0).to_le_bytes();
    let v = |name| uniforms.vec2(name).unwrap_or([0.0; 2]);

    put(0, f(uniform::TIME));
    put(4, f(uniform::SCALE));
    put(8, f(uniform::INTERIOR_EPSILON));
    put(12, f(uniform::ESCAPE_RADIUS));
    for (offset, name) in [(16, uniform::RESOLUTION), (24, uniform::CENTER), (32, uniform::C)] {
        let [x, y] = v(name);
        put(offset, x.to_le_bytes());
        put(offset + 4, y.to_le_bytes());
    }
    put(40, uniforms.u32(uniform::ITERATIONS).unwrap_or(0).to_le_bytes());
    out
}

/// CPU evaluation of [`FRACTAL_WGSL`] at a fragment centre in backing pixels.
///
/// Runs in `f32` like the GPU path, so both agree closely at any zoom.
#[must_use]
pub fn shade(uniforms: &Uniforms, frag: Point) -> [u8; 4] {
    let [w, h] = uniforms.vec2(uniform::RESOLUTION).unwrap_or([1.0, 1.0]);
    if !(w > 0.0 && h > 0.0) {
        return BLACK;
    }
    let [cx, cy] = uniforms.vec2(uniform::CENTER).unwrap_or([0.0; 2]);
    let [kx, ky] = uniforms.vec2(uniform::C).unwrap_or([0.0; 2]);
    let scale = uniforms.f32(uniform::SCALE).unwrap_or(2.5);
    let time = uniforms.f32(uniform::TIME).unwrap_or(0.0);
    let iterations = uniforms.u32(uniform::ITERATIONS).unwrap_or(0);
    let eps = uniforms.f32(uniform::INTERIOR_EPSILON).unwrap_or(0.0);
    let radius = uniforms.f32(uniform::ESCAPE_RADIUS).unwrap_or(2.0);

    #[expect(
        clippy::cast_possible_truncation,
        reason = "Fragment coordinates are evaluated in f32 like the GPU path."
    )]
    let (u, v) = (frag.x as f32 / w, frag.y as f32 / h);
    let px = cx + (u - 0.5) * (w / h) * scale;
    let py = cy - (v - 0.5) * scale;
    let (r2, eps2) = (radius * radius, eps * eps);

    let (mut zx, mut zy) = (px + kx, py + ky);
    let (mut dx, mut dy) = (1.0_f32, 0.0_f32);
    for i in 0..iterations {
        (dx, dy) = (2.0 * (zx * dx - zy * dy), 2.0 * (zx * dy + zy * dx));
        (zx, zy) = (zx * zx - zy * zy + px + kx, 2.0 * zx * zy + py + ky);
        let m2 = zx * zx + zy * zy;
        if m2 > r2 {
            let nu = i as f32 + 1.0 - (0.5 * m2.ln()).log2();
            return palette(time, nu);
        }
        if dx * dx + dy * dy < eps2 {
            break;
        }
    }
    BLACK
}

const BLACK: [u8; 4] = [0, 0, 0, 255];

#[expect(
    clippy::cast_possible_truncation,
    reason = "Channel values are clamped into 0..=255 before the cast."
)]
fn palette(time: f32, nu: f32) -> [u8; 4] {
    let channel = |offset: f32| {
        let phase = time * 0.05 + nu * 0.02 + offset;
        let value = 0.5 + 0.5 * (core::f32::consts::TAU * phase).cos();
        (value * 255.0).round().clamp(0.0, 255.0) as u8
    };
    [channel(0.0), channel(0.33), channel(0.67), 255]
}

#[cfg(test)]
mod tests {
    use canopy_surface::UniformValue;

    use super::*;

    fn uniforms(width: f32, height: f32) -> Uniforms {
        Uniforms::new()
            .with(uniform::TIME, UniformValue::F32(0.0))
            .with(uniform::RESOLUTION, UniformValue::Vec2([width, height]))
            .with(uniform::CENTER, UniformValue::Vec2([0.0, 0.0]))
            .with(uniform::SCALE, UniformValue::F32(2.5))
            .with(uniform::C, UniformValue::Vec2([0.0, 0.0]))
            .with(uniform::ITERATIONS, UniformValue::U32(256))
            .with(uniform::INTERIOR_EPSILON, UniformValue::F32(8e-3))
            .with(uniform::ESCAPE_RADIUS, UniformValue::F32(1e3))
    }

    #[test]
    fn origin_is_interior() {
        let u = uniforms(100.0, 100.0);
        assert_eq!(shade(&u, Point::new(50.0, 50.0)), BLACK);
    }

    #[test]
    fn main_cardioid_point_is_interior() {
        // Plane point (-0.1, 0.1) lies inside the main cardioid.
        let u = uniforms(100.0, 100.0);
        let frag = Point::new(50.0 - 0.1 / 2.5 * 100.0, 50.0 - 0.1 / 2.5 * 100.0);
        assert_eq!(shade(&u, frag), BLACK);
    }

    #[test]
    fn far_point_escapes_with_colour() {
        // Top-left corner maps to roughly (-1.25, 1.25), outside the set.
        let u = uniforms(100.0, 100.0);
        let px = shade(&u, Point::new(0.5, 0.5));
        assert_ne!(px, BLACK);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn zero_iterations_are_black() {
        let mut u = uniforms(100.0, 100.0);
        u.set(uniform::ITERATIONS, UniformValue::U32(0));
        assert_eq!(shade(&u, Point::new(0.5, 0.5)), BLACK);
    }

    #[test]
    fn orbit_is_seeded_at_first_iterate() {
        // Plane point (1.5, 0): z1 = 1.5 stays inside radius 2, z2 = 3.75
        // does not. One iteration only escapes when z starts at p + c.
        let mut u = uniforms(100.0, 100.0);
        u.set(uniform::SCALE, UniformValue::F32(5.0));
        u.set(uniform::ESCAPE_RADIUS, UniformValue::F32(2.0));
        u.set(uniform::ITERATIONS, UniformValue::U32(1));
        assert_ne!(shade(&u, Point::new(80.0, 50.0)), BLACK);
    }

    #[test]
    fn palette_cycles_with_time() {
        let mut u = uniforms(100.0, 100.0);
        let frag = Point::new(0.5, 0.5);
        let early = shade(&u, frag);
        u.set(uniform::TIME, UniformValue::F32(5.0));
        assert_ne!(shade(&u, frag), early);
    }

    #[test]
    fn missing_resolution_is_black() {
        let u = Uniforms::new().with(uniform::RESOLUTION, UniformValue::Vec2([0.0, 0.0]));
        assert_eq!(shade(&u, Point::new(0.5, 0.5)), BLACK);
    }

    #[test]
    fn params_layout_matches_wgsl() {
        let bytes = fractal_params_bytes(&uniforms(800.0, 600.0));
        let f = |o: usize| f32::from_le_bytes([bytes[o], bytes[o + 1], bytes[o + 2], bytes[o + 3]]);
        assert_eq!(f(4), 2.5);
        assert_eq!(f(12), 1e3);
        assert_eq!((f(16), f(20)), (800.0, 600.0));
        assert_eq!(u32::from_le_bytes([bytes[40], bytes[41], bytes[42], bytes[43]]), 256);
        assert!(FRACTAL_WGSL.contains("fn fs_main"));
    }
}
