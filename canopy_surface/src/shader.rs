// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::Surface;

/// Value of a single uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    /// `f32`.
    F32(f32),
    /// `vec2<f32>`.
    Vec2([f32; 2]),
    /// `u32`.
    U32(u32),
}

/// Named uniform values for a shader pass, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Uniforms {
    entries: Vec<(&'static str, UniformValue)>,
}

impl Uniforms {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing any previous value.
    pub fn set(&mut self, name: &'static str, value: UniformValue) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder form of [`Uniforms::set`].
    #[must_use]
    pub fn with(mut self, name: &'static str, value: UniformValue) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Returns `name` if it is an `f32`.
    #[must_use]
    pub fn f32(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            UniformValue::F32(v) => Some(v),
            _ => None,
        }
    }

    /// Returns `name` if it is a `vec2<f32>`.
    #[must_use]
    pub fn vec2(&self, name: &str) -> Option<[f32; 2]> {
        match self.get(name)? {
            UniformValue::Vec2(v) => Some(v),
            _ => None,
        }
    }

    /// Returns `name` if it is a `u32`.
    #[must_use]
    pub fn u32(&self, name: &str) -> Option<u32> {
        match self.get(name)? {
            UniformValue::U32(v) => Some(v),
            _ => None,
        }
    }

    /// Iterates over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, UniformValue)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of uniforms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no uniforms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Evaluates one fragment on the CPU.
///
/// The point is the fragment centre in backing pixels, origin top-left,
/// y down. Returns straight RGBA.
pub type CpuShade = fn(&Uniforms, Point) -> [u8; 4];

/// A full-screen fragment program.
///
/// GPU hosts compile `wgsl`; CPU hosts call `cpu`, which must compute the
/// same image.
#[derive(Clone, Copy, Debug)]
pub struct ShaderProgram {
    /// Name used in diagnostics.
    pub label: &'static str,
    /// WGSL module with a `vs_main` vertex and `fs_main` fragment entry point.
    pub wgsl: &'static str,
    /// CPU evaluation, if available.
    pub cpu: Option<CpuShade>,
}

/// Failure to prepare a [`ShaderProgram`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShaderError {
    /// The backend cannot run this program at all.
    Unsupported {
        /// Program label.
        label: &'static str,
    },
    /// The backend rejected the program source.
    Compile {
        /// Program label.
        label: &'static str,
        /// Backend-provided message.
        message: String,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported { label } => {
                write!(f, "shader `{label}` is not supported by this backend")
            }
            Self::Compile { label, message } => {
                write!(f, "shader `{label}` failed to compile: {message}")
            }
        }
    }
}

impl core::error::Error for ShaderError {}

/// A surface that runs a single full-screen fragment program.
pub trait ShaderSurface: Surface {
    /// Compiles `program`, replacing any previous one.
    fn compile(&mut self, program: &ShaderProgram) -> Result<(), ShaderError>;

    /// Uploads uniform values for subsequent draws.
    fn set_uniforms(&mut self, uniforms: &Uniforms);

    /// Runs the program over every backing pixel.
    ///
    /// Does nothing if no program is compiled or there is no backing buffer.
    fn draw_fullscreen(&mut self);
}
