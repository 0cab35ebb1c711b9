pub mod gl;
pub mod headless;

use crate::bridge::Result;
use std::ffi::c_void;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Color {
        return Color { r: r, g: g, b: b, a: a };
    }
}

// Buffer bits for a clear. Values match GL's so they
// can be handed straight to glClear.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClearMask(pub u32);

impl ClearMask {
    pub const COLOR: ClearMask = ClearMask(::gl::COLOR_BUFFER_BIT);

    pub fn bits(self) -> u32 {
        return self.0;
    }
}

// Window size and framebuffer format requested from the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub red_bits: u32,
    pub green_bits: u32,
    pub blue_bits: u32,
    pub alpha_bits: u32,
    pub depth_bits: u32,
    pub stencil_bits: u32,
}

/// The windowing/GL library underneath the shim.
///
/// Implementations own the context. The shim guarantees
/// `create_context` succeeds before any other call and that
/// `destroy_context` is the last one.
pub trait Backend {
    fn create_context(&mut self, surface: &SurfaceConfig) -> Result<()>;
    fn set_clear_color(&mut self, color: Color) -> Result<()>;
    fn clear(&mut self, mask: ClearMask) -> Result<()>;
    fn swap_buffers(&mut self) -> Result<()>;

    // Address of a GL entry point in the current context,
    // or null if the context doesn't know it.
    fn proc_address(&mut self, name: &str) -> *const c_void;

    // Reports any error raised by calls made outside the
    // backend (through a cached entry point).
    fn check_error(&mut self) -> Result<()>;

    // Pumps window events and reports whether the
    // window wants to close.
    fn should_close(&mut self) -> bool;

    fn destroy_context(&mut self);
}
