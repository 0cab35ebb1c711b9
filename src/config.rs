use crate::graphics::{Color, SurfaceConfig};

pub const WINDOW_WIDTH: u32 = 480;
pub const WINDOW_HEIGHT: u32 = 800;
pub const WINDOW_TITLE: &str = "glshim";

// RGBA8 color, 16-bit depth, no stencil.
pub const COLOR_BITS: u32 = 8;
pub const DEPTH_BITS: u32 = 16;
pub const STENCIL_BITS: u32 = 0;

pub const REPORT_EVERY: u64 = 60;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClearPath {
    // Every frame goes through the backend's glClear.
    Direct,
    // glClear is looked up once at initialization and
    // called through the saved pointer afterwards.
    Cached,
}

#[derive(Clone, Debug)]
pub struct ShimConfig {
    pub surface: SurfaceConfig,
    pub clear_color: Color,
    pub swap_buffers: bool,
    pub clear_path: ClearPath,
    pub timing: bool,
    pub report_every: u64,
    // Cap for loops the shim drives itself. The host
    // scheduler ignores it.
    pub max_frames: Option<u64>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        SurfaceConfig {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            title: WINDOW_TITLE.to_string(),
            red_bits: COLOR_BITS,
            green_bits: COLOR_BITS,
            blue_bits: COLOR_BITS,
            alpha_bits: COLOR_BITS,
            depth_bits: DEPTH_BITS,
            stencil_bits: STENCIL_BITS,
        }
    }
}

impl Default for ShimConfig {
    fn default() -> Self {
        ShimConfig {
            surface: SurfaceConfig::default(),
            clear_color: Color::RED,
            swap_buffers: true,
            clear_path: ClearPath::Direct,
            timing: false,
            report_every: REPORT_EVERY,
            max_frames: None,
        }
    }
}

impl ShimConfig {
    pub fn with_clear_path(mut self, path: ClearPath) -> ShimConfig {
        self.clear_path = path;
        return self;
    }

    pub fn with_swap(mut self, swap: bool) -> ShimConfig {
        self.swap_buffers = swap;
        return self;
    }

    pub fn with_timing(mut self, report_every: u64) -> ShimConfig {
        self.timing = true;
        self.report_every = report_every.max(1);
        return self;
    }

    pub fn with_max_frames(mut self, frames: u64) -> ShimConfig {
        self.max_frames = Some(frames);
        return self;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_surface_is_portrait_480_by_800() {
        let cfg = ShimConfig::default();
        assert_eq!((cfg.surface.width, cfg.surface.height), (480, 800));
        assert_eq!(cfg.surface.alpha_bits, 8);
        assert_eq!(cfg.surface.depth_bits, 16);
        assert_eq!(cfg.surface.stencil_bits, 0);
    }

    #[test]
    fn default_clears_opaque_red_and_swaps() {
        let cfg = ShimConfig::default();
        assert_eq!(cfg.clear_color, Color::new(1.0, 0.0, 0.0, 1.0));
        assert!(cfg.swap_buffers);
        assert_eq!(cfg.clear_path, ClearPath::Direct);
        assert!(!cfg.timing);
    }

    #[test]
    fn timing_interval_is_never_zero() {
        assert_eq!(ShimConfig::default().with_timing(0).report_every, 1);
    }
}
