use crate::bridge::library;
use crate::bridge::{Error, Result};
use crate::graphics::gl::GlError;
use crate::graphics::{Backend, ClearMask, Color, SurfaceConfig};
use glfw::{Context as _, Glfw, GlfwReceiver, PWindow, WindowEvent, WindowHint};
use log::*;
use std::ffi::c_void;

fn glfw_error_callback(error: glfw::Error, description: String) {
    error!("GLFW error ({:?}): {}", error, description);
}

// Live context pieces. Dropped in field order, so the
// window goes before GLFW itself terminates.
struct GlfwContext {
    window: PWindow,
    events: GlfwReceiver<(f64, WindowEvent)>,
    glfw: Glfw,
}

pub struct GlfwBackend {
    context: Option<GlfwContext>,
}

impl GlfwBackend {
    pub fn new() -> GlfwBackend {
        return GlfwBackend { context: None };
    }

    fn context_mut(&mut self) -> Result<&mut GlfwContext> {
        return match self.context.as_mut() {
            Some(c) => Ok(c),
            None => Err(Error::Backend("no GLFW context".to_string())),
        };
    }
}

impl Backend for GlfwBackend {
    fn create_context(&mut self, surface: &SurfaceConfig) -> Result<()> {
        let mut glfw = match glfw::init(glfw_error_callback) {
            Ok(g) => g,
            Err(e) => {
                return Err(Error::GlfwInit(format!("{:?}", e)));
            }
        };
        glfw.window_hint(WindowHint::RedBits(Some(surface.red_bits)));
        glfw.window_hint(WindowHint::GreenBits(Some(surface.green_bits)));
        glfw.window_hint(WindowHint::BlueBits(Some(surface.blue_bits)));
        glfw.window_hint(WindowHint::AlphaBits(Some(surface.alpha_bits)));
        glfw.window_hint(WindowHint::DepthBits(Some(surface.depth_bits)));
        glfw.window_hint(WindowHint::StencilBits(Some(surface.stencil_bits)));
        let (mut window, events) = match glfw.create_window(
            surface.width, surface.height, &surface.title, glfw::WindowMode::Windowed) {
            Some(pair) => pair,
            None => return Err(Error::WindowCreation),
        };
        window.make_current();
        gl::load_with(|s| -> *const c_void {
            let p = window.get_proc_address(s) as *const c_void;
            if p.is_null() { library::proc_address(s) } else { p }
        });
        self.context = Some(GlfwContext { window: window, events: events, glfw: glfw });
        Ok(())
    }

    fn set_clear_color(&mut self, color: Color) -> Result<()> {
        self.context_mut()?;
        unsafe { gl::ClearColor(color.r, color.g, color.b, color.a); }
        return self.check_error();
    }

    fn clear(&mut self, mask: ClearMask) -> Result<()> {
        self.context_mut()?;
        unsafe { gl::Clear(mask.bits()); }
        return self.check_error();
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.context_mut()?.window.swap_buffers();
        Ok(())
    }

    fn proc_address(&mut self, name: &str) -> *const c_void {
        let ctx = match self.context.as_mut() {
            Some(c) => c,
            None => return std::ptr::null(),
        };
        let p = ctx.window.get_proc_address(name) as *const c_void;
        if !p.is_null() {
            return p;
        }
        return library::proc_address(name);
    }

    fn check_error(&mut self) -> Result<()> {
        let code = unsafe { gl::GetError() };
        return match GlError::from_code(code) {
            Some(e) => Err(e.into()),
            None => Ok(()),
        };
    }

    fn should_close(&mut self) -> bool {
        let ctx = match self.context.as_mut() {
            Some(c) => c,
            None => return true,
        };
        ctx.glfw.poll_events();
        // Nothing listens to window events; drain so they don't pile up.
        for _ in glfw::flush_messages(&ctx.events) {}
        return ctx.window.should_close();
    }

    fn destroy_context(&mut self) {
        if let Some(ctx) = self.context.take() {
            drop(ctx);
            info!("GLFW window closed");
        }
    }
}
