// A backend without a window. Nothing is drawn; every call is
// recorded so the lifecycle can be driven and inspected without
// a display.
use crate::bridge::{Error, Result};
use crate::graphics::gl::{GlError, GL_CLEAR};
use crate::graphics::{Backend, ClearMask, Color, SurfaceConfig};
use std::cell::Cell;
use std::ffi::c_void;
use std::ptr::null;

// glClear can be reached without going through the backend,
// so its bookkeeping is per-thread rather than per-instance.
thread_local! {
    static CLEARS: Cell<u64> = Cell::new(0);
    static LAST_MASK: Cell<Option<u32>> = Cell::new(None);
}

// The headless stand-in for the linked glClear.
pub unsafe extern "system" fn headless_gl_clear(mask: ::gl::types::GLbitfield) {
    CLEARS.with(|c| c.set(c.get() + 1));
    LAST_MASK.with(|m| m.set(Some(mask)));
}

pub fn clear_count() -> u64 {
    return CLEARS.with(|c| c.get());
}

pub fn last_clear_mask() -> Option<u32> {
    return LAST_MASK.with(|m| m.get());
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    CreateContext(SurfaceConfig),
    SetClearColor(Color),
    Clear(ClearMask),
    SwapBuffers,
    ProcAddress(String),
    DestroyContext,
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    pub calls: Vec<Call>,
    fail_create: bool,
    no_entry_points: bool,
    keep_open: bool,
    pending_error: Option<GlError>,
    live: bool,
}

impl HeadlessBackend {
    pub fn new() -> HeadlessBackend {
        return HeadlessBackend::default();
    }

    // Context creation fails the way a missing display would.
    pub fn failing() -> HeadlessBackend {
        return HeadlessBackend { fail_create: true, ..Default::default() };
    }

    pub fn without_entry_points(mut self) -> HeadlessBackend {
        self.no_entry_points = true;
        return self;
    }

    // Keeps the pretend window open, so only a frame cap
    // ends a blocking loop.
    pub fn keep_open(mut self) -> HeadlessBackend {
        self.keep_open = true;
        return self;
    }

    // The next error check reports this error once.
    pub fn raise(&mut self, e: GlError) {
        self.pending_error = Some(e);
    }

    pub fn is_live(&self) -> bool {
        return self.live;
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        return self.calls.iter().filter(|c| pred(c)).count();
    }
}

impl Backend for HeadlessBackend {
    fn create_context(&mut self, surface: &SurfaceConfig) -> Result<()> {
        self.calls.push(Call::CreateContext(surface.clone()));
        if self.fail_create {
            return Err(Error::Backend("no display available".to_string()));
        }
        self.live = true;
        Ok(())
    }

    fn set_clear_color(&mut self, color: Color) -> Result<()> {
        self.calls.push(Call::SetClearColor(color));
        Ok(())
    }

    fn clear(&mut self, mask: ClearMask) -> Result<()> {
        self.calls.push(Call::Clear(mask));
        unsafe { headless_gl_clear(mask.bits()) };
        return self.check_error();
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.calls.push(Call::SwapBuffers);
        Ok(())
    }

    fn proc_address(&mut self, name: &str) -> *const c_void {
        self.calls.push(Call::ProcAddress(name.to_string()));
        if self.no_entry_points || name != GL_CLEAR {
            return null();
        }
        let f: unsafe extern "system" fn(::gl::types::GLbitfield) = headless_gl_clear;
        return f as *const c_void;
    }

    fn check_error(&mut self) -> Result<()> {
        return match self.pending_error.take() {
            Some(e) => Err(Error::Gl(e)),
            None => Ok(()),
        };
    }

    // Unless told otherwise there is no window to keep open,
    // so a blocking loop stops after the frame it just ran.
    fn should_close(&mut self) -> bool {
        return !self.keep_open;
    }

    fn destroy_context(&mut self) {
        self.calls.push(Call::DestroyContext);
        self.live = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_backend_records_the_attempt_only() {
        let mut backend = HeadlessBackend::failing();
        let surface = crate::config::ShimConfig::default().surface;
        assert!(backend.create_context(&surface).is_err());
        assert!(!backend.is_live());
        assert_eq!(backend.calls, vec![Call::CreateContext(surface)]);
    }

    #[test]
    fn raised_error_is_reported_once() {
        let mut backend = HeadlessBackend::new();
        backend.raise(GlError(::gl::OUT_OF_MEMORY));
        assert!(matches!(backend.check_error(), Err(Error::Gl(GlError(::gl::OUT_OF_MEMORY)))));
        assert!(backend.check_error().is_ok());
    }

    #[test]
    fn kept_open_backend_never_asks_to_close() {
        assert!(HeadlessBackend::new().should_close());
        assert!(!HeadlessBackend::new().keep_open().should_close());
    }

    #[test]
    fn unknown_entry_points_are_null() {
        let mut backend = HeadlessBackend::new();
        assert!(backend.proc_address("glDrawArrays").is_null());
        assert!(!backend.proc_address(GL_CLEAR).is_null());
    }
}
