use crate::bridge::{Error, Result};
use crate::graphics::{Backend, ClearMask};
use std::ffi::c_void;
use std::fmt;

pub const GL_CLEAR: &str = "glClear";

// Same signature the gl crate loads glClear with.
pub type ClearFn = unsafe extern "system" fn(mask: ::gl::types::GLbitfield);

// How a frame reaches glClear: through the backend's
// normal dispatch, or through a pointer fetched once.
#[derive(Copy, Clone)]
pub enum ClearEntry {
    Direct,
    Cached(ClearFn),
}

impl ClearEntry {
    pub fn resolve<B: Backend>(backend: &mut B) -> Result<ClearEntry> {
        let addr = backend.proc_address(GL_CLEAR);
        if addr.is_null() {
            return Err(Error::MissingEntryPoint(GL_CLEAR));
        }
        let f: ClearFn = unsafe { std::mem::transmute::<*const c_void, ClearFn>(addr) };
        return Ok(ClearEntry::Cached(f));
    }

    pub fn address(&self) -> Option<*const c_void> {
        return match self {
            ClearEntry::Direct => None,
            ClearEntry::Cached(f) => Some(*f as *const c_void),
        };
    }

    pub fn clear<B: Backend>(&self, backend: &mut B, mask: ClearMask) -> Result<()> {
        return match self {
            ClearEntry::Direct => backend.clear(mask),
            ClearEntry::Cached(f) => {
                // The pointer belongs to the backend's current context.
                unsafe { f(mask.bits()) };
                backend.check_error()
            }
        };
    }
}

impl fmt::Debug for ClearEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self.address() {
            None => write!(f, "Direct"),
            Some(p) => write!(f, "Cached({:p})", p),
        };
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GlError(pub u32);

impl GlError {
    pub fn from_code(code: u32) -> Option<GlError> {
        if code == ::gl::NO_ERROR {
            return None;
        }
        return Some(GlError(code));
    }

    pub fn name(&self) -> &'static str {
        return match self.0 {
            ::gl::INVALID_ENUM => "GL_INVALID_ENUM",
            ::gl::INVALID_VALUE => "GL_INVALID_VALUE",
            ::gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
            ::gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
            ::gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
            _ => "unknown GL error",
        };
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:04x})", self.name(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::headless::{self, HeadlessBackend};

    #[test]
    fn no_error_code_is_not_an_error() {
        assert_eq!(GlError::from_code(::gl::NO_ERROR), None);
    }

    #[test]
    fn error_codes_are_named() {
        let e = GlError::from_code(::gl::INVALID_OPERATION).unwrap();
        assert_eq!(e.name(), "GL_INVALID_OPERATION");
        assert_eq!(e.to_string(), "GL_INVALID_OPERATION (0x0502)");
        assert_eq!(GlError(0x1234).name(), "unknown GL error");
    }

    #[test]
    fn resolved_clear_is_the_static_entry_point() {
        let mut backend = HeadlessBackend::new();
        let entry = ClearEntry::resolve(&mut backend).unwrap();
        let stat: ClearFn = headless::headless_gl_clear;
        assert_eq!(entry.address(), Some(stat as *const c_void));
    }

    #[test]
    fn resolve_fails_without_entry_point() {
        let mut backend = HeadlessBackend::new().without_entry_points();
        match ClearEntry::resolve(&mut backend) {
            Err(Error::MissingEntryPoint(name)) => assert_eq!(name, GL_CLEAR),
            other => panic!("unexpected {:?}", other.map(|e| e.address())),
        }
    }

    #[test]
    fn direct_and_cached_clears_do_the_same_work() {
        let mut backend = HeadlessBackend::new();
        let cached = ClearEntry::resolve(&mut backend).unwrap();
        let before = headless::clear_count();
        ClearEntry::Direct.clear(&mut backend, ClearMask::COLOR).unwrap();
        cached.clear(&mut backend, ClearMask::COLOR).unwrap();
        assert_eq!(headless::clear_count() - before, 2);
        assert_eq!(headless::last_clear_mask(), Some(ClearMask::COLOR.bits()));
    }
}
