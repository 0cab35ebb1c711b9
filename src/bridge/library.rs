// Looks GL entry points up in the system GL library, for
// contexts whose loader hands back null for core functions
// (some WGL/GLX drivers only resolve extensions).
use crate::bridge::Result;
use libloading::Library;
use once_cell::sync::OnceCell;
use std::ffi::{c_void, CString};
use std::ptr::null;

#[cfg(target_os = "windows")]
const GL_LIBRARIES: &[&str] = &["opengl32.dll"];
#[cfg(target_os = "macos")]
const GL_LIBRARIES: &[&str] = &["/System/Library/Frameworks/OpenGL.framework/OpenGL"];
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const GL_LIBRARIES: &[&str] = &["libGL.so.1", "libGL.so", "libGLESv2.so.2", "libGLESv2.so"];

// Loaded at most once; a failed load is remembered too.
static GL_LIBRARY: OnceCell<Option<Library>> = OnceCell::new();

fn open_first(names: &[&str]) -> Result<Library> {
    let mut last = None;
    for name in names {
        match unsafe { Library::new(name) } {
            Ok(lib) => return Ok(lib),
            Err(e) => last = Some(e),
        };
    }
    return match last {
        Some(e) => Err(e.into()),
        None => Err(crate::bridge::Error::Backend("no GL library names to try".to_string())),
    };
}

fn gl_library() -> Option<&'static Library> {
    return GL_LIBRARY.get_or_init(|| {
        match open_first(GL_LIBRARIES) {
            Ok(lib) => Some(lib),
            Err(e) => {
                log::warn!("No system GL library to resolve from: {}", e);
                None
            }
        }
    }).as_ref();
}

pub fn symbol_address(lib: &Library, name: &str) -> Result<*const c_void> {
    let cname = match CString::new(name) {
        Ok(c) => c,
        Err(_) => return Ok(null()),
    };
    let sym = unsafe { lib.get::<*const c_void>(cname.as_bytes_with_nul())? };
    return Ok(*sym);
}

// Null when neither the library nor the symbol can be found.
pub fn proc_address(name: &str) -> *const c_void {
    let lib = match gl_library() {
        Some(l) => l,
        None => return null(),
    };
    return match symbol_address(lib, name) {
        Ok(p) => p,
        Err(e) => {
            log::debug!("{} not exported by the GL library: {}", name, e);
            null()
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_libraries_are_an_error() {
        assert!(open_first(&["libdefinitely-not-a-gl-library.so"]).is_err());
        assert!(open_first(&[]).is_err());
    }

    #[test]
    fn interior_nul_names_resolve_to_null() {
        assert!(proc_address("gl\0Clear").is_null());
    }
}
