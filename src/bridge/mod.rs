#[cfg(feature = "glfw-backend")]
pub mod window;
#[cfg(target_os = "emscripten")]
pub mod emscripten;
pub mod library;

use crate::engine::State;
use crate::graphics::gl::GlError;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    GlfwInit(String),
    WindowCreation,
    MissingEntryPoint(&'static str),
    Library(libloading::Error),
    Gl(GlError),
    InvalidState { op: &'static str, state: State },
    Backend(String),
}

impl From<libloading::Error> for Error {
    fn from(e: libloading::Error) -> Self {
        return Error::Library(e);
    }
}

impl From<GlError> for Error {
    fn from(e: GlError) -> Self {
        return Error::Gl(e);
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Error::GlfwInit(msg) => write!(f, "GLFW failed to initialize: {}", msg),
            Error::WindowCreation => write!(f, "failed to create window"),
            Error::MissingEntryPoint(name) => write!(f, "no entry point for {}", name),
            Error::Library(e) => write!(f, "GL library error: {}", e),
            Error::Gl(e) => write!(f, "GL error: {}", e),
            Error::InvalidState { op, state } => write!(f, "{} is not valid while {:?}", op, state),
            Error::Backend(msg) => write!(f, "backend error: {}", msg),
        };
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        return match self {
            Error::Library(e) => Some(e),
            _ => None,
        };
    }
}
