pub mod bridge;
pub mod config;
pub mod engine;
pub mod graphics;
pub mod logging;
pub mod mainloop;

use crate::bridge::{Error, Result};
use crate::config::ShimConfig;
use crate::engine::{Shim, State};
use crate::mainloop::{LoopControl, LoopDriver};
use log::*;
use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};

#[cfg(feature = "glfw-backend")]
pub type ActiveBackend = bridge::window::GlfwBackend;
#[cfg(not(feature = "glfw-backend"))]
pub type ActiveBackend = graphics::headless::HeadlessBackend;

// The host calls every entry point from the same thread,
// one call at a time, so each thread gets its own shim.
thread_local! {
    static SHIM: RefCell<Option<Shim<ActiveBackend>>> = RefCell::new(None);
}

/// Puts a preconfigured shim in place of the default one.
/// Call before the host's `init_gl`.
pub fn install(shim: Shim<ActiveBackend>) {
    SHIM.with(|slot| { *slot.borrow_mut() = Some(shim); });
}

pub fn current_state() -> Option<State> {
    return SHIM.with(|slot| slot.borrow().as_ref().map(|s| s.state()));
}

pub fn with_shim<T>(op: &'static str, f: impl FnOnce(&mut Shim<ActiveBackend>) -> Result<T>) -> Result<T> {
    return SHIM.with(|slot| -> Result<T> {
        let mut guard = match slot.try_borrow_mut() {
            Ok(g) => g,
            Err(_) => return Err(Error::Backend(format!("{} called while the shim is busy", op))),
        };
        return match guard.as_mut() {
            Some(shim) => f(shim),
            None => Err(Error::InvalidState { op: op, state: State::Uninitialized }),
        };
    });
}

// Nothing may unwind into the host. Failures are logged
// and reduced to a flag.
fn guard(op: &'static str, f: impl FnOnce() -> Result<()>) -> bool {
    return match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            warn!("{} failed: {}", op, e);
            false
        },
        Err(_) => {
            error!("{} panicked", op);
            false
        }
    };
}

#[cfg(target_os = "emscripten")]
fn loop_driver() -> Box<dyn LoopDriver> {
    return Box::new(mainloop::HostLoop::new());
}

#[cfg(not(target_os = "emscripten"))]
fn loop_driver() -> Box<dyn LoopDriver> {
    let max_frames = with_shim("set_main_loop", |s| Ok(s.config().max_frames)).unwrap_or(None);
    return Box::new(mainloop::BlockingLoop::new(max_frames));
}

fn run_frame() -> LoopControl {
    let mut control = LoopControl::Exit;
    guard("do_frame", || with_shim("do_frame", |s| {
        s.advance_frame()?;
        if !s.should_close() {
            control = LoopControl::Continue;
        }
        Ok(())
    }));
    return control;
}

fn say_hello() {
    println!("Hello, I'm the Rust wrapper!!");
    info!("wrapper loaded");
}

#[no_mangle]
pub extern "C" fn test_wrapper() {
    logging::init_once();
    let _ = catch_unwind(say_hello);
}

#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn TestWrapper() {
    test_wrapper();
}

#[no_mangle]
pub extern "C" fn init_gl() -> bool {
    logging::init_once();
    let res = catch_unwind(|| -> Result<()> {
        return SHIM.with(|slot| -> Result<()> {
            let mut guard = match slot.try_borrow_mut() {
                Ok(g) => g,
                Err(_) => return Err(Error::Backend("init_gl called while the shim is busy".to_string())),
            };
            let shim = guard.get_or_insert_with(|| {
                Shim::new(ActiveBackend::new(), ShimConfig::default())
            });
            return shim.initialize();
        });
    });
    return match res {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            error!("Failed to create GL context: {}", e);
            false
        },
        Err(_) => {
            error!("init_gl panicked");
            false
        }
    };
}

#[no_mangle]
pub extern "C" fn on_create() {
    logging::init_once();
    guard("on_create", || with_shim("on_create", |s| s.on_create()));
}

#[no_mangle]
pub extern "C" fn set_main_loop() {
    logging::init_once();
    if !guard("set_main_loop", || with_shim("set_main_loop", |s| s.enter_main_loop())) {
        return;
    }
    // The slot is free again here; frames borrow it one at a time.
    guard("set_main_loop", || {
        let mut driver = loop_driver();
        driver.install(Box::new(run_frame));
        Ok(())
    });
}

#[no_mangle]
pub extern "C" fn do_frame() {
    logging::init_once();
    guard("do_frame", || with_shim("do_frame", |s| s.advance_frame()));
}

#[no_mangle]
pub extern "C" fn on_terminate() {
    logging::init_once();
    guard("on_terminate", || with_shim("on_terminate", |s| s.terminate()));
}
