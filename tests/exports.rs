// Drives the C entry points the way a host would, against the
// headless backend. Each test runs on its own thread and so
// gets its own shim.
#![cfg(not(feature = "glfw-backend"))]

use glshim::config::{ClearPath, ShimConfig};
use glshim::engine::{Shim, State};
use glshim::graphics::headless::{self, Call, HeadlessBackend};
use glshim::graphics::Color;
use glshim::*;

fn clears_issued() -> usize {
    return with_shim("test", |s| Ok(s.backend().count(|c| matches!(c, Call::Clear(_))))).unwrap();
}

#[test]
fn full_lifecycle() {
    test_wrapper();
    assert!(init_gl());
    assert_eq!(current_state(), Some(State::Initialized));
    on_create();
    for _ in 0..3 {
        do_frame();
    }
    assert_eq!(current_state(), Some(State::Running));
    assert_eq!(clears_issued(), 3);
    let red = with_shim("test", |s| Ok(s.backend().calls.contains(&Call::SetClearColor(Color::RED)))).unwrap();
    assert!(red);
    on_terminate();
    assert_eq!(current_state(), Some(State::Terminated));
}

#[test]
fn failing_init_returns_false_and_nothing_follows() {
    install(Shim::new(HeadlessBackend::failing(), ShimConfig::default()));
    assert!(!init_gl());
    on_create();
    do_frame();
    on_terminate();
    assert_eq!(current_state(), Some(State::Uninitialized));
    let calls = with_shim("test", |s| Ok(s.backend().calls.len())).unwrap();
    assert_eq!(calls, 1);
}

#[test]
fn calls_before_init_are_ignored() {
    on_create();
    do_frame();
    set_main_loop();
    on_terminate();
    assert_eq!(current_state(), None);
}

#[test]
fn double_terminate_does_not_crash() {
    assert!(init_gl());
    on_terminate();
    on_terminate();
    let destroys = with_shim("test", |s| {
        Ok(s.backend().count(|c| matches!(c, Call::DestroyContext)))
    }).unwrap();
    assert_eq!(destroys, 1);
}

#[test]
fn double_init_keeps_the_first_context() {
    assert!(init_gl());
    assert!(!init_gl());
    assert_eq!(current_state(), Some(State::Initialized));
}

#[test]
fn main_loop_runs_frames_natively() {
    assert!(init_gl());
    on_create();
    set_main_loop();
    // The headless window closes after one frame.
    assert_eq!(clears_issued(), 1);
    assert_eq!(current_state(), Some(State::Running));
}

#[test]
fn cached_clear_path_through_exports() {
    install(Shim::new(HeadlessBackend::new(), ShimConfig::default().with_clear_path(ClearPath::Cached)));
    assert!(init_gl());
    let before = headless::clear_count();
    do_frame();
    do_frame();
    assert_eq!(headless::clear_count() - before, 2);
    assert_eq!(clears_issued(), 0);
}

#[test]
fn main_loop_honours_configured_frame_cap() {
    let backend = HeadlessBackend::new().keep_open();
    install(Shim::new(backend, ShimConfig::default().with_max_frames(5)));
    assert!(init_gl());
    set_main_loop();
    assert_eq!(clears_issued(), 5);
    let frames = with_shim("test", |s| Ok(s.stats().frames)).unwrap();
    assert_eq!(frames, 5);
}

#[test]
fn second_main_loop_is_refused() {
    let backend = HeadlessBackend::new().keep_open();
    install(Shim::new(backend, ShimConfig::default().with_max_frames(2)));
    assert!(init_gl());
    set_main_loop();
    set_main_loop();
    assert_eq!(clears_issued(), 2);
    // Host-driven frames still go through.
    do_frame();
    assert_eq!(clears_issued(), 3);
}
