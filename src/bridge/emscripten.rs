use crate::mainloop::{FrameFn, LoopControl};
use std::cell::RefCell;
use std::os::raw::c_int;

type EmCallbackFunc = extern "C" fn();

extern "C" {
    fn emscripten_set_main_loop(func: EmCallbackFunc, fps: c_int, simulate_infinite_loop: c_int);
    fn emscripten_cancel_main_loop();
}

// emscripten only keeps a bare function pointer, so the
// closure waits here until the scheduler calls back.
thread_local! {
    static FRAME: RefCell<Option<FrameFn>> = RefCell::new(None);
}

extern "C" fn frame_trampoline() {
    let control = FRAME.with(|slot| -> LoopControl {
        return match slot.borrow_mut().as_mut() {
            Some(frame) => frame(),
            None => LoopControl::Exit,
        };
    });
    if control == LoopControl::Exit {
        FRAME.with(|slot| { slot.borrow_mut().take(); });
        unsafe { emscripten_cancel_main_loop(); }
    }
}

// Returns right away: simulate_infinite_loop is off so the
// host gets control back.
pub fn set_main_loop(frame: FrameFn, fps: i32) {
    FRAME.with(|slot| { *slot.borrow_mut() = Some(frame); });
    unsafe { emscripten_set_main_loop(frame_trampoline, fps, 0); }
}
