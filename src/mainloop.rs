// Loop drivers decide who calls the frame function and how often.
// The shim never loops on its own; it hands a frame closure
// to one of these.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type FrameFn = Box<dyn FnMut() -> LoopControl + 'static>;

pub trait LoopDriver {
    // Starts calling `frame`. Whether this returns before the
    // loop ends depends on the driver.
    fn install(&mut self, frame: FrameFn);
}

/// Runs the frame function on the calling thread until it
/// asks to exit or `max_frames` frames have run.
pub struct BlockingLoop {
    max_frames: Option<u64>,
    frames_run: u64,
}

impl BlockingLoop {
    pub fn new(max_frames: Option<u64>) -> BlockingLoop {
        return BlockingLoop { max_frames: max_frames, frames_run: 0 };
    }

    pub fn frames_run(&self) -> u64 {
        return self.frames_run;
    }
}

impl LoopDriver for BlockingLoop {
    fn install(&mut self, mut frame: FrameFn) {
        loop {
            if let Some(max) = self.max_frames {
                if self.frames_run >= max { break; }
            }
            self.frames_run += 1;
            if frame() == LoopControl::Exit { break; }
        }
        log::info!("Main loop finished after {} frames", self.frames_run);
    }
}

/// Hands the frame function to the browser's scheduler through
/// emscripten. `install` returns immediately; frames run from
/// the host's event loop afterwards.
#[cfg(target_os = "emscripten")]
pub struct HostLoop {
    pub fps: i32,
}

#[cfg(target_os = "emscripten")]
impl HostLoop {
    // fps 0 lets the browser pick the cadence (requestAnimationFrame).
    pub fn new() -> HostLoop {
        return HostLoop { fps: 0 };
    }
}

#[cfg(target_os = "emscripten")]
impl LoopDriver for HostLoop {
    fn install(&mut self, frame: FrameFn) {
        crate::bridge::emscripten::set_main_loop(frame, self.fps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn blocking_loop_stops_on_exit() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let mut driver = BlockingLoop::new(None);
        driver.install(Box::new(move || {
            seen.set(seen.get() + 1);
            if seen.get() == 4 { LoopControl::Exit } else { LoopControl::Continue }
        }));
        assert_eq!(calls.get(), 4);
        assert_eq!(driver.frames_run(), 4);
    }

    #[test]
    fn blocking_loop_honours_frame_cap() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let mut driver = BlockingLoop::new(Some(10));
        driver.install(Box::new(move || {
            seen.set(seen.get() + 1);
            LoopControl::Continue
        }));
        assert_eq!(calls.get(), 10);
    }

    #[test]
    fn zero_frame_cap_runs_nothing() {
        let mut driver = BlockingLoop::new(Some(0));
        driver.install(Box::new(|| panic!("frame should not run")));
        assert_eq!(driver.frames_run(), 0);
    }
}
