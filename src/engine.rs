use crate::bridge::{Error, Result};
use crate::config::{ClearPath, ShimConfig};
use crate::graphics::gl::ClearEntry;
use crate::graphics::{Backend, ClearMask};
use log::*;
use std::time::{Duration, Instant};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    Uninitialized,
    Initialized,
    Running,
    Terminated,
}

// Diagnostic counters. Nothing reads these back except logs and tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub clears: u64,
    pub swaps: u64,
    pub clear_time: Duration,
    window_clears: u64,
    window_time: Duration,
}

impl FrameStats {
    fn record_clear(&mut self, elapsed: Option<Duration>) {
        self.clears += 1;
        if let Some(t) = elapsed {
            self.clear_time += t;
            self.window_time += t;
            self.window_clears += 1;
        }
    }

    // Average clear time since the last call, then starts a new window.
    fn take_window(&mut self) -> Option<Duration> {
        if self.window_clears == 0 {
            return None;
        }
        let avg = self.window_time / self.window_clears as u32;
        self.window_clears = 0;
        self.window_time = Duration::ZERO;
        return Some(avg);
    }
}

/// Owns a backend and walks it through the
/// init → create → frames → terminate lifecycle.
pub struct Shim<B: Backend> {
    backend: B,
    config: ShimConfig,
    state: State,
    clear: ClearEntry,
    stats: FrameStats,
    loop_installed: bool,
}

impl<B: Backend> Shim<B> {
    pub fn new(backend: B, config: ShimConfig) -> Shim<B> {
        return Shim {
            backend: backend,
            config: config,
            state: State::Uninitialized,
            clear: ClearEntry::Direct,
            stats: FrameStats::default(),
            loop_installed: false,
        };
    }

    pub fn state(&self) -> State {
        return self.state;
    }

    pub fn stats(&self) -> &FrameStats {
        return &self.stats;
    }

    pub fn config(&self) -> &ShimConfig {
        return &self.config;
    }

    pub fn clear_entry(&self) -> ClearEntry {
        return self.clear;
    }

    pub fn backend(&self) -> &B {
        return &self.backend;
    }

    pub fn backend_mut(&mut self) -> &mut B {
        return &mut self.backend;
    }

    fn expect(&self, op: &'static str, allowed: &[State]) -> Result<()> {
        if allowed.contains(&self.state) {
            return Ok(());
        }
        return Err(Error::InvalidState { op: op, state: self.state });
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.expect("initialize", &[State::Uninitialized])?;
        let surface = &self.config.surface;
        info!("Creating {}x{} context", surface.width, surface.height);
        self.backend.create_context(surface)?;
        if self.config.clear_path == ClearPath::Cached {
            match ClearEntry::resolve(&mut self.backend) {
                Ok(entry) => {
                    debug!("Cached glClear entry point: {:?}", entry);
                    self.clear = entry;
                },
                Err(e) => {
                    // Leave nothing behind on a failed init.
                    self.backend.destroy_context();
                    return Err(e);
                }
            };
        }
        self.state = State::Initialized;
        Ok(())
    }

    pub fn on_create(&mut self) -> Result<()> {
        self.expect("on_create", &[State::Initialized, State::Running])?;
        return self.backend.set_clear_color(self.config.clear_color);
    }

    // Marks the shim as handed over to a loop driver.
    // Only one driver may ever own the frames.
    pub fn enter_main_loop(&mut self) -> Result<()> {
        self.expect("install_main_loop", &[State::Initialized, State::Running])?;
        if self.loop_installed {
            return Err(Error::InvalidState { op: "install_main_loop", state: self.state });
        }
        self.loop_installed = true;
        self.state = State::Running;
        Ok(())
    }

    pub fn loop_installed(&self) -> bool {
        return self.loop_installed;
    }

    pub fn advance_frame(&mut self) -> Result<()> {
        self.expect("advance_frame", &[State::Initialized, State::Running])?;
        self.state = State::Running;
        let start = if self.config.timing { Some(Instant::now()) } else { None };
        self.clear.clear(&mut self.backend, ClearMask::COLOR)?;
        self.stats.record_clear(start.map(|s| s.elapsed()));
        if self.config.swap_buffers {
            self.backend.swap_buffers()?;
            self.stats.swaps += 1;
        }
        self.stats.frames += 1;
        let report_every = self.config.report_every.max(1);
        if self.config.timing && self.stats.frames % report_every == 0 {
            if let Some(avg) = self.stats.take_window() {
                debug!("frame {}: glClear averaged {:?} over the last {} frames",
                       self.stats.frames, avg, report_every);
            }
        }
        Ok(())
    }

    pub fn should_close(&mut self) -> bool {
        if self.state != State::Running && self.state != State::Initialized {
            return true;
        }
        return self.backend.should_close();
    }

    pub fn terminate(&mut self) -> Result<()> {
        self.expect("terminate", &[State::Initialized, State::Running])?;
        self.backend.destroy_context();
        self.clear = ClearEntry::Direct;
        self.state = State::Terminated;
        info!("Context released after {} frames", self.stats.frames);
        Ok(())
    }
}
