// PixelPanel
// copyright PixelPanel developers 2026

//! Animation scheduler.
//!
//! Each animating panel owns one background thread. The thread gets a
//! CancelToken at spawn time and polls it once per loop iteration, so a
//! stop request takes effect at the top of the next iteration. A device
//! push in flight is never interrupted.
//!
//! Per panel state machine:
//!
//! Idle --start--> Running --cancel--> Stopping --exit--> Idle
//!                    |
//!                    +--loop count reached--> Idle
//!
//! The Animator slot is the single owner of a panel's task. Every render
//! path (static fill, new animation, clear) locks the slot, stops the old
//! task and waits for its thread to exit before touching the canvas, so
//! frames of one panel are never interleaved.

use crate::error::{PanelError, PanelResult};
use crate::panel::Display;
use crate::render::{canvas::fit, CompositedAnimation};
use image::imageops::FilterType;
use log::{error, warn};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Condvar, Mutex, MutexGuard,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Running,
    Stopping,
}

/// Cooperative stop flag handed to an animation thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Set once when the animation thread exits, normally or by panic.
#[derive(Debug, Default)]
struct ExitSignal {
    done: Mutex<bool>,
    cond: Condvar,
}

impl ExitSignal {
    fn set(&self) {
        let mut done = self.done.lock().unwrap_or_else(|e| e.into_inner());
        *done = true;
        self.cond.notify_all();
    }

    fn is_set(&self) -> bool {
        *self.done.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn wait(&self) {
        let mut done = self.done.lock().unwrap_or_else(|e| e.into_inner());
        while !*done {
            done = self.cond.wait(done).unwrap_or_else(|e| e.into_inner());
        }
    }
}

struct ExitGuard(Arc<ExitSignal>);

impl Drop for ExitGuard {
    fn drop(&mut self) {
        self.0.set();
    }
}

/// A running (or finished) animation thread.
pub struct AnimationTask {
    token: CancelToken,
    exit: Arc<ExitSignal>,
    handle: Option<JoinHandle<()>>,
}

impl AnimationTask {
    pub fn spawn<F>(name: String, body: F) -> PanelResult<Self>
    where
        F: FnOnce(CancelToken) + Send + 'static,
    {
        let token = CancelToken::new();
        let exit = Arc::new(ExitSignal::default());
        let (t, e) = (token.clone(), Arc::clone(&exit));
        let handle = thread::Builder::new()
            .name(name)
            .spawn(move || {
                let _guard = ExitGuard(e);
                body(t);
            })
            .map_err(PanelError::Io)?;
        Ok(Self {
            token,
            exit,
            handle: Some(handle),
        })
    }

    pub fn state(&self) -> AnimationState {
        if self.exit.is_set() {
            AnimationState::Idle
        } else if self.token.is_cancelled() {
            AnimationState::Stopping
        } else {
            AnimationState::Running
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// cancel and block until the thread has exited
    pub fn stop(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.join() {
                error!("animation thread panicked: {:?}", e);
            }
        }
    }
}

/// Per panel owner of the animation task.
#[derive(Default)]
pub struct Animator {
    slot: Mutex<Option<AnimationTask>>,
}

/// Exclusive access to a panel's render path, held while rendering.
pub struct AnimatorGuard<'a> {
    slot: MutexGuard<'a, Option<AnimationTask>>,
}

impl<'a> AnimatorGuard<'a> {
    /// stop whatever is running and wait for its thread to exit
    pub fn stop(&mut self) {
        if let Some(task) = self.slot.take() {
            task.stop();
        }
    }

    /// Replace the current task. Stops the old one first.
    pub fn start(&mut self, task: AnimationTask) {
        self.stop();
        *self.slot = Some(task);
    }
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> AnimatorGuard<'_> {
        AnimatorGuard {
            slot: self.slot.lock().unwrap_or_else(|e| e.into_inner()),
        }
    }

    pub fn state(&self) -> AnimationState {
        self.lock()
            .slot
            .as_ref()
            .map_or(AnimationState::Idle, |t| t.state())
    }

    /// Request a stop without waiting. The thread exits at its next
    /// iteration, the next render path joins it.
    pub fn cancel(&self) {
        if let Some(task) = self.lock().slot.as_ref() {
            task.cancel();
        }
    }

    /// stop and wait for the thread to exit
    pub fn stop(&self) {
        self.lock().stop();
    }

    /// Block until the current animation ends on its own or is stopped.
    /// Does not keep the slot locked while waiting.
    pub fn wait(&self) {
        let exit = self
            .lock()
            .slot
            .as_ref()
            .map(|t| Arc::clone(&t.exit));
        if let Some(exit) = exit {
            exit.wait();
        }
    }
}

// a dropped panel must not leave its thread pushing frames
impl Drop for Animator {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlayStats {
    /// frames accepted by the device
    pub pushed: u64,
    /// frames lost to transport errors
    pub dropped: u64,
    /// completed passes over the frame sequence
    pub loops: u32,
}

/// Frame loop of one animation, runs on the animation thread.
///
/// Frame `i` is shown once the delay of the previously shown frame has
/// elapsed. Waiting spins on the cancel token without sleeping. After the
/// last frame the loop counter goes up, a non-zero loop count ends the
/// animation once reached.
pub fn play(display: &Display, anim: &CompositedAnimation, token: &CancelToken) -> PlayStats {
    let mut stats = PlayStats::default();
    if anim.frames.is_empty() {
        return stats;
    }
    let (width, height) = display.geometry();

    let mut i = 0;
    let mut last: Option<Instant> = None;
    while !token.is_cancelled() {
        if let Some(t) = last {
            if t.elapsed() < Duration::from_millis(anim.delay_ms(i - 1)) {
                thread::yield_now();
                continue;
            }
        }

        if i == anim.frames.len() {
            i = 0;
            stats.loops += 1;
            if anim.loop_count != 0 && stats.loops >= anim.loop_count {
                break;
            }
        }

        let frame = fit(&anim.frames[i], width, height, FilterType::Lanczos3);
        match display.render(&frame) {
            Ok(()) => stats.pushed += 1,
            Err(e) => {
                stats.dropped += 1;
                warn!("{}: frame {} dropped: {}", display.address(), i, e);
            }
        }

        last = Some(Instant::now());
        i += 1;
    }
    stats
}
