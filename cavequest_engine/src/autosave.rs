//! Periodic background autosave.
//!
//! The game loop never shares its world with the autosave thread. After each
//! turn it submits an immutable [`SaveSnapshot`] over a channel; the thread keeps
//! only the newest one and writes it to the autosave slot on the next tick.
//! Ticks with nothing new write nothing.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::save_files::{AUTOSAVE_SLOT, SaveSnapshot, write_snapshot};

/// Handle to the running autosave thread.
pub struct Autosaver {
    sender: Option<Sender<SaveSnapshot>>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Autosaver {
    /// Start the autosave thread, writing into `save_dir` every `interval`.
    ///
    /// # Errors
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(save_dir: PathBuf, interval: Duration) -> Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let handle = thread::Builder::new()
            .name("autosave".to_string())
            .spawn(move || autosave_loop(&receiver, &flag, &save_dir, interval))
            .context("spawning autosave thread")?;
        info!("autosave thread started (every {}s)", interval.as_secs_f32());
        Ok(Self {
            sender: Some(sender),
            running,
            handle: Some(handle),
        })
    }

    /// Hand the latest game state to the autosave thread.
    pub fn submit(&self, snapshot: SaveSnapshot) {
        if let Some(sender) = &self.sender
            && sender.send(snapshot).is_err()
        {
            warn!("autosave thread is gone; snapshot dropped");
        }
    }

    /// Stop the thread and wait for it to finish.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        // dropping the sender wakes the thread immediately
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("autosave thread panicked");
            }
            info!("autosave thread stopped");
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        self.stop();
    }
}

fn autosave_loop(receiver: &Receiver<SaveSnapshot>, running: &AtomicBool, save_dir: &Path, interval: Duration) {
    let mut latest: Option<SaveSnapshot> = None;
    let mut next_tick = Instant::now() + interval;
    loop {
        let wait = next_tick.saturating_duration_since(Instant::now());
        match receiver.recv_timeout(wait) {
            Ok(snapshot) => latest = Some(snapshot),
            Err(RecvTimeoutError::Timeout) => {},
            Err(RecvTimeoutError::Disconnected) => break,
        }
        if !running.load(Ordering::SeqCst) {
            break;
        }
        let now = Instant::now();
        if now < next_tick {
            continue;
        }
        next_tick = now + interval;
        if let Some(snapshot) = latest.take() {
            match write_snapshot(&snapshot, save_dir, AUTOSAVE_SLOT) {
                Ok(path) => info!("game autosaved to {}", path.display()),
                Err(err) => warn!("autosave failed: {err:#}"),
            }
        }
    }
}
