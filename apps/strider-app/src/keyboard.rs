//! Stdin key listener.
//!
//! A background thread reads lines from stdin and feeds every character
//! through the command bindings into the shared [`CommandState`]. The
//! control loop never blocks on input; it just reads the command once per
//! macro-step.

use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use tracing::debug;

use strider_control::command::{CommandBindings, CommandState};

/// Handle to the listener thread.
///
/// Dropping the handle leaves the thread running until process exit;
/// call [`stop`](Self::stop) after the control loop returns.
pub struct KeyListener {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl KeyListener {
    /// Spawn the listener thread.
    pub fn spawn(commands: Arc<CommandState>, bindings: CommandBindings) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            let stdin = std::io::stdin();
            let mut line = String::new();
            while !flag.load(Ordering::Relaxed) {
                line.clear();
                match stdin.lock().read_line(&mut line) {
                    Ok(0) | Err(_) => break, // EOF or unreadable stdin
                    Ok(_) => {
                        for key in line.trim().chars() {
                            if bindings.apply(&commands, key) {
                                debug!(%key, command = ?commands.get(), "command adjusted");
                            }
                        }
                    }
                }
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stop accepting input.
    ///
    /// The reader thread observes the flag after its current blocking read,
    /// i.e. on the next input line or EOF; it is detached rather than
    /// joined so shutdown never waits on the terminal.
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        drop(self.handle.take());
    }
}
