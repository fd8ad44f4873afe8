//! Line-oriented event input.
//!
//! Stdin is read on a dedicated OS thread: a blocking read cannot be
//! cancelled, so it must never sit on the async runtime that has to shut
//! down on Ctrl-C.

use std::io::{self, BufRead};

use scenehub_app::event_queue::EventQueue;
use scenehub_domain::event::Event;

/// Forward every `<event_type> [device]` line of `input` to the queue.
/// Blank lines and `#` comments are ignored; malformed lines are logged.
///
/// Stops at end of input, on a read error, or once the queue is closed.
/// Returns the number of events submitted.
pub fn read_event_lines(input: impl BufRead, queue: &EventQueue) -> usize {
    let mut submitted = 0;
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read input");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.parse::<Event>() {
            Ok(event) => {
                if queue.blocking_submit(event).is_err() {
                    tracing::debug!("event queue closed, input reader stopping");
                    break;
                }
                submitted += 1;
            }
            Err(err) => tracing::warn!(%line, error = %err, "malformed event line"),
        }
    }
    submitted
}

/// Start the stdin reader thread. The queue handle is dropped at end of
/// input, which lets the event loop drain and stop.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn_stdin_reader(queue: EventQueue) -> io::Result<()> {
    std::thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            let submitted = read_event_lines(io::stdin().lock(), &queue);
            tracing::debug!(submitted, "stdin closed");
        })?;
    Ok(())
}
