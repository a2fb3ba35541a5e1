use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::deadline::Deadline;
use crate::display::GameDisplay;
use crate::error::GameError;

/// Result of a single bounded wait for a line of input.
#[derive(Debug)]
pub enum ReadOutcome {
    Expired,
    Line(String),
    Error(io::Error),
}

/// Source of whole input lines.
pub trait LineSource {
    /// Block for up to `timeout` waiting for a line; `None` waits until one
    /// arrives or the source fails.
    fn await_line(&mut self, timeout: Option<Duration>) -> ReadOutcome;
}

/// Line source fed by a channel. Production input comes from a stdin reader
/// thread; tests push lines directly.
pub struct ChannelLineSource {
    rx: Receiver<io::Result<String>>,
}

impl ChannelLineSource {
    pub fn new(rx: Receiver<io::Result<String>>) -> Self {
        Self { rx }
    }

    /// Spawn a thread that forwards stdin line by line.
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let stdin = io::stdin();
            let mut lock = stdin.lock();
            loop {
                let msg = read_line(&mut lock);
                let stop = msg.is_err();
                if tx.send(msg).is_err() || stop {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl LineSource for ChannelLineSource {
    fn await_line(&mut self, timeout: Option<Duration>) -> ReadOutcome {
        let received = match timeout {
            Some(t) => self.rx.recv_timeout(t),
            None => self.rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(Ok(line)) => ReadOutcome::Line(line),
            Ok(Err(e)) => ReadOutcome::Error(e),
            Err(RecvTimeoutError::Timeout) => ReadOutcome::Expired,
            Err(RecvTimeoutError::Disconnected) => {
                ReadOutcome::Error(io::Error::from(io::ErrorKind::UnexpectedEof))
            }
        }
    }
}

/// Read one line, dropping the trailing `\n` or `\r\n`. End of input is an
/// error: nothing more will ever arrive.
pub fn read_line<B: BufRead>(reader: &mut B) -> io::Result<String> {
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
    }
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}

/// Wait for a line for at most what is left on `deadline`, then charge the
/// wall-clock time actually spent to it, whatever the outcome.
pub fn await_and_read<S: LineSource + ?Sized>(
    source: &mut S,
    deadline: &mut Deadline,
) -> ReadOutcome {
    if deadline.is_expired() {
        return ReadOutcome::Expired;
    }
    let started = Instant::now();
    let outcome = source.await_line(Some(deadline.remaining()));
    deadline.consume(started.elapsed());
    outcome
}

/// Wait (without a deadline) for an integer in `[min, max]`, re-prompting
/// until one arrives.
pub fn read_int_in_range<S, D>(
    source: &mut S,
    display: &mut D,
    min: i64,
    max: i64,
) -> Result<i64, GameError>
where
    S: LineSource + ?Sized,
    D: GameDisplay + ?Sized,
{
    loop {
        match source.await_line(None) {
            ReadOutcome::Line(line) => match leading_int(&line) {
                Some(n) if (min..=max).contains(&n) => return Ok(n),
                _ => display.message(&format!(
                    "Integer out of the expected range! Enter a value in [{min}, {max}]: "
                )),
            },
            ReadOutcome::Error(e) => return Err(e.into()),
            ReadOutcome::Expired => {}
        }
    }
}

/// Integer at the start of `line` (after leading whitespace, with an
/// optional sign); trailing text is ignored, so "3 jogadores" reads as 3.
pub fn leading_int(line: &str) -> Option<i64> {
    let s = line.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len() - sign_len);
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}
