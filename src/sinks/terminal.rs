//! Terminal renderer with a flash and bell on every pulse

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::{runtime::Handle, time::Instant};
use tracing::{debug, warn};

use super::cue::FLASH_DURATION;
use super::{PresentationSink, SinkError};
use crate::state::TimerSnapshot;

const BELL: &str = "\x07";
const CLEAR_LINE: &str = "\r\x1b[2K";
const INVERSE: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";

/// Audio output state; terminals start suspended until the user interacts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AudioState {
    Suspended,
    Running,
}

/// The drawn line, shared with the task that ends a flash
struct Screen<W> {
    out: W,
    last: Option<TimerSnapshot>,
    flash_until: Option<Instant>,
    /// Bumped on every pulse so an older un-flash timer leaves a newer flash alone
    flash_seq: u64,
}

impl<W: Write> Screen<W> {
    fn is_flashing(&self) -> bool {
        self.flash_until.map_or(false, |until| Instant::now() < until)
    }

    fn draw(&mut self, snapshot: &TimerSnapshot) -> std::io::Result<()> {
        self.last = Some(*snapshot);
        let line = status_line(snapshot);
        if self.is_flashing() {
            write!(self.out, "{}{}{}{}", CLEAR_LINE, INVERSE, line, RESET)?;
        } else {
            self.flash_until = None;
            write!(self.out, "{}{}", CLEAR_LINE, line)?;
        }
        self.out.flush()
    }

    /// Drop the flash and redraw the last frame plainly
    fn end_flash(&mut self) -> std::io::Result<()> {
        self.flash_until = None;
        match self.last {
            Some(snapshot) => self.draw(&snapshot),
            None => Ok(()),
        }
    }
}

fn status_line(snapshot: &TimerSnapshot) -> String {
    let mut line = format!("{}  #{}", snapshot.main_display(), snapshot.pulse_count);
    if let Some(cooldown) = snapshot.cooldown_display() {
        line.push_str(&format!("  rest {}", cooldown));
    } else if !snapshot.running {
        line.push_str("  paused");
    }
    line
}

fn lock<W>(screen: &Mutex<Screen<W>>) -> MutexGuard<'_, Screen<W>> {
    screen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Redraws a single status line on every render.
///
/// A pulse inverts the line for [`FLASH_DURATION`] and rings the bell once
/// audio has been resumed. Inside a tokio runtime the flash is ended by a
/// timer of its own, whether or not another render arrives in between.
pub struct TerminalSink<W: Write + Send + 'static> {
    screen: Arc<Mutex<Screen<W>>>,
    audio: AudioState,
}

impl<W: Write + Send + 'static> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen {
                out,
                last: None,
                flash_until: None,
                flash_seq: 0,
            })),
            audio: AudioState::Suspended,
        }
    }

    fn schedule_flash_end(&self, seq: u64) {
        let Ok(handle) = Handle::try_current() else {
            return;
        };
        let screen = Arc::clone(&self.screen);
        handle.spawn(async move {
            tokio::time::sleep(FLASH_DURATION).await;
            let mut screen = lock(&screen);
            if screen.flash_seq == seq {
                if let Err(e) = screen.end_flash() {
                    warn!("Failed to clear terminal flash: {}", e);
                }
            }
        });
    }
}

impl TerminalSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send + 'static> PresentationSink for TerminalSink<W> {
    fn name(&self) -> &str {
        "terminal"
    }

    fn render(&mut self, snapshot: &TimerSnapshot) -> Result<(), SinkError> {
        lock(&self.screen).draw(snapshot)?;
        Ok(())
    }

    fn on_pulse(&mut self) -> Result<(), SinkError> {
        let seq = {
            let mut screen = lock(&self.screen);
            screen.flash_seq += 1;
            screen.flash_until = Some(Instant::now() + FLASH_DURATION);
            if self.audio == AudioState::Running {
                screen.out.write_all(BELL.as_bytes())?;
            }
            screen.flash_seq
        };
        self.schedule_flash_end(seq);
        Ok(())
    }

    fn on_cooldown_start(&mut self) -> Result<(), SinkError> {
        writeln!(lock(&self.screen).out)?;
        Ok(())
    }

    fn on_cooldown_end(&mut self) -> Result<(), SinkError> {
        writeln!(lock(&self.screen).out)?;
        Ok(())
    }

    fn on_user_interaction(&mut self) -> Result<(), SinkError> {
        if self.audio == AudioState::Suspended {
            debug!("Resuming terminal audio");
            self.audio = AudioState::Running;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::state::TimerState;

    /// Writer whose contents stay readable while the sink owns it
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }

        fn last_frame(&self) -> String {
            self.text().rsplit(CLEAR_LINE).next().unwrap_or_default().to_string()
        }
    }

    fn sink() -> (TerminalSink<SharedBuf>, SharedBuf) {
        let out = SharedBuf::default();
        (TerminalSink::new(out.clone()), out)
    }

    fn running(elapsed_seconds: u64) -> TimerSnapshot {
        TimerState {
            running: true,
            elapsed_seconds,
            pulse_count: elapsed_seconds / 6,
            ..TimerState::new()
        }
        .snapshot()
    }

    #[test]
    fn renders_paused_line() {
        let (mut sink, out) = sink();
        sink.render(&TimerSnapshot::default()).unwrap();
        assert_eq!(out.text(), format!("{}00:00:00  #0  paused", CLEAR_LINE));
    }

    #[test]
    fn renders_cooldown_countdown() {
        let state = TimerState {
            running: true,
            elapsed_seconds: 180,
            in_cooldown: true,
            cooldown_remaining_seconds: 75,
            pulse_count: 30,
        };
        let (mut sink, out) = sink();
        sink.render(&state.snapshot()).unwrap();
        assert!(out.text().ends_with("00:03:00  #30  rest 01:15"));
    }

    #[test]
    fn bell_waits_for_user_interaction() {
        let (mut sink, out) = sink();
        sink.on_pulse().unwrap();
        assert_eq!(out.text().matches(BELL).count(), 0);

        sink.on_user_interaction().unwrap();
        sink.on_pulse().unwrap();
        assert_eq!(out.text().matches(BELL).count(), 1);
    }

    #[test]
    fn pulse_render_is_inverted() {
        let (mut sink, out) = sink();
        sink.on_pulse().unwrap();
        sink.render(&running(6)).unwrap();
        assert!(out.last_frame().starts_with(INVERSE));
    }

    #[tokio::test(start_paused = true)]
    async fn flash_ends_after_fixed_duration_without_a_tick() {
        let (mut sink, out) = sink();
        sink.on_pulse().unwrap();
        sink.render(&running(6)).unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        let paused = TimerState { running: false, ..TimerState::new() }.snapshot();
        sink.render(&paused).unwrap();
        assert!(out.last_frame().starts_with(INVERSE));

        tokio::time::sleep(Duration::from_millis(700)).await;
        let frame = out.last_frame();
        assert!(!frame.contains(INVERSE), "still inverted: {:?}", frame);
        assert!(frame.ends_with("paused"));
    }

    #[tokio::test(start_paused = true)]
    async fn newer_pulse_keeps_its_own_flash() {
        let (mut sink, out) = sink();
        sink.on_pulse().unwrap();
        sink.render(&running(6)).unwrap();

        tokio::time::sleep(Duration::from_millis(300)).await;
        sink.on_pulse().unwrap();
        sink.render(&running(12)).unwrap();

        // First pulse's timer fires at 500ms and must not end the second flash
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(out.last_frame().starts_with(INVERSE));

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!out.last_frame().contains(INVERSE));
    }
}
