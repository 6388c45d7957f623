//! Event reader: dedicated thread polling terminal events.
//!
//! The reader converts crossterm events into [`InputEvent`]s and forwards
//! them over a crossbeam channel, so the main loop can `select!` over
//! input, ticks and its own data sources without blocking on the terminal.

use super::messages::{InputEvent, KeyCode, KeyModifiers, MouseButton, MouseEvent};
use super::worker::{stopping, Worker};
use crate::error::Result;
use crossbeam_channel::{SendTimeoutError, Sender};
use crossterm::event::{self as ct, Event, KeyEventKind};
use std::sync::atomic::AtomicBool;
use std::time::Duration;
use tracing::{debug, warn};

/// Forwards terminal input to a channel until stopped or dropped.
pub struct EventReader {
    worker: Worker,
}

impl EventReader {
    /// Start reading on a thread named `trellis-input`.
    ///
    /// `poll_timeout` bounds how long a stop request can go unnoticed.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> Result<Self> {
        let worker = Worker::spawn("trellis-input", move |flag| {
            while !stopping(flag) && pump(&sender, poll_timeout, flag) {}
            // A full channel must not keep the thread alive.
            let _ = sender.try_send(InputEvent::Shutdown);
        })?;
        Ok(Self { worker })
    }

    /// Ask the thread to stop without waiting for it.
    pub fn shutdown(&self) {
        self.worker.request_stop();
    }

    /// Stop the thread and wait for it to exit.
    pub fn join(mut self) {
        self.worker.stop_and_wait();
    }
}

/// Wait up to `timeout` for one event and forward it.
///
/// Returns `false` once the reader should exit: nobody is listening, or a
/// stop was requested while the channel was full.
fn pump(sender: &Sender<InputEvent>, timeout: Duration, flag: &AtomicBool) -> bool {
    let read = match ct::poll(timeout) {
        Ok(false) => return true,
        Ok(true) => ct::read(),
        Err(e) => Err(e),
    };
    let input = match read {
        Ok(event) => match convert_event(event) {
            Some(input) => input,
            None => return true,
        },
        Err(e) => {
            warn!(error = %e, "terminal input failed");
            InputEvent::Error(e.to_string())
        }
    };
    forward(sender, input, timeout, flag)
}

/// Send `input`, waiting out a full channel in `timeout` slices so a stop
/// request is still noticed.
fn forward(
    sender: &Sender<InputEvent>,
    mut input: InputEvent,
    timeout: Duration,
    flag: &AtomicBool,
) -> bool {
    loop {
        match sender.send_timeout(input, timeout) {
            Ok(()) => return true,
            Err(SendTimeoutError::Disconnected(_)) => {
                debug!("input receiver dropped, stopping reader");
                return false;
            }
            Err(SendTimeoutError::Timeout(unsent)) => {
                if stopping(flag) {
                    return false;
                }
                input = unsent;
            }
        }
    }
}

/// Translate a crossterm event; `None` when it has no [`InputEvent`] form.
pub(crate) fn convert_event(event: Event) -> Option<InputEvent> {
    Some(match event {
        // Release and repeat are reported by some terminals; only presses count.
        Event::Key(key) if key.kind != KeyEventKind::Press => return None,
        Event::Key(key) => InputEvent::Key {
            code: KeyCode::try_from(key.code).ok()?,
            modifiers: key.modifiers.into(),
        },
        Event::Mouse(mouse) => return mouse_event(&mouse),
        Event::Resize(width, height) => InputEvent::Resize { width, height },
        Event::FocusGained => InputEvent::FocusGained,
        Event::FocusLost => InputEvent::FocusLost,
        Event::Paste(text) => InputEvent::Paste(text),
    })
}

impl TryFrom<ct::KeyCode> for KeyCode {
    type Error = ();

    fn try_from(code: ct::KeyCode) -> std::result::Result<Self, ()> {
        Ok(match code {
            ct::KeyCode::Char(c) => Self::Char(c),
            ct::KeyCode::F(n) => Self::F(n),
            ct::KeyCode::Up => Self::Up,
            ct::KeyCode::Down => Self::Down,
            ct::KeyCode::Left => Self::Left,
            ct::KeyCode::Right => Self::Right,
            ct::KeyCode::Home => Self::Home,
            ct::KeyCode::End => Self::End,
            ct::KeyCode::PageUp => Self::PageUp,
            ct::KeyCode::PageDown => Self::PageDown,
            ct::KeyCode::Enter => Self::Enter,
            ct::KeyCode::Tab => Self::Tab,
            ct::KeyCode::BackTab => Self::BackTab,
            ct::KeyCode::Backspace => Self::Backspace,
            ct::KeyCode::Delete => Self::Delete,
            ct::KeyCode::Insert => Self::Insert,
            ct::KeyCode::Esc => Self::Esc,
            _ => return Err(()),
        })
    }
}

impl From<ct::KeyModifiers> for KeyModifiers {
    fn from(held: ct::KeyModifiers) -> Self {
        Self {
            shift: held.contains(ct::KeyModifiers::SHIFT),
            control: held.contains(ct::KeyModifiers::CONTROL),
            alt: held.contains(ct::KeyModifiers::ALT),
        }
    }
}

impl From<ct::MouseButton> for MouseButton {
    fn from(button: ct::MouseButton) -> Self {
        match button {
            ct::MouseButton::Left => Self::Left,
            ct::MouseButton::Right => Self::Right,
            ct::MouseButton::Middle => Self::Middle,
        }
    }
}

fn mouse_event(mouse: &ct::MouseEvent) -> Option<InputEvent> {
    let (x, y) = (mouse.column, mouse.row);
    let pointer = |button: Option<ct::MouseButton>| MouseEvent {
        x,
        y,
        button: button.map(MouseButton::from),
        modifiers: mouse.modifiers.into(),
    };
    Some(match mouse.kind {
        ct::MouseEventKind::Down(b) => InputEvent::MouseDown(pointer(Some(b))),
        ct::MouseEventKind::Up(b) => InputEvent::MouseUp(pointer(Some(b))),
        ct::MouseEventKind::Drag(b) => InputEvent::MouseMove(pointer(Some(b))),
        ct::MouseEventKind::Moved => InputEvent::MouseMove(pointer(None)),
        ct::MouseEventKind::ScrollUp => InputEvent::MouseScroll { x, y, delta: 1 },
        ct::MouseEventKind::ScrollDown => InputEvent::MouseScroll { x, y, delta: -1 },
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use crossterm::event::KeyEvent;
    use std::thread;

    fn key(code: ct::KeyCode, held: ct::KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, held))
    }

    #[test]
    fn test_ctrl_c_id() {
        let input = convert_event(key(ct::KeyCode::Char('c'), ct::KeyModifiers::CONTROL)).unwrap();
        assert_eq!(input.id(), "<C-c>");
    }

    #[test]
    fn test_only_presses_forwarded() {
        let mut release = KeyEvent::new(ct::KeyCode::Char('q'), ct::KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(convert_event(Event::Key(release)).is_none());
    }

    #[test]
    fn test_unmapped_key_dropped() {
        assert!(convert_event(key(ct::KeyCode::CapsLock, ct::KeyModifiers::NONE)).is_none());
    }

    #[test]
    fn test_mouse_click_position() {
        let click = ct::MouseEvent {
            kind: ct::MouseEventKind::Down(ct::MouseButton::Left),
            column: 4,
            row: 7,
            modifiers: ct::KeyModifiers::NONE,
        };
        let input = convert_event(Event::Mouse(click)).unwrap();
        assert_eq!(input.id(), "<MouseLeft>");
        let InputEvent::MouseDown(pointer) = input else {
            panic!("expected a mouse down");
        };
        assert_eq!((pointer.x, pointer.y), (4, 7));
    }

    #[test]
    fn test_wheel_direction() {
        let wheel = ct::MouseEvent {
            kind: ct::MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: ct::KeyModifiers::NONE,
        };
        assert_eq!(convert_event(Event::Mouse(wheel)).unwrap().id(), "<MouseWheelDown>");
    }

    #[test]
    fn test_resize_carries_size() {
        assert_eq!(
            convert_event(Event::Resize(100, 30)),
            Some(InputEvent::Resize { width: 100, height: 30 })
        );
    }

    #[test]
    fn test_forward_gives_up_when_stopping() {
        let (tx, rx) = bounded(1);
        tx.send(InputEvent::FocusGained).unwrap();
        let flag = AtomicBool::new(true);

        let keep_going = forward(&tx, InputEvent::FocusLost, Duration::from_millis(1), &flag);
        assert!(!keep_going);
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn test_forward_waits_for_room() {
        let (tx, rx) = bounded(1);
        tx.send(InputEvent::FocusGained).unwrap();
        let flag = AtomicBool::new(false);

        let drain = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            let first = rx.recv().unwrap();
            (first, rx.recv().unwrap())
        });
        assert!(forward(&tx, InputEvent::FocusLost, Duration::from_millis(1), &flag));
        assert_eq!(drain.join().unwrap(), (InputEvent::FocusGained, InputEvent::FocusLost));
    }

    #[test]
    fn test_join_with_unread_events() {
        // Whatever the reader produces here (events or poll errors without a
        // tty), nobody reads them and the channel stays full.
        let (tx, rx) = bounded(2);
        let reader = EventReader::spawn(tx, Duration::from_millis(1)).unwrap();
        thread::sleep(Duration::from_millis(50));

        let (done_tx, done_rx) = bounded(1);
        thread::spawn(move || {
            reader.join();
            let _ = done_tx.send(());
        });
        assert!(done_rx.recv_timeout(Duration::from_secs(2)).is_ok());
        drop(rx);
    }
}
