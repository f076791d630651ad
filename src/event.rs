use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};

pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Background thread that multiplexes terminal input and a fixed frame
/// pulse onto one channel. The pulse only paces the loop; the simulation
/// measures its own delta time, so a late tick just means a larger `dt`.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                let forwarded = match event::read() {
                    Ok(crossterm::event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        tx.send(Event::Key(key))
                    }
                    Ok(crossterm::event::Event::Resize(w, h)) => tx.send(Event::Resize(w, h)),
                    _ => Ok(()),
                };
                if forwarded.is_err() {
                    return;
                }
            } else if tx.send(Event::Tick).is_err() {
                return;
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
