/// Audio sinks for the simulation's sound cues.
///
/// The core only raises `Sound` values; what they turn into is up to the
/// sink.  A terminal has no mixer, so the default sink rings the bell for the
/// cues that matter and stays quiet for jumps.

use std::io::Write;

use log::{trace, warn};

use crate::entities::Sound;

/// Fire-and-forget sound output.
pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

/// Discards every cue.
#[derive(Debug, Default)]
pub struct Muted;

impl AudioSink for Muted {
    fn play(&mut self, sound: Sound) {
        trace!("muted: {:?}", sound);
    }
}

/// Rings the terminal bell (BEL) on milestones and on death.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, sound: Sound) {
        match sound {
            Sound::Jump => {}
            Sound::Point | Sound::Die => {
                let res = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
                if let Err(e) = res {
                    warn!("bell failed: {}", e);
                }
            }
        }
    }
}
