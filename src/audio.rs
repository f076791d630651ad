//! Fire-and-forget sound boundary.
//!
//! The simulation emits [`SoundCue`]s; the [`SoundDirector`] owns the mute
//! flag, the looping-thrust latch, and the fixed-tempo background beat, and
//! forwards everything to an [`AudioSink`]. Sink failures are the sink's
//! problem: nothing here can affect score, collisions, or timers.

use tracing::trace;

/// Everything the game can ask the audio boundary to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Fire,
    BangLarge,
    BangMedium,
    BangSmall,
    ShipExplode,
    UfoExplode,
    LevelClear,
    Beat1,
    Beat2,
}

impl SoundCue {
    /// Bang cue for an asteroid tier.
    pub fn bang_for_size(size: u8) -> SoundCue {
        match size {
            3 => SoundCue::BangLarge,
            2 => SoundCue::BangMedium,
            _ => SoundCue::BangSmall,
        }
    }

    pub fn clip_name(self) -> &'static str {
        match self {
            SoundCue::Fire => "fire",
            SoundCue::BangLarge => "bangLarge",
            SoundCue::BangMedium => "bangMedium",
            SoundCue::BangSmall => "bangSmall",
            SoundCue::ShipExplode => "shipExplode",
            SoundCue::UfoExplode => "ufoExplode",
            SoundCue::LevelClear => "levelClear",
            SoundCue::Beat1 => "beat1",
            SoundCue::Beat2 => "beat2",
        }
    }
}

/// Playback backend. Implementations must swallow their own failures.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue, volume: f32);
    fn start_thrust(&mut self);
    fn stop_thrust(&mut self);
}

/// Default sink for a terminal session: no audio device, so cues are traced
/// and dropped. Keeps the boundary honest without a sound card.
#[derive(Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        trace!(clip = cue.clip_name(), volume, "play");
    }

    fn start_thrust(&mut self) {
        trace!("thrust loop on");
    }

    fn stop_thrust(&mut self) {
        trace!("thrust loop off");
    }
}

const BEAT_INTERVAL: f32 = 0.5; // fixed tempo, unaffected by game state

pub struct SoundDirector {
    sink: Box<dyn AudioSink>,
    muted: bool,
    thrust_on: bool,
    beat_timer: f32,
    next_beat_is_first: bool,
}

impl SoundDirector {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        SoundDirector {
            sink,
            muted: false,
            thrust_on: false,
            beat_timer: 0.0,
            next_beat_is_first: true,
        }
    }

    pub fn play(&mut self, cue: SoundCue) {
        self.play_at(cue, 1.0);
    }

    pub fn play_at(&mut self, cue: SoundCue, volume: f32) {
        if self.muted {
            return;
        }
        self.sink.play(cue, volume);
    }

    /// Keep the looping thrust clip in sync with whether the key is held.
    pub fn set_thrusting(&mut self, thrusting: bool) {
        let want = thrusting && !self.muted;
        if want && !self.thrust_on {
            self.sink.start_thrust();
        } else if !want && self.thrust_on {
            self.sink.stop_thrust();
        }
        self.thrust_on = want;
    }

    /// Advance the two-phase heartbeat. Tempo is fixed at half a second.
    pub fn update_beat(&mut self, dt: f32) {
        self.beat_timer += dt;
        if self.beat_timer >= BEAT_INTERVAL {
            self.beat_timer = 0.0;
            let cue = if self.next_beat_is_first {
                SoundCue::Beat1
            } else {
                SoundCue::Beat2
            };
            self.next_beat_is_first = !self.next_beat_is_first;
            self.play_at(cue, 0.3);
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        if self.muted && self.thrust_on {
            self.sink.stop_thrust();
            self.thrust_on = false;
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}
