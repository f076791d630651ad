use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::audio::{SilentAudio, SoundDirector};
use crate::config::Tuning;
use crate::game::Game;
use crate::input::InputState;
use crate::render;
use crate::scores::HighScoreFile;

/// Longest delta we will feed the simulation; a suspended terminal should
/// not become a single giant integration step.
const MAX_DT: f32 = 0.1;

pub struct App {
    pub should_quit: bool,
    pub paused: bool,
    pub game: Game,
    pub director: SoundDirector,
    input: InputState,
    scores: HighScoreFile,
    /// Field area from the last draw; its size defines the world bounds for
    /// the next tick, so a resize takes effect immediately.
    field_area: Rect,
    last_tick: Instant,
}

impl App {
    pub fn new(tuning: Tuning) -> Self {
        let scores = HighScoreFile::load();
        let field_area = Rect::new(0, 0, 80, 22);
        let mut game = Game::new(tuning, render::bounds_for(field_area));
        game.high_score = scores.best();
        info!(high_score = scores.best(), "session started");

        App {
            should_quit: false,
            paused: false,
            game,
            director: SoundDirector::new(Box::new(SilentAudio)),
            input: InputState::default(),
            scores,
            field_area,
            last_tick: Instant::now(),
        }
    }

    pub fn on_tick(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f32().min(MAX_DT);
        self.last_tick = now;

        if self.paused {
            self.input.clear();
            return;
        }

        let bounds = render::bounds_for(self.field_area);
        let input = self.input;
        let cues = self.game.tick(dt, bounds, input);

        self.director
            .set_thrusting(input.thrust && !self.game.game_over);
        self.director.update_beat(dt);
        for cue in cues {
            self.director.play(cue);
        }

        self.scores.record(self.game.high_score);
        self.input.clear();
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.director.toggle_mute();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.restart();
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if !self.game.game_over {
                    self.paused = !self.paused;
                }
            }
            KeyCode::Enter if self.game.game_over => {
                self.restart();
            }
            _ => {
                if !self.game.game_over && !self.paused {
                    self.input.record(key);
                }
            }
        }
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "terminal resized");
    }

    /// Remember where the field was drawn; called by the main loop after
    /// each frame.
    pub fn set_field_area(&mut self, area: Rect) {
        self.field_area = area;
    }

    fn restart(&mut self) {
        info!(final_score = self.game.score, "restart");
        self.paused = false;
        self.game.reset(render::bounds_for(self.field_area));
    }
}
