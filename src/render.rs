//! Braille-dot vector renderer. Each terminal cell carries a 2x4 grid of
//! braille dots, and the world is mapped so one cell is 8x16 world pixels
//! (one dot = 4x4). Everything is immediate-mode: the whole field is rebuilt
//! every frame from the current game state.

use std::collections::HashMap;

use rand::Rng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::game::Game;
use crate::geometry::{Bounds, Vec2};

/// World pixels per terminal cell; keeps cabinet-scale constants meaningful
/// on a character grid.
pub const PX_PER_CELL_X: f32 = 8.0;
pub const PX_PER_CELL_Y: f32 = 16.0;

const SHAKE_MAGNITUDE: f32 = 10.0;

const BG: Color = Color::Rgb(5, 5, 15);
const SHIP_COLOR: Color = Color::Rgb(220, 235, 255);
const ROCK_COLOR: Color = Color::Rgb(170, 155, 125);
const BULLET_COLOR: Color = Color::Rgb(255, 255, 120);
const UFO_BULLET_COLOR: Color = Color::Rgb(255, 120, 120);
const UFO_COLOR: Color = Color::Rgb(200, 120, 255);

/// Off-screen accumulation grid of braille cells over a solid background.
struct BrailleCanvas {
    cells_w: usize,
    cells_h: usize,
    dots_w: i32,
    dots_h: i32,
    grid: Vec<Vec<(char, Style)>>,
}

impl BrailleCanvas {
    fn new(cells_w: usize, cells_h: usize) -> Self {
        BrailleCanvas {
            cells_w,
            cells_h,
            dots_w: (cells_w * 2) as i32,
            dots_h: (cells_h * 4) as i32,
            grid: vec![vec![(' ', Style::default().bg(BG)); cells_w]; cells_h],
        }
    }

    fn bit(sub_x: usize, sub_y: usize) -> u8 {
        match (sub_x, sub_y) {
            (0, 0) => 0x01,
            (0, 1) => 0x02,
            (0, 2) => 0x04,
            (0, 3) => 0x40,
            (1, 0) => 0x08,
            (1, 1) => 0x10,
            (1, 2) => 0x20,
            (1, 3) => 0x80,
            _ => 0,
        }
    }

    fn set_dot(&self, map: &mut HashMap<(usize, usize), u8>, bx: i32, by: i32) {
        if bx < 0 || by < 0 || bx >= self.dots_w || by >= self.dots_h {
            return;
        }
        let key = (bx as usize / 2, by as usize / 4);
        *map.entry(key).or_insert(0) |= Self::bit(bx as usize % 2, by as usize % 4);
    }

    /// Bresenham over braille dots.
    fn line(&self, map: &mut HashMap<(usize, usize), u8>, x0: i32, y0: i32, x1: i32, y1: i32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut cx, mut cy) = (x0, y0);
        loop {
            self.set_dot(map, cx, cy);
            if cx == x1 && cy == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                err += dx;
                cy += sy;
            }
        }
    }

    /// Merge a dot layer into the grid with one color. Overlapping braille
    /// glyphs combine their dots; the newest color wins.
    fn commit(&mut self, map: HashMap<(usize, usize), u8>, color: Color, bold: bool) {
        for ((cx, cy), bits) in map {
            if cx >= self.cells_w || cy >= self.cells_h || bits == 0 {
                continue;
            }
            let mut style = Style::default().fg(color).bg(BG);
            if bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            let existing = self.grid[cy][cx].0 as u32;
            let merged = if (0x2800..0x2900).contains(&existing) {
                (existing - 0x2800) as u8 | bits
            } else {
                bits
            };
            let ch = char::from_u32(0x2800 + merged as u32).unwrap_or(' ');
            self.grid[cy][cx] = (ch, style);
        }
    }

    fn stroke_polygon(&mut self, pts: &[(i32, i32)], color: Color, bold: bool) {
        let mut map = HashMap::new();
        let n = pts.len();
        for i in 0..n {
            let (x0, y0) = pts[i];
            let (x1, y1) = pts[(i + 1) % n];
            self.line(&mut map, x0, y0, x1, y1);
        }
        self.commit(map, color, bold);
    }

    /// A square blob of dots, `size` dots on a side.
    fn blob(&mut self, bx: i32, by: i32, size: i32, color: Color, bold: bool) {
        let mut map = HashMap::new();
        for dx in 0..size.max(1) {
            for dy in 0..size.max(1) {
                self.set_dot(&mut map, bx + dx, by + dy);
            }
        }
        self.commit(map, color, bold);
    }

    fn scatter_stars(&mut self) {
        for yi in 0..self.cells_h {
            for xi in 0..self.cells_w {
                let hash = ((xi * 7 + yi * 13 + 37) * 31) % 250;
                if hash < 2 {
                    let b = 35 + (hash as u8) * 15;
                    self.grid[yi][xi] = ('.', Style::default().fg(Color::Rgb(b, b, b + 8)).bg(BG));
                }
            }
        }
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        self.grid
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Scale an RGB color toward black; the terminal has no real alpha channel.
fn dim(color: Color, alpha: f32) -> Color {
    let a = alpha.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * a) as u8,
            (g as f32 * a) as u8,
            (b as f32 * a) as u8,
        ),
        other => other,
    }
}

/// The field Bounds implied by a cell area.
pub fn bounds_for(area: Rect) -> Bounds {
    Bounds::new(
        area.width as f32 * PX_PER_CELL_X,
        area.height as f32 * PX_PER_CELL_Y,
    )
}

fn ship_outline(game: &Game) -> [Vec2; 3] {
    let size = game.tuning.ship_size;
    let dir = Vec2::from_degrees(game.ship.angle);
    let side = Vec2::from_degrees(game.ship.angle + 90.0);
    let pos = game.ship.pos;
    [
        pos + dir.scale(size),
        pos - dir.scale(size / 2.0) + side.scale(size / 2.0),
        pos - dir.scale(size / 2.0) - side.scale(size / 2.0),
    ]
}

fn ufo_outline(pos: Vec2, radius: f32) -> [Vec2; 6] {
    // Flat hexagonal hull, wider than tall.
    let r = radius;
    [
        pos + Vec2::new(-r, 0.0),
        pos + Vec2::new(-r / 2.0, -r / 2.0),
        pos + Vec2::new(r / 2.0, -r / 2.0),
        pos + Vec2::new(r, 0.0),
        pos + Vec2::new(r / 2.0, r / 2.5),
        pos + Vec2::new(-r / 2.0, r / 2.5),
    ]
}

fn render_field(game: &Game, area: Rect) -> Vec<Line<'static>> {
    let mut canvas = BrailleCanvas::new(area.width as usize, area.height as usize);
    canvas.scatter_stars();

    let bounds = bounds_for(area);
    let sx = canvas.dots_w as f32 / bounds.width;
    let sy = canvas.dots_h as f32 / bounds.height;

    // Screen-space shake translation, scaled by the remaining fraction.
    let shake = if game.screen_shake > 0.0 {
        let magnitude =
            SHAKE_MAGNITUDE * (game.screen_shake / game.tuning.screen_shake_duration).min(1.0);
        let mut rng = rand::thread_rng();
        Vec2::new(
            rng.gen::<f32>() * magnitude - magnitude / 2.0,
            rng.gen::<f32>() * magnitude - magnitude / 2.0,
        )
    } else {
        Vec2::ZERO
    };

    let to_dot = |p: Vec2| -> (i32, i32) {
        (
            ((p.x + shake.x) * sx) as i32,
            ((p.y + shake.y) * sy) as i32,
        )
    };

    for spark in &game.particles {
        let (bx, by) = to_dot(spark.pos);
        let size = spark.size.round().max(1.0) as i32;
        canvas.blob(bx, by, size, dim(spark.color, spark.alpha()), false);
    }

    for rock in &game.asteroids {
        let pts: Vec<(i32, i32)> = rock.vertices.iter().map(|v| to_dot(rock.pos + *v)).collect();
        canvas.stroke_polygon(&pts, ROCK_COLOR, false);
    }

    for saucer in &game.ufos {
        let pts: Vec<(i32, i32)> = ufo_outline(saucer.pos, saucer.radius(&game.tuning))
            .iter()
            .map(|p| to_dot(*p))
            .collect();
        canvas.stroke_polygon(&pts, UFO_COLOR, true);
    }

    for bullet in &game.bullets {
        let (bx, by) = to_dot(bullet.pos);
        canvas.blob(bx, by, 2, BULLET_COLOR, true);
    }
    for bullet in &game.ufo_bullets {
        let (bx, by) = to_dot(bullet.pos);
        canvas.blob(bx, by, 2, UFO_BULLET_COLOR, true);
    }

    if !game.game_over {
        let pts: Vec<(i32, i32)> = ship_outline(game).iter().map(|p| to_dot(*p)).collect();
        canvas.stroke_polygon(&pts, SHIP_COLOR, true);
    }

    canvas.into_lines()
}

fn status_line(game: &Game, muted: bool) -> Line<'static> {
    let lives_str = "\u{2666} ".repeat(game.lives as usize);
    let mut spans = vec![
        Span::styled(
            format!(" Score: {} ", game.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Lives: {}", lives_str),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("High: {} ", game.high_score),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Level: {} ", game.level),
            Style::default().fg(Color::Green),
        ),
    ];
    if muted {
        spans.push(Span::styled("| ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled("MUTED ", Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

fn help_line(game: &Game) -> Line<'static> {
    if game.game_over {
        return Line::from(vec![
            Span::styled(
                " GAME OVER ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("Final score: {} - ", game.score),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                "Enter to restart, Esc to quit",
                Style::default().fg(Color::Gray),
            ),
        ]);
    }
    Line::from(vec![
        Span::styled(" \u{2190}\u{2192} Rotate ", Style::default().fg(Color::DarkGray)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("\u{2191} Thrust ", Style::default().fg(Color::DarkGray)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled(
            "Space Shoot ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("M Mute ", Style::default().fg(Color::DarkGray)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("R Restart ", Style::default().fg(Color::DarkGray)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Esc Quit", Style::default().fg(Color::DarkGray)),
    ])
}

/// Draw the whole frame and report the field area the simulation should use
/// as its bounds next tick.
pub fn render(frame: &mut Frame, area: Rect, game: &Game, muted: bool) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(100, 200, 255)))
        .title(" Astrocade ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(130, 220, 255))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(status_line(game, muted)), chunks[0]);

    let field = chunks[1];
    if field.width > 0 && field.height > 0 {
        frame.render_widget(Paragraph::new(render_field(game, field)), field);
    }

    frame.render_widget(Paragraph::new(help_line(game)), chunks[2]);

    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_scale_cells_to_pixels() {
        let area = Rect::new(0, 0, 80, 24);
        let b = bounds_for(area);
        assert_eq!(b.width, 640.0);
        assert_eq!(b.height, 384.0);
    }

    #[test]
    fn dim_scales_rgb_toward_black() {
        assert_eq!(dim(Color::Rgb(200, 100, 50), 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(dim(Color::Rgb(200, 100, 50), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(dim(Color::Red, 0.5), Color::Red);
    }

    #[test]
    fn braille_bits_cover_all_subdots_uniquely() {
        let mut seen = std::collections::HashSet::new();
        for sx in 0..2 {
            for sy in 0..4 {
                let bit = BrailleCanvas::bit(sx, sy);
                assert_ne!(bit, 0);
                assert!(seen.insert(bit));
            }
        }
        assert_eq!(seen.len(), 8);
    }
}
