//! Pairwise collision passes, run once per tick after every entity has
//! moved. All tests are circle-circle; bullets count as points. Each pass
//! breaks out of its inner loop on the first match for the outer element: a
//! bullet or the ship hits at most one target per tick.
//!
//! Pass order is fixed and load-bearing: player bullets clear rocks and
//! saucers before anything gets to hurt the ship.

use crate::audio::SoundCue;
use crate::game::asteroid::Asteroid;
use crate::game::Game;
use crate::geometry::Bounds;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Credit {
    Full,
    /// Kills the player had no hand in (saucer ramming a rock) pay half.
    Half,
}

pub fn resolve(game: &mut Game, bounds: Bounds) {
    player_bullets_vs_asteroids(game);
    player_bullets_vs_ufos(game);
    ufo_bullets_vs_ship(game, bounds);
    ship_vs_asteroids(game, bounds);
    ship_vs_ufos(game, bounds);
    ufos_vs_asteroids(game);
}

fn player_bullets_vs_asteroids(game: &mut Game) {
    let mut bi = 0;
    'bullets: while bi < game.bullets.len() {
        for ai in 0..game.asteroids.len() {
            let rock = &game.asteroids[ai];
            if game.bullets[bi].pos.distance(rock.pos) < rock.radius {
                game.bullets.remove(bi);
                destroy_asteroid(game, ai, Credit::Full);
                continue 'bullets;
            }
        }
        bi += 1;
    }
}

fn player_bullets_vs_ufos(game: &mut Game) {
    let mut bi = 0;
    'bullets: while bi < game.bullets.len() {
        for ui in 0..game.ufos.len() {
            let saucer = &game.ufos[ui];
            if !saucer.entered {
                continue;
            }
            if game.bullets[bi].pos.distance(saucer.pos) < saucer.radius(&game.tuning) {
                game.bullets.remove(bi);
                let saucer = game.ufos.remove(ui);
                game.award(saucer.points());
                game.spawn_ufo_explosion(saucer.pos);
                game.shake(game.tuning.screen_shake_duration);
                game.push_sound(SoundCue::UfoExplode);
                continue 'bullets;
            }
        }
        bi += 1;
    }
}

fn ufo_bullets_vs_ship(game: &mut Game, bounds: Bounds) {
    if game.game_over {
        return;
    }
    let ship_pos = game.ship.pos;
    let ship_radius = game.ship.radius(&game.tuning);
    for bi in 0..game.ufo_bullets.len() {
        if game.ufo_bullets[bi].pos.distance(ship_pos) < ship_radius {
            game.ufo_bullets.remove(bi);
            game.spawn_ship_explosion(ship_pos);
            game.shake(game.tuning.screen_shake_duration * 2.0);
            game.push_sound(SoundCue::ShipExplode);
            game.damage_ship(bounds);
            break;
        }
    }
}

fn ship_vs_asteroids(game: &mut Game, bounds: Bounds) {
    if game.game_over {
        return;
    }
    let ship_pos = game.ship.pos;
    let ship_radius = game.ship.radius(&game.tuning);
    for ai in 0..game.asteroids.len() {
        let rock = &game.asteroids[ai];
        if ship_pos.distance(rock.pos) < rock.radius + ship_radius {
            // Ramming a rock removes it outright; no split, no score.
            let rock = game.asteroids.remove(ai);
            game.spawn_ship_explosion(ship_pos);
            game.spawn_asteroid_explosion(rock.pos, rock.size);
            game.shake(game.tuning.screen_shake_duration * 2.0);
            game.push_sound(SoundCue::ShipExplode);
            game.damage_ship(bounds);
            break;
        }
    }
}

fn ship_vs_ufos(game: &mut Game, bounds: Bounds) {
    if game.game_over {
        return;
    }
    let ship_pos = game.ship.pos;
    let ship_radius = game.ship.radius(&game.tuning);
    for ui in 0..game.ufos.len() {
        let saucer = &game.ufos[ui];
        if !saucer.entered {
            continue;
        }
        if ship_pos.distance(saucer.pos) < saucer.radius(&game.tuning) + ship_radius {
            let saucer = game.ufos.remove(ui);
            game.award(saucer.points());
            game.spawn_ship_explosion(ship_pos);
            game.spawn_ufo_explosion(saucer.pos);
            game.shake(game.tuning.screen_shake_duration * 2.0);
            game.push_sound(SoundCue::ShipExplode);
            game.damage_ship(bounds);
            break;
        }
    }
}

fn ufos_vs_asteroids(game: &mut Game) {
    let mut ui = 0;
    'ufos: while ui < game.ufos.len() {
        if !game.ufos[ui].entered {
            ui += 1;
            continue;
        }
        let saucer_radius = game.ufos[ui].radius(&game.tuning);
        for ai in 0..game.asteroids.len() {
            let rock = &game.asteroids[ai];
            if game.ufos[ui].pos.distance(rock.pos) < rock.radius + saucer_radius {
                let saucer = game.ufos.remove(ui);
                game.award(saucer.points() / 2);
                game.spawn_ufo_explosion(saucer.pos);
                game.push_sound(SoundCue::UfoExplode);
                destroy_asteroid(game, ai, Credit::Half);
                continue 'ufos;
            }
        }
        ui += 1;
    }
}

/// Remove the rock at `index`, splitting tiers above 1 into two children at
/// the parent's position with fresh random velocity and shape, and apply
/// the score/particle/shake/sound effects of an asteroid kill.
fn destroy_asteroid(game: &mut Game, index: usize, credit: Credit) {
    let rock = game.asteroids.remove(index);
    if rock.size > 1 {
        for _ in 0..2 {
            let child = Asteroid::new(&mut game.rng, rock.pos, rock.size - 1, &game.tuning);
            game.asteroids.push(child);
        }
    }
    let points = match credit {
        Credit::Full => rock.points(),
        Credit::Half => rock.points() / 2,
    };
    game.award(points);
    game.spawn_asteroid_explosion(rock.pos, rock.size);
    game.shake(game.tuning.screen_shake_duration);
    game.push_sound(SoundCue::bang_for_size(rock.size));
}
