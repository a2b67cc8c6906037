//! Per-frame simulation step
//!
//! Advances the game state machine by one frame. Resolution order inside a
//! running frame is fixed: blocks, then paddle, then miss detection, then the
//! clock, speed ramp, ball movement and gold-block timer.

use super::collision::{HitSide, ball_missed, classify_block_hit, paddle_offset};
use super::state::{Direction, GameEvent, GamePhase, GameState};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer x position (pointer control mode)
    pub pointer_x: Option<f32>,
    /// Held steering keys (keyboard control mode)
    pub steer_left: bool,
    pub steer_right: bool,
    /// Launch the parked ball (space / primary click)
    pub launch: bool,
}

/// Advance the game state by one frame at `game_time` (ms)
pub fn tick(state: &mut GameState, input: &TickInput, game_time: u64) {
    state.game_time = game_time;

    if state.phase.is_terminal() {
        return;
    }

    if let Some(x) = input.pointer_x {
        state.paddle.follow_pointer(x);
    }
    state.paddle.steer(input.steer_left, input.steer_right);
    state.paddle.update();

    if state.phase == GamePhase::NewGame {
        if !input.launch {
            state.ball.park_on(&state.paddle);
            return;
        }
        launch(state, game_time);
    }

    step_running(state, game_time);
}

fn launch(state: &mut GameState, game_time: u64) {
    state.ball.launch(&mut state.rng);
    state.clock.relaunch(game_time);
    state.phase = GamePhase::Running;
    state.events.push(GameEvent::Launched);
    log::debug!(
        "Ball launched (x speed {:.2}, lives {})",
        state.ball.x_speed,
        state.lives
    );
}

fn step_running(state: &mut GameState, game_time: u64) {
    resolve_block_hits(state);
    if state.phase != GamePhase::Running {
        return;
    }

    resolve_paddle_hit(state);

    if ball_missed(&state.ball.rect, &state.paddle.rect, state.display.y) {
        lose_life(state);
        return;
    }

    state.clock.advance(game_time);
    let time_in_play = state.clock.time_in_play;

    if let Some(level) = state.speed_ramp.apply(time_in_play, &mut state.ball) {
        log::info!("Speed level {} at {} ms in play", level, time_in_play);
        state.events.push(GameEvent::SpeedUp { level });
    }

    state.ball.update(&mut state.events);

    if let Some(id) = state.gold.update(time_in_play, &mut state.blocks, &mut state.rng) {
        log::debug!("Block {} turned gold at {} ms in play", id, time_in_play);
        state.events.push(GameEvent::GoldBlock { id });
    }
}

/// Every overlapping block is destroyed with one bounce each
fn resolve_block_hits(state: &mut GameState) {
    let ball = state.ball.rect;
    let hit_ids: Vec<u32> = state
        .blocks
        .iter()
        .filter(|b| ball.intersects(&b.rect))
        .map(|b| b.id)
        .collect();

    for id in hit_ids {
        let Some(index) = state.blocks.iter().position(|b| b.id == id) else {
            continue;
        };
        match classify_block_hit(&ball, &state.blocks[index].rect) {
            HitSide::Left => state.ball.bounce_fixed(Direction::Left),
            HitSide::Right => state.ball.bounce_fixed(Direction::Right),
            HitSide::Vertical => state.ball.bounce_vertical(),
        }
        destroy_block(state, index);
        if state.phase == GamePhase::Victory {
            return;
        }
    }
}

fn destroy_block(state: &mut GameState, index: usize) {
    let block = state.blocks.remove(index);
    let points = block.kind.points();
    state.score += points;
    state.events.push(GameEvent::BlockDestroyed {
        id: block.id,
        kind: block.kind,
        points,
    });

    if state.blocks.is_empty() {
        state.phase = GamePhase::Victory;
        state.events.push(GameEvent::Victory);
        log::info!("All blocks cleared, final score {}", state.score);
    }
}

/// Deflect off the paddle; only a descending ball is caught
fn resolve_paddle_hit(state: &mut GameState) {
    let ball = &mut state.ball;
    if ball.y_speed < 0.0 && ball.rect.intersects(&state.paddle.rect) {
        let offset = paddle_offset(&ball.rect, &state.paddle.rect);
        ball.bounce_deflect(offset);
        state.events.push(GameEvent::PaddleHit { offset });
    }
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!("Game over, final score {}", state.score);
    } else {
        state.phase = GamePhase::NewGame;
        state.ball.park_on(&state.paddle);
        state.events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });
        log::info!("Life lost, {} left", state.lives);
    }
}
