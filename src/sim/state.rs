//! Game state and core simulation types
//!
//! Entities (ball, paddle, blocks) plus the bookkeeping the state machine
//! needs: lives, score, time in play, speed ramp and the gold-block timer.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball parked on the paddle, waiting for launch input
    NewGame,
    /// Physics active
    Running,
    /// Out of lives
    GameOver,
    /// Every block cleared
    Victory,
}

impl GamePhase {
    /// No way back to play from this phase inside the same scene
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Horizontal travel direction of the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Things that happened during a tick (sound cues, HUD, logging)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    WallHit,
    PaddleHit { offset: f32 },
    BlockDestroyed { id: u32, kind: BlockKind, points: u64 },
    Launched,
    LifeLost { lives_left: u8 },
    GameOver,
    Victory,
    SpeedUp { level: u8 },
    GoldBlock { id: u32 },
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// Horizontal speed; only the magnitude is used for movement
    pub x_speed: f32,
    /// Vertical speed; positive moves up the screen
    pub y_speed: f32,
    pub max_speed: f32,
    pub direction: Direction,
    /// Display size the ball bounces inside
    pub bounds: Vec2,
}

impl Ball {
    pub fn new(x: f32, y: f32, bounds: Vec2) -> Self {
        Self {
            rect: Rect::new(x, y, BALL_SIZE, BALL_SIZE),
            x_speed: 0.0,
            y_speed: BALL_START_Y_SPEED,
            max_speed: BALL_MAX_SPEED,
            direction: Direction::Right,
            bounds,
        }
    }

    /// Force horizontal travel to one side, vertical speed untouched
    pub fn bounce_fixed(&mut self, side: Direction) {
        self.direction = side;
    }

    /// Invert vertical travel, horizontal untouched
    pub fn bounce_vertical(&mut self) {
        self.y_speed = -self.y_speed;
    }

    /// Paddle rebound: the further from the paddle center, the flatter the angle
    pub fn bounce_deflect(&mut self, offset: f32) {
        let multiplier = offset.abs() / DEFLECT_DIVISOR;
        self.x_speed = (self.max_speed * multiplier).clamp(MIN_DEFLECT_SPEED, self.max_speed);
        self.direction = if offset >= 0.0 {
            Direction::Right
        } else {
            Direction::Left
        };
        self.y_speed = -self.y_speed;
    }

    /// Sit the ball on top of the paddle, centered
    pub fn park_on(&mut self, paddle: &Paddle) {
        self.rect.set_center_x(paddle.rect.center_x());
        self.rect.set_bottom(paddle.rect.top());
    }

    /// Leave the paddle upward with a random horizontal speed
    pub fn launch(&mut self, rng: &mut Pcg32) {
        self.x_speed = rng.random_range(-self.max_speed..=self.max_speed);
        self.direction = if self.x_speed < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        };
        self.y_speed = self.y_speed.abs();
    }

    /// Move one frame and resolve the three walls
    pub fn update(&mut self, events: &mut Vec<GameEvent>) {
        self.rect.y -= self.y_speed;
        self.rect.x += self.direction.sign() * self.x_speed.abs();

        if self.rect.right() >= self.bounds.x {
            self.rect.set_right(self.bounds.x);
            self.bounce_fixed(Direction::Left);
            events.push(GameEvent::WallHit);
        }

        if self.rect.left() <= 0.0 {
            self.rect.x = 0.0;
            self.bounce_fixed(Direction::Right);
            events.push(GameEvent::WallHit);
        }

        if self.rect.top() <= 0.0 {
            self.rect.y = 0.0;
            self.bounce_vertical();
            events.push(GameEvent::WallHit);
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    pub move_left: bool,
    pub move_right: bool,
    display_width: f32,
}

impl Paddle {
    pub fn new(display: Vec2) -> Self {
        Self {
            rect: Rect::new(
                PADDLE_START_X,
                display.y - PADDLE_BOTTOM_MARGIN,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
            move_left: false,
            move_right: false,
            display_width: display.x,
        }
    }

    /// Center the paddle under a pointer x coordinate
    pub fn follow_pointer(&mut self, x: f32) {
        self.rect.set_center_x(x);
    }

    pub fn steer(&mut self, left: bool, right: bool) {
        self.move_left = left;
        self.move_right = right;
    }

    /// Apply keyboard steering, then clamp to the display
    pub fn update(&mut self) {
        if self.move_left {
            self.rect.x -= PADDLE_KEY_SPEED;
        } else if self.move_right {
            self.rect.x += PADDLE_KEY_SPEED;
        }
        self.rect.x = self.rect.x.clamp(0.0, self.display_width - self.rect.w);
    }
}

/// Block colors; `Gold` is only ever a temporary overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    Red,
    Yellow,
    Green,
    Blue,
    Purple,
    Gold,
}

impl BlockKind {
    /// Row colors from top to bottom
    pub const GRID_ORDER: [BlockKind; 5] = [
        BlockKind::Red,
        BlockKind::Yellow,
        BlockKind::Green,
        BlockKind::Blue,
        BlockKind::Purple,
    ];

    /// Score awarded for destroying a block of this kind
    pub fn points(self) -> u64 {
        match self {
            BlockKind::Purple => 10,
            BlockKind::Blue => 20,
            BlockKind::Green => 30,
            BlockKind::Yellow => 40,
            BlockKind::Red => 50,
            BlockKind::Gold => 100,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Red => "Red",
            BlockKind::Yellow => "Yellow",
            BlockKind::Green => "Green",
            BlockKind::Blue => "Blue",
            BlockKind::Purple => "Purple",
            BlockKind::Gold => "Gold",
        }
    }
}

/// A block in the grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub kind: BlockKind,
    /// Kind to go back to when the gold overlay is removed
    pub original_kind: BlockKind,
    /// Grid slot (top-left of the normal-sized block)
    pub origin: Vec2,
    pub rect: Rect,
}

impl Block {
    pub fn new(id: u32, origin: Vec2, kind: BlockKind) -> Self {
        Self {
            id,
            kind,
            original_kind: kind,
            origin,
            rect: Rect::from_pos_size(origin, Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT)),
        }
    }

    pub fn is_gold(&self) -> bool {
        self.kind == BlockKind::Gold
    }

    /// Gild the block; the gold sprite is larger and offset up-left
    pub fn make_gold(&mut self) {
        self.kind = BlockKind::Gold;
        self.rect = Rect::new(
            self.origin.x - GOLD_OFFSET_X,
            self.origin.y - GOLD_OFFSET_Y,
            GOLD_BLOCK_WIDTH,
            GOLD_BLOCK_HEIGHT,
        );
    }

    /// Drop the gold overlay
    pub fn revert(&mut self) {
        self.kind = self.original_kind;
        self.rect = Rect::from_pos_size(self.origin, Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT));
    }
}

/// Accumulates time in play from the frame clock.
///
/// Only non-negative per-frame deltas are added, so the total never runs
/// backward across a relaunch.
#[derive(Debug, Clone, Default)]
pub struct PlayClock {
    launch_time: u64,
    last_sample: u64,
    pub time_in_play: u64,
}

impl PlayClock {
    /// Restart the per-life sample origin at a launch
    pub fn relaunch(&mut self, game_time: u64) {
        self.launch_time = game_time;
        self.last_sample = 0;
    }

    /// Add the time elapsed since the previous sample, returns the delta
    pub fn advance(&mut self, game_time: u64) -> u64 {
        let since_launch = game_time.saturating_sub(self.launch_time);
        let delta = since_launch.saturating_sub(self.last_sample);
        self.last_sample = since_launch;
        self.time_in_play += delta;
        delta
    }
}

/// Two one-shot vertical speed clamps driven by time in play
#[derive(Debug, Clone, Default)]
pub struct SpeedRamp {
    pub first_fired: bool,
    pub second_fired: bool,
}

impl SpeedRamp {
    /// Fire any threshold crossed for the first time; returns the new level
    pub fn apply(&mut self, time_in_play: u64, ball: &mut Ball) -> Option<u8> {
        let mut fired = None;
        if time_in_play > SPEED_UP_1_MS && !self.first_fired {
            ball.y_speed = clamp_preserving_sign(ball.y_speed, SPEED_UP_1_Y_SPEED);
            self.first_fired = true;
            fired = Some(2);
        }
        if time_in_play > SPEED_UP_2_MS && !self.second_fired {
            ball.y_speed = clamp_preserving_sign(ball.y_speed, SPEED_UP_2_Y_SPEED);
            self.second_fired = true;
            fired = Some(3);
        }
        fired
    }

    /// Speed level shown in the HUD (1..=3)
    pub fn level(&self) -> u8 {
        1 + self.first_fired as u8 + self.second_fired as u8
    }
}

fn clamp_preserving_sign(speed: f32, magnitude: f32) -> f32 {
    if speed < 0.0 { -magnitude } else { magnitude }
}

/// Moves the gold overlay to a random block every interval
#[derive(Debug, Clone, Default)]
pub struct GoldTimer {
    /// Block currently gilded (may already be destroyed)
    pub current: Option<u32>,
    /// Time in play at the last selection
    pub last_change: Option<u64>,
}

impl GoldTimer {
    /// Returns the id of a newly gilded block when the timer fires
    pub fn update(&mut self, time_in_play: u64, blocks: &mut [Block], rng: &mut Pcg32) -> Option<u32> {
        if time_in_play <= GOLD_INTERVAL_MS {
            return None;
        }
        if let Some(at) = self.last_change {
            if time_in_play <= at + GOLD_INTERVAL_MS {
                return None;
            }
        }

        if let Some(id) = self.current.take() {
            if let Some(block) = blocks.iter_mut().find(|b| b.id == id && b.is_gold()) {
                block.revert();
            }
        }

        if blocks.is_empty() {
            return None;
        }

        let block = &mut blocks[rng.random_range(0..blocks.len())];
        block.make_gold();
        self.current = Some(block.id);
        self.last_change = Some(time_in_play);
        Some(block.id)
    }
}

/// Complete gameplay state for one game scene
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub lives: u8,
    pub score: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Active blocks in grid order
    pub blocks: Vec<Block>,
    pub display: Vec2,
    pub clock: PlayClock,
    pub speed_ramp: SpeedRamp,
    pub gold: GoldTimer,
    /// Game time (ms) of the latest tick
    pub game_time: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh game on a display of the given size
    pub fn new(seed: u64, display: Vec2) -> Self {
        let paddle = Paddle::new(display);
        let mut ball = Ball::new(0.0, 0.0, display);
        ball.park_on(&paddle);

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NewGame,
            lives: STARTING_LIVES,
            score: 0,
            paddle,
            ball,
            blocks: Vec::new(),
            display,
            clock: PlayClock::default(),
            speed_ramp: SpeedRamp::default(),
            gold: GoldTimer::default(),
            game_time: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.build_grid();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Two rows of each color, top to bottom
    fn build_grid(&mut self) {
        let mut y = GRID_START_Y;
        for kind in BlockKind::GRID_ORDER {
            for _ in 0..ROWS_PER_COLOR {
                for col in 0..GRID_COLUMNS {
                    let id = self.next_entity_id();
                    let origin = Vec2::new(GRID_START_X + COLUMN_PITCH * col as f32, y);
                    self.blocks.push(Block::new(id, origin, kind));
                }
                y += ROW_PITCH;
            }
        }
    }

    pub fn time_in_play(&self) -> u64 {
        self.clock.time_in_play
    }

    pub fn speed_level(&self) -> u8 {
        self.speed_ramp.level()
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn display() -> Vec2 {
        Vec2::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }

    #[test]
    fn test_grid_layout() {
        let state = GameState::new(1, display());
        assert_eq!(state.blocks.len(), 5 * ROWS_PER_COLOR * GRID_COLUMNS);
        assert_eq!(state.blocks[0].kind, BlockKind::Red);
        assert_eq!(state.blocks[0].rect, Rect::new(10.0, 40.0, BLOCK_WIDTH, BLOCK_HEIGHT));
        let last = state.blocks.last().unwrap();
        assert_eq!(last.kind, BlockKind::Purple);
        assert_eq!(last.origin, Vec2::new(10.0 + 65.0 * 11.0, 40.0 + 20.0 * 9.0));

        // IDs are unique and ascending
        assert!(state.blocks.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_block_points_table() {
        assert_eq!(BlockKind::Purple.points(), 10);
        assert_eq!(BlockKind::Blue.points(), 20);
        assert_eq!(BlockKind::Green.points(), 30);
        assert_eq!(BlockKind::Yellow.points(), 40);
        assert_eq!(BlockKind::Red.points(), 50);
        assert_eq!(BlockKind::Gold.points(), 100);
    }

    #[test]
    fn test_gold_overlay_reverts() {
        let mut block = Block::new(7, Vec2::new(100.0, 60.0), BlockKind::Blue);
        block.make_gold();
        assert!(block.is_gold());
        assert_eq!(block.rect, Rect::new(95.0, 57.0, GOLD_BLOCK_WIDTH, GOLD_BLOCK_HEIGHT));
        block.revert();
        assert_eq!(block.kind, BlockKind::Blue);
        assert_eq!(block.rect, Rect::new(100.0, 60.0, BLOCK_WIDTH, BLOCK_HEIGHT));
    }

    #[test]
    fn test_ball_parks_on_paddle() {
        let state = GameState::new(1, display());
        assert_eq!(state.ball.rect.bottom(), state.paddle.rect.top());
        assert_eq!(state.ball.rect.center_x(), state.paddle.rect.center_x());
    }

    #[test]
    fn test_bounce_fixed_keeps_vertical() {
        let mut ball = Ball::new(100.0, 100.0, display());
        ball.y_speed = -4.0;
        ball.bounce_fixed(Direction::Left);
        assert_eq!(ball.direction, Direction::Left);
        assert_eq!(ball.y_speed, -4.0);
    }

    #[test]
    fn test_bounce_deflect_minimum_speed() {
        let mut ball = Ball::new(100.0, 100.0, display());
        ball.bounce_deflect(0.0);
        assert_eq!(ball.x_speed, MIN_DEFLECT_SPEED);
        assert_eq!(ball.y_speed, -BALL_START_Y_SPEED);

        ball.bounce_deflect(-20.0);
        assert_eq!(ball.x_speed, 4.0);
        assert_eq!(ball.direction, Direction::Left);
    }

    #[test]
    fn test_wall_hits_clamp_and_bounce() {
        let mut ball = Ball::new(DISPLAY_WIDTH - 22.0, 100.0, display());
        ball.x_speed = 5.0;
        let mut events = Vec::new();
        ball.update(&mut events);
        assert_eq!(ball.rect.right(), DISPLAY_WIDTH);
        assert_eq!(ball.direction, Direction::Left);
        assert_eq!(events, vec![GameEvent::WallHit]);

        let mut ball = Ball::new(50.0, 2.0, display());
        ball.update(&mut events);
        assert_eq!(ball.rect.top(), 0.0);
        assert_eq!(ball.y_speed, -BALL_START_Y_SPEED);
    }

    #[test]
    fn test_paddle_clamped_to_display() {
        let mut paddle = Paddle::new(display());
        paddle.follow_pointer(-500.0);
        paddle.update();
        assert_eq!(paddle.rect.x, 0.0);

        paddle.follow_pointer(5000.0);
        paddle.update();
        assert_eq!(paddle.rect.right(), DISPLAY_WIDTH);

        paddle.steer(false, true);
        paddle.update();
        assert_eq!(paddle.rect.right(), DISPLAY_WIDTH);
        paddle.steer(true, false);
        paddle.update();
        assert_eq!(paddle.rect.right(), DISPLAY_WIDTH - PADDLE_KEY_SPEED);
    }

    #[test]
    fn test_play_clock_never_runs_backward() {
        let mut clock = PlayClock::default();
        clock.relaunch(1_000);
        assert_eq!(clock.advance(1_016), 16);
        assert_eq!(clock.advance(1_032), 16);
        // Clock sample from before the launch contributes nothing
        assert_eq!(clock.advance(900), 0);
        assert_eq!(clock.time_in_play, 32);

        clock.relaunch(5_000);
        clock.advance(5_010);
        assert_eq!(clock.time_in_play, 42);
    }

    #[test]
    fn test_speed_ramp_fires_once_each() {
        let mut ramp = SpeedRamp::default();
        let mut ball = Ball::new(0.0, 0.0, display());
        ball.y_speed = -4.0;

        assert_eq!(ramp.apply(0, &mut ball), None);
        assert_eq!(ball.y_speed, -4.0);

        assert_eq!(ramp.apply(61_000, &mut ball), Some(2));
        assert_eq!(ball.y_speed, -6.0);

        // A later sample below the next threshold must not clamp again
        ball.y_speed = 4.0;
        assert_eq!(ramp.apply(70_000, &mut ball), None);
        assert_eq!(ball.y_speed, 4.0);

        assert_eq!(ramp.apply(121_000, &mut ball), Some(3));
        assert_eq!(ball.y_speed, 8.0);
        assert_eq!(ramp.apply(200_000, &mut ball), None);
        assert_eq!(ramp.level(), 3);
    }

    #[test]
    fn test_gold_timer_cadence() {
        let mut state = GameState::new(42, display());
        let GameState { gold, blocks, rng, .. } = &mut state;

        assert_eq!(gold.update(10_000, blocks, rng), None);
        let first = gold.update(10_016, blocks, rng).expect("first gold block");
        assert_eq!(blocks.iter().filter(|b| b.is_gold()).count(), 1);

        assert_eq!(gold.update(20_000, blocks, rng), None);
        let second = gold.update(20_017, blocks, rng).expect("second gold block");
        assert_eq!(blocks.iter().filter(|b| b.is_gold()).count(), 1);
        let gilded = blocks.iter().find(|b| b.is_gold()).unwrap();
        assert_eq!(gilded.id, second);
        if first != second {
            let old = blocks.iter().find(|b| b.id == first).unwrap();
            assert_eq!(old.kind, old.original_kind);
        }
    }

    #[test]
    fn test_gold_timer_empty_grid_is_noop() {
        let mut gold = GoldTimer::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut blocks: Vec<Block> = Vec::new();
        assert_eq!(gold.update(50_000, &mut blocks, &mut rng), None);
        assert_eq!(gold.current, None);
    }

    proptest! {
        #[test]
        fn prop_deflect_speed_in_range(offset in -200.0f32..200.0) {
            let mut ball = Ball::new(0.0, 0.0, display());
            ball.bounce_deflect(offset);
            prop_assert!(ball.x_speed >= MIN_DEFLECT_SPEED);
            prop_assert!(ball.x_speed <= ball.max_speed);
            let expected = if offset >= 0.0 { Direction::Right } else { Direction::Left };
            prop_assert_eq!(ball.direction, expected);
        }

        #[test]
        fn prop_ball_stays_inside_walls(
            start_x in 0.0f32..780.0,
            start_y in 0.0f32..580.0,
            x_speed in -8.0f32..8.0,
            steps in proptest::collection::vec(0u8..4, 1..200),
        ) {
            let mut ball = Ball::new(start_x, start_y, display());
            ball.x_speed = x_speed;
            let mut events = Vec::new();
            for step in steps {
                match step {
                    0 => ball.bounce_vertical(),
                    1 => ball.bounce_fixed(Direction::Left),
                    2 => ball.bounce_deflect(x_speed * 10.0),
                    _ => {}
                }
                ball.update(&mut events);
                prop_assert!(ball.rect.left() >= 0.0);
                prop_assert!(ball.rect.right() <= DISPLAY_WIDTH);
                prop_assert!(ball.rect.top() >= 0.0);
            }
        }
    }
}
