use macroquad::prelude::*;

use crate::input::{self, HeldActions};
use crate::level::{Level, LevelMode, ObjectKind, CANVAS_HEIGHT, CANVAS_WIDTH, PLAYER_SIZE};

pub const TICK_RATE: f32 = 60.0;
pub const TICK_DT: f32 = 1.0 / TICK_RATE;

pub const GRAVITY: f32 = 0.5;
pub const JUMP_IMPULSE: f32 = -10.0;
pub const MOVE_SPEED: f32 = 5.0;
pub const MAZE_SPEED: f32 = 4.0;

/// Vertical snap tolerance when landing on or bumping under solid geometry.
const EDGE_TOLERANCE: f32 = 5.0;
/// Ticks spent in Won before completion is reported (500ms at 60Hz).
const WON_DELAY_TICKS: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    Won,
}

#[derive(Debug, PartialEq, Eq)]
pub enum TickEvent {
    /// The level was completed; carries the earned star count.
    Completed(u32),
}

pub struct PlayerState {
    pub pos: Vec2,
    pub size: f32,
    pub vel: Vec2,
    pub has_key: bool,
    pub on_ground: bool,
}

impl PlayerState {
    fn at_spawn(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            size: PLAYER_SIZE,
            vel: Vec2::ZERO,
            has_key: false,
            on_ground: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// One play-through of a level: player state, the Playing -> Won machine,
/// and the fixed-rate simulation step. Rendering never mutates any of this.
pub struct GameSession {
    pub level: Level,
    pub player: PlayerState,
    pub state: SessionState,
    won_ticks: u32,
    completion_reported: bool,
}

impl GameSession {
    pub fn new(level: Level) -> Self {
        let player = PlayerState::at_spawn(level.spawn);
        Self {
            level,
            player,
            state: SessionState::Playing,
            won_ticks: 0,
            completion_reported: false,
        }
    }

    /// Star reward is flat by design: preset difficulty plus one, capped at
    /// ten. Play performance does not factor in.
    pub fn stars(&self) -> u32 {
        (self.level.difficulty + 1).min(10)
    }

    /// Advance the simulation by one fixed tick. In Won the world is frozen;
    /// after the delay elapses the completion event is reported exactly once.
    pub fn step(&mut self, held: &HeldActions) -> Option<TickEvent> {
        match self.state {
            SessionState::Won => {
                self.won_ticks += 1;
                if self.won_ticks >= WON_DELAY_TICKS && !self.completion_reported {
                    self.completion_reported = true;
                    return Some(TickEvent::Completed(self.stars()));
                }
                None
            }
            SessionState::Playing => {
                let moved = match self.level.mode {
                    LevelMode::Platformer => self.step_platformer(held),
                    LevelMode::Maze => self.step_maze(held),
                };
                if moved {
                    self.check_triggers();
                }
                None
            }
        }
    }

    /// Gravity/jump integration with vertical-first collision resolution.
    /// Returns false when the player was respawned by an obstacle, in which
    /// case trigger checks are skipped for this tick.
    fn step_platformer(&mut self, held: &HeldActions) -> bool {
        let prev = self.player.pos;

        self.player.vel.y += GRAVITY;
        self.player.vel.x = input::platformer_horizontal(held, MOVE_SPEED);

        if held.jump && self.player.on_ground {
            self.player.vel.y = JUMP_IMPULSE;
            self.player.on_ground = false;
        }

        let size = self.player.size;
        let mut new_x = prev.x + self.player.vel.x;
        let mut new_y = prev.y + self.player.vel.y;

        // horizontal canvas bounds; the floor is clamped after resolution
        new_x = new_x.clamp(0.0, CANVAS_WIDTH - size);

        self.player.on_ground = false;

        for obj in &self.level.objects {
            match obj.kind {
                ObjectKind::Platform | ObjectKind::Wall | ObjectKind::Obstacle => {}
                ObjectKind::Key | ObjectKind::Gate => continue,
            }
            if !Rect::new(new_x, new_y, size, size).overlaps(&obj.rect()) {
                continue;
            }

            if obj.kind == ObjectKind::Obstacle {
                // hard reset, not a bounce; nothing else resolves this tick
                self.respawn();
                return false;
            }

            if self.player.vel.y > 0.0 && prev.y + size <= obj.y + EDGE_TOLERANCE {
                // falling onto the top face
                new_y = obj.y - size;
                self.player.vel.y = 0.0;
                self.player.on_ground = true;
            } else if self.player.vel.y < 0.0 && prev.y >= obj.y + obj.height - EDGE_TOLERANCE {
                // rising into the bottom face
                new_y = obj.y + obj.height;
                self.player.vel.y = 0.0;
            } else if self.player.vel.x > 0.0 {
                new_x = obj.x - size;
            } else if self.player.vel.x < 0.0 {
                new_x = obj.x + obj.width;
            }
        }

        if new_y + size > CANVAS_HEIGHT {
            new_y = CANVAS_HEIGHT - size;
            self.player.vel.y = 0.0;
            self.player.on_ground = true;
        }

        self.player.pos = vec2(new_x, new_y);
        true
    }

    /// Top-down movement: intent becomes velocity directly, walls reject the
    /// whole move rather than resolving per axis.
    fn step_maze(&mut self, held: &HeldActions) -> bool {
        self.player.vel = input::maze_velocity(held, MAZE_SPEED);

        let size = self.player.size;
        let mut candidate = self.player.pos + self.player.vel;
        candidate.x = candidate.x.clamp(0.0, CANVAS_WIDTH - size);
        candidate.y = candidate.y.clamp(0.0, CANVAS_HEIGHT - size);

        let candidate_rect = Rect::new(candidate.x, candidate.y, size, size);
        for obj in &self.level.objects {
            match obj.kind {
                ObjectKind::Platform | ObjectKind::Wall | ObjectKind::Obstacle => {}
                ObjectKind::Key | ObjectKind::Gate => continue,
            }
            if !candidate_rect.overlaps(&obj.rect()) {
                continue;
            }
            if obj.kind == ObjectKind::Obstacle {
                self.respawn();
                return false;
            }
            // blocked: the move for this frame is dropped entirely
            candidate = self.player.pos;
            break;
        }

        self.player.pos = candidate;
        true
    }

    fn respawn(&mut self) {
        self.player.pos = self.level.spawn;
        self.player.vel = Vec2::ZERO;
        self.player.has_key = false;
        self.player.on_ground = false;
    }

    /// Key pickup, then gate check. The key object stays in the level; only
    /// the flag flips. A gate overlap without the key does nothing.
    fn check_triggers(&mut self) {
        let player_rect = self.player.rect();

        if !self.player.has_key {
            if let Some(key) = self.level.key() {
                if player_rect.overlaps(&key.rect()) {
                    self.player.has_key = true;
                }
            }
        }

        if self.player.has_key {
            if let Some(gate) = self.level.gate() {
                if player_rect.overlaps(&gate.rect()) {
                    self.state = SessionState::Won;
                    self.won_ticks = 0;
                }
            }
        }
    }

    pub fn draw(&self, player_color: Color) {
        draw_rectangle(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, BLACK);

        let maze = self.level.mode == LevelMode::Maze;
        if maze {
            draw_maze_grid();
        }

        for obj in &self.level.objects {
            match obj.kind {
                ObjectKind::Key => {
                    if !self.player.has_key {
                        let cx = obj.x + obj.width / 2.0;
                        let cy = obj.y + obj.height / 2.0;
                        if maze {
                            draw_circle(cx, cy, obj.width, glow_of(GOLD));
                        }
                        draw_circle(cx, cy, obj.width / 2.0, GOLD);
                    }
                }
                ObjectKind::Gate => {
                    let fill = if self.player.has_key { GREEN } else { GRAY };
                    if maze {
                        draw_glow(obj.rect(), fill);
                    }
                    draw_rectangle(obj.x, obj.y, obj.width, obj.height, fill);
                    draw_rectangle_lines(obj.x, obj.y, obj.width, obj.height, 2.0, WHITE);
                }
                ObjectKind::Obstacle => {
                    if maze {
                        draw_glow(obj.rect(), RED);
                    }
                    draw_rectangle(obj.x, obj.y, obj.width, obj.height, RED);
                }
                ObjectKind::Platform => {
                    draw_rectangle(obj.x, obj.y, obj.width, obj.height, PLATFORM_COLOR);
                }
                ObjectKind::Wall => {
                    draw_rectangle(obj.x, obj.y, obj.width, obj.height, WALL_COLOR);
                }
            }
        }

        let p = &self.player;
        if maze {
            draw_glow(p.rect(), player_color);
        }
        draw_rectangle(p.pos.x, p.pos.y, p.size, p.size, player_color);
    }

    pub fn debug_draw(&self) {
        for obj in &self.level.objects {
            let color = match obj.kind {
                ObjectKind::Platform | ObjectKind::Wall => GREEN,
                ObjectKind::Obstacle => RED,
                ObjectKind::Key => YELLOW,
                ObjectKind::Gate => ORANGE,
            };
            let r = obj.rect();
            draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, color);
        }
        let r = self.player.rect();
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, BLUE);
    }
}

const PLATFORM_COLOR: Color = Color::new(0.176, 0.176, 0.176, 1.0);
const WALL_COLOR: Color = Color::new(0.16, 0.18, 0.26, 1.0);

fn glow_of(color: Color) -> Color {
    Color::new(color.r, color.g, color.b, 0.25)
}

/// Cheap halo: a translucent expanded rectangle behind the entity.
fn draw_glow(r: Rect, color: Color) {
    let pad = 6.0;
    draw_rectangle(
        r.x - pad,
        r.y - pad,
        r.w + pad * 2.0,
        r.h + pad * 2.0,
        glow_of(color),
    );
}

fn draw_maze_grid() {
    let cell = 40.0;
    let color = Color::new(0.12, 0.12, 0.16, 1.0);
    let mut x = cell;
    while x < CANVAS_WIDTH {
        draw_line(x, 0.0, x, CANVAS_HEIGHT, 1.0, color);
        x += cell;
    }
    let mut y = cell;
    while y < CANVAS_HEIGHT {
        draw_line(0.0, y, CANVAS_WIDTH, y, 1.0, color);
        y += cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::default_levels;

    fn no_input() -> HeldActions {
        HeldActions::default()
    }

    fn right_and_jump() -> HeldActions {
        HeldActions {
            right: true,
            jump: true,
            ..HeldActions::default()
        }
    }

    fn first_steps() -> Level {
        default_levels().remove(0)
    }

    fn night_maze() -> Level {
        default_levels().remove(2)
    }

    #[test]
    fn stars_are_difficulty_plus_one_capped() {
        let yields: Vec<u32> = default_levels()
            .into_iter()
            .map(|l| GameSession::new(l).stars())
            .collect();
        assert_eq!(yields, vec![2, 3, 4]);

        let mut inflated = first_steps();
        inflated.difficulty = 42;
        assert_eq!(GameSession::new(inflated).stars(), 10);
    }

    #[test]
    fn first_steps_right_and_jump_collects_key_then_wins() {
        let mut session = GameSession::new(first_steps());
        let mut key_tick = None;
        let mut completed = None;

        for tick in 0..700 {
            let event = session.step(&right_and_jump());
            if key_tick.is_none() && session.player.has_key {
                key_tick = Some(tick);
                // picked up mid-arc near the key rectangle
                assert!((session.player.pos.x - 200.0).abs() < 40.0);
                assert!((session.player.pos.y - 350.0).abs() < 40.0);
            }
            if let Some(TickEvent::Completed(stars)) = event {
                completed = Some((tick, stars));
                break;
            }
        }

        let key_tick = key_tick.expect("key was never collected");
        let (won_tick, stars) = completed.expect("level was never completed");
        assert!(key_tick < won_tick);
        assert_eq!(stars, 2);
    }

    #[test]
    fn obstacle_contact_resets_position_and_key() {
        // approach the obstacle at (200,520,60,30) from several directions
        let falling = no_input();
        let left = HeldActions {
            left: true,
            ..HeldActions::default()
        };
        let right = HeldActions {
            right: true,
            ..HeldActions::default()
        };
        let approaches = [
            (vec2(210.0, 500.0), vec2(0.0, 4.0), falling), // from above
            (vec2(182.0, 525.0), Vec2::ZERO, right),       // from the left
            (vec2(262.0, 525.0), Vec2::ZERO, left),        // from the right
        ];
        for (pos, vel, held) in approaches {
            let mut session = GameSession::new(first_steps());
            session.player.pos = pos;
            session.player.vel = vel;
            session.player.has_key = true;
            session.player.on_ground = false;

            session.step(&held);

            assert_eq!(session.player.pos, vec2(50.0, 400.0), "from {pos:?}");
            assert!(!session.player.has_key);
            assert_eq!(session.player.vel, Vec2::ZERO);
            assert_eq!(session.state, SessionState::Playing);
        }
    }

    #[test]
    fn player_stays_inside_horizontal_bounds() {
        let mut session = GameSession::new(first_steps());
        let left = HeldActions {
            left: true,
            ..HeldActions::default()
        };
        for _ in 0..300 {
            session.step(&left);
            assert!(session.player.pos.x >= 0.0);
        }
        let right = HeldActions {
            right: true,
            ..HeldActions::default()
        };
        // strip the key and gate so the run cannot end in Won
        let mut level = first_steps();
        level.objects.retain(|o| o.is_solid());
        let mut session = GameSession::new(level);
        for _ in 0..300 {
            session.step(&right);
            assert!(session.player.pos.x + session.player.size <= CANVAS_WIDTH);
        }
    }

    #[test]
    fn floor_clamp_keeps_player_above_canvas_bottom() {
        let mut session = GameSession::new(first_steps());
        session.player.pos = vec2(400.0, 560.0);
        for _ in 0..120 {
            session.step(&no_input());
            assert!(session.player.pos.y + session.player.size <= CANVAS_HEIGHT);
        }
        assert!(session.player.on_ground);
    }

    #[test]
    fn resting_on_platform_is_idempotent_with_no_input() {
        let mut session = GameSession::new(first_steps());
        // stand on the step platform at (40,460,120,20)
        session.player.pos = vec2(80.0, 440.0);
        session.player.on_ground = true;

        session.step(&no_input());
        let settled = session.player.pos;
        for _ in 0..60 {
            session.step(&no_input());
            assert_eq!(session.player.pos, settled);
        }
        assert!(session.player.on_ground);
    }

    #[test]
    fn gate_overlap_without_key_does_nothing() {
        let mut session = GameSession::new(first_steps());
        // drop straight into the gate region at (700,470)
        session.player.pos = vec2(720.0, 500.0);
        for _ in 0..60 {
            session.step(&no_input());
        }
        assert_eq!(session.state, SessionState::Playing);
        assert!(!session.player.has_key);
    }

    #[test]
    fn maze_zero_intent_leaves_position_unchanged() {
        let mut session = GameSession::new(night_maze());
        let start = session.player.pos;
        for _ in 0..60 {
            session.step(&no_input());
        }
        assert_eq!(session.player.pos, start);
    }

    #[test]
    fn maze_wall_rejects_whole_move() {
        let mut session = GameSession::new(night_maze());
        // just left of the first wall at x=100
        session.player.pos = vec2(78.0, 200.0);
        let right = HeldActions {
            right: true,
            ..HeldActions::default()
        };
        session.step(&right);
        // candidate (82,200) overlaps the wall, so the move is dropped
        assert_eq!(session.player.pos, vec2(78.0, 200.0));

        // diagonal into the wall is also dropped in full, not axis-resolved
        let diag = HeldActions {
            right: true,
            down: true,
            ..HeldActions::default()
        };
        session.step(&diag);
        assert_eq!(session.player.pos, vec2(78.0, 200.0));
    }

    #[test]
    fn maze_bounds_clamp_all_sides() {
        let mut session = GameSession::new(night_maze());
        session.player.pos = vec2(40.0, 40.0);
        let up_left = HeldActions {
            left: true,
            up: true,
            ..HeldActions::default()
        };
        for _ in 0..60 {
            session.step(&up_left);
            assert!(session.player.pos.x >= 0.0);
            assert!(session.player.pos.y >= 0.0);
        }
        assert_eq!(session.player.pos, vec2(0.0, 0.0));
    }

    #[test]
    fn maze_obstacle_resets_to_spawn() {
        let mut session = GameSession::new(night_maze());
        session.player.pos = vec2(250.0, 278.0);
        session.player.has_key = true;
        let down = HeldActions {
            down: true,
            ..HeldActions::default()
        };
        session.step(&down);
        assert_eq!(session.player.pos, session.level.spawn);
        assert!(!session.player.has_key);
    }

    #[test]
    fn won_freezes_world_and_reports_once_after_delay() {
        let mut session = GameSession::new(night_maze());

        // walk onto the key, then onto the gate
        session.player.pos = vec2(760.0, 560.0);
        session.step(&no_input());
        assert!(session.player.has_key);

        session.player.pos = vec2(25.0, 95.0);
        session.step(&no_input());
        assert_eq!(session.state, SessionState::Won);

        let frozen = session.player.pos;
        let push = HeldActions {
            right: true,
            down: true,
            jump: true,
            ..HeldActions::default()
        };
        let mut completions = 0;
        for _ in 0..(WON_DELAY_TICKS * 3) {
            if let Some(TickEvent::Completed(stars)) = session.step(&push) {
                assert_eq!(stars, 4);
                completions += 1;
            }
            assert_eq!(session.player.pos, frozen);
        }
        assert_eq!(completions, 1);
    }

    #[test]
    fn key_pickup_requires_key_overlap_not_gate() {
        let mut session = GameSession::new(night_maze());
        session.player.pos = vec2(25.0, 95.0); // on the gate
        session.step(&no_input());
        assert!(!session.player.has_key);
        assert_eq!(session.state, SessionState::Playing);

        session.player.pos = vec2(755.0, 555.0); // on the key
        session.step(&no_input());
        assert!(session.player.has_key);
    }

    #[test]
    fn levels_without_key_or_gate_degrade_gracefully() {
        let mut level = first_steps();
        level.objects.retain(|o| o.is_solid());
        let mut session = GameSession::new(level);
        for _ in 0..120 {
            session.step(&right_and_jump());
        }
        // uncompletable, but never panics or wins
        assert_eq!(session.state, SessionState::Playing);
        assert!(!session.player.has_key);
    }
}
