use macroquad::prelude::*;

pub const JOYSTICK_DEAD_ZONE: f32 = 10.0;
pub const JOYSTICK_CLAMP_RADIUS: f32 = 60.0;

/// Keyboard bindings for the game actions. Each action has a primary key and
/// an optional alternate so that arrows and WASD can coexist.
pub struct KeyBindings {
    pub left_primary: KeyCode,
    pub left_alt: Option<KeyCode>,
    pub right_primary: KeyCode,
    pub right_alt: Option<KeyCode>,
    pub up_primary: KeyCode,
    pub up_alt: Option<KeyCode>,
    pub down_primary: KeyCode,
    pub down_alt: Option<KeyCode>,
    pub jump_primary: KeyCode,
    pub jump_alt: Option<KeyCode>,
}

impl KeyBindings {
    pub fn for_scheme(scheme: &str) -> Self {
        match scheme.to_lowercase().as_str() {
            "wasd" => Self {
                left_primary: KeyCode::A,
                left_alt: None,
                right_primary: KeyCode::D,
                right_alt: None,
                up_primary: KeyCode::W,
                up_alt: None,
                down_primary: KeyCode::S,
                down_alt: None,
                jump_primary: KeyCode::Space,
                jump_alt: Some(KeyCode::W),
            },
            "arrows" => Self {
                left_primary: KeyCode::Left,
                left_alt: None,
                right_primary: KeyCode::Right,
                right_alt: None,
                up_primary: KeyCode::Up,
                up_alt: None,
                down_primary: KeyCode::Down,
                down_alt: None,
                jump_primary: KeyCode::Space,
                jump_alt: Some(KeyCode::Up),
            },
            _ => Self {
                left_primary: KeyCode::Left,
                left_alt: Some(KeyCode::A),
                right_primary: KeyCode::Right,
                right_alt: Some(KeyCode::D),
                up_primary: KeyCode::Up,
                up_alt: Some(KeyCode::W),
                down_primary: KeyCode::Down,
                down_alt: Some(KeyCode::S),
                jump_primary: KeyCode::Space,
                jump_alt: Some(KeyCode::W),
            },
        }
    }

    /// Snapshot of the currently held actions for one tick. Reading the key
    /// state is the only side effect; nothing here moves the player.
    pub fn sample(&self, joystick: &VirtualJoystick) -> HeldActions {
        let down = |primary: KeyCode, alt: Option<KeyCode>| {
            is_key_down(primary) || alt.map_or(false, is_key_down)
        };
        HeldActions {
            left: down(self.left_primary, self.left_alt),
            right: down(self.right_primary, self.right_alt),
            up: down(self.up_primary, self.up_alt),
            down: down(self.down_primary, self.down_alt),
            jump: down(self.jump_primary, self.jump_alt),
            joystick: joystick.displacement(),
        }
    }
}

/// Per-tick input intent: which logical directions are held, plus the virtual
/// joystick displacement when a touch drag is active.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeldActions {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub joystick: Option<Vec2>,
}

/// Touch-driven virtual joystick. The first touch anchors the stick; moving
/// the finger produces a displacement clamped to `JOYSTICK_CLAMP_RADIUS`;
/// lifting the finger releases it.
#[derive(Default)]
pub struct VirtualJoystick {
    anchor: Option<Vec2>,
    current: Vec2,
}

impl VirtualJoystick {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self) {
        for touch in touches() {
            match touch.phase {
                TouchPhase::Started => {
                    self.anchor = Some(touch.position);
                    self.current = touch.position;
                }
                TouchPhase::Moved | TouchPhase::Stationary => {
                    if self.anchor.is_some() {
                        self.current = touch.position;
                    }
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    self.anchor = None;
                }
            }
        }
    }

    pub fn displacement(&self) -> Option<Vec2> {
        let anchor = self.anchor?;
        let mut d = self.current - anchor;
        if d.length() > JOYSTICK_CLAMP_RADIUS {
            d = d.normalize() * JOYSTICK_CLAMP_RADIUS;
        }
        Some(d)
    }

    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }
}

/// Horizontal platformer intent. Left is checked first, so holding both
/// directions moves left; no input gives zero.
pub fn platformer_horizontal(held: &HeldActions, speed: f32) -> f32 {
    if held.left {
        -speed
    } else if held.right {
        speed
    } else {
        0.0
    }
}

/// Joystick displacement to maze velocity: zero inside the dead zone, full
/// speed along the displacement direction outside it.
pub fn joystick_velocity(displacement: Vec2, speed: f32) -> Vec2 {
    if displacement.length() < JOYSTICK_DEAD_ZONE {
        Vec2::ZERO
    } else {
        displacement.normalize() * speed
    }
}

/// Maze intent. An active joystick overrides the keyboard entirely. Keyboard
/// axes add independently, so held diagonals run at speed * sqrt(2); levels
/// are tuned around that.
pub fn maze_velocity(held: &HeldActions, speed: f32) -> Vec2 {
    if let Some(d) = held.joystick {
        return joystick_velocity(d, speed);
    }
    let mut v = Vec2::ZERO;
    if held.left {
        v.x -= speed;
    }
    if held.right {
        v.x += speed;
    }
    if held.up {
        v.y -= speed;
    }
    if held.down {
        v.y += speed;
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(left: bool, right: bool, up: bool, down: bool) -> HeldActions {
        HeldActions {
            left,
            right,
            up,
            down,
            jump: false,
            joystick: None,
        }
    }

    #[test]
    fn horizontal_left_takes_priority() {
        assert_eq!(platformer_horizontal(&held(true, false, false, false), 5.0), -5.0);
        assert_eq!(platformer_horizontal(&held(false, true, false, false), 5.0), 5.0);
        assert_eq!(platformer_horizontal(&held(true, true, false, false), 5.0), -5.0);
        assert_eq!(platformer_horizontal(&held(false, false, false, false), 5.0), 0.0);
    }

    #[test]
    fn joystick_outside_dead_zone_gives_full_speed() {
        let v = joystick_velocity(vec2(40.0, 0.0), 4.0);
        assert!((v.x - 4.0).abs() < 0.001);
        assert!(v.y.abs() < 0.001);
    }

    #[test]
    fn joystick_inside_dead_zone_is_zero() {
        // magnitude ~7.07, inside the 10px dead zone
        assert_eq!(joystick_velocity(vec2(5.0, 5.0), 4.0), Vec2::ZERO);
    }

    #[test]
    fn maze_diagonal_is_additive_not_normalized() {
        let v = maze_velocity(&held(false, true, true, false), 4.0);
        assert_eq!(v, vec2(4.0, -4.0));
        assert!((v.length() - 4.0 * 2.0_f32.sqrt()).abs() < 0.001);
    }

    #[test]
    fn maze_joystick_overrides_keyboard() {
        let mut h = held(true, false, false, true);
        h.joystick = Some(vec2(40.0, 0.0));
        let v = maze_velocity(&h, 4.0);
        assert!((v.x - 4.0).abs() < 0.001);
        assert!(v.y.abs() < 0.001);
    }

    #[test]
    fn opposite_keys_cancel_in_maze() {
        let v = maze_velocity(&held(true, true, false, false), 4.0);
        assert_eq!(v.x, 0.0);
    }
}
