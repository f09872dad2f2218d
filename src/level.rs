use macroquad::prelude::*;

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;
pub const PLAYER_SIZE: f32 = 20.0;

/// Closed set of level object kinds. Every consumption site (collision,
/// triggers, rendering, editor) matches exhaustively on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Platform,
    Wall,
    Obstacle,
    Key,
    Gate,
}

/// Axis-aligned rectangle with a kind tag. (x, y) is the top-left corner.
#[derive(Clone, Copy, Debug)]
pub struct GameObject {
    pub kind: ObjectKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl GameObject {
    pub fn new(kind: ObjectKind, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            kind,
            x,
            y,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Solid geometry blocks movement; obstacles and triggers do not.
    pub fn is_solid(&self) -> bool {
        matches!(self.kind, ObjectKind::Platform | ObjectKind::Wall)
    }
}

/// Which physics model a level runs under. The two models never mix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelMode {
    Platformer,
    Maze,
}

#[derive(Clone)]
pub struct Level {
    pub id: u32,
    pub name: String,
    pub difficulty: u32,
    pub mode: LevelMode,
    pub spawn: Vec2,
    pub objects: Vec<GameObject>,
}

impl Level {
    /// First key object, if any. Extra keys are never evaluated.
    pub fn key(&self) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.kind == ObjectKind::Key)
    }

    /// First gate object, if any.
    pub fn gate(&self) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.kind == ObjectKind::Gate)
    }
}

/// The compiled-in default level list.
pub fn default_levels() -> Vec<Level> {
    use ObjectKind::*;

    vec![
        Level {
            id: 1,
            name: "First Steps".to_string(),
            difficulty: 1,
            mode: LevelMode::Platformer,
            spawn: vec2(50.0, 400.0),
            objects: vec![
                GameObject::new(Platform, 40.0, 460.0, 120.0, 20.0),
                GameObject::new(Key, 200.0, 350.0, 20.0, 20.0),
                GameObject::new(Obstacle, 200.0, 520.0, 60.0, 30.0),
                GameObject::new(Gate, 700.0, 470.0, 60.0, 130.0),
            ],
        },
        Level {
            id: 2,
            name: "Long Way Up".to_string(),
            difficulty: 2,
            mode: LevelMode::Platformer,
            spawn: vec2(40.0, 540.0),
            objects: vec![
                GameObject::new(Platform, 150.0, 510.0, 100.0, 20.0),
                GameObject::new(Platform, 300.0, 430.0, 100.0, 20.0),
                GameObject::new(Platform, 450.0, 360.0, 100.0, 20.0),
                GameObject::new(Platform, 650.0, 300.0, 120.0, 20.0),
                GameObject::new(Obstacle, 250.0, 570.0, 80.0, 30.0),
                GameObject::new(Obstacle, 500.0, 570.0, 80.0, 30.0),
                GameObject::new(Key, 480.0, 320.0, 20.0, 20.0),
                GameObject::new(Gate, 690.0, 170.0, 50.0, 130.0),
            ],
        },
        Level {
            id: 3,
            name: "Night Maze".to_string(),
            difficulty: 3,
            mode: LevelMode::Maze,
            spawn: vec2(30.0, 30.0),
            objects: vec![
                // serpentine walls, alternating top/bottom gaps
                GameObject::new(Wall, 100.0, 0.0, 20.0, 520.0),
                GameObject::new(Wall, 200.0, 80.0, 20.0, 520.0),
                GameObject::new(Wall, 320.0, 0.0, 20.0, 520.0),
                GameObject::new(Wall, 440.0, 80.0, 20.0, 520.0),
                GameObject::new(Wall, 560.0, 0.0, 20.0, 520.0),
                GameObject::new(Wall, 680.0, 80.0, 20.0, 520.0),
                GameObject::new(Obstacle, 250.0, 300.0, 30.0, 30.0),
                GameObject::new(Obstacle, 480.0, 200.0, 30.0, 30.0),
                GameObject::new(Key, 760.0, 560.0, 20.0, 20.0),
                GameObject::new(Gate, 20.0, 90.0, 40.0, 40.0),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_levels_have_positive_extents() {
        for level in default_levels() {
            for obj in &level.objects {
                assert!(obj.width > 0.0, "{}: zero-width object", level.name);
                assert!(obj.height > 0.0, "{}: zero-height object", level.name);
            }
        }
    }

    #[test]
    fn default_levels_carry_one_key_and_one_gate() {
        for level in default_levels() {
            let keys = level
                .objects
                .iter()
                .filter(|o| o.kind == ObjectKind::Key)
                .count();
            let gates = level
                .objects
                .iter()
                .filter(|o| o.kind == ObjectKind::Gate)
                .count();
            assert_eq!(keys, 1, "{}", level.name);
            assert_eq!(gates, 1, "{}", level.name);
        }
    }

    #[test]
    fn key_lookup_returns_first_match() {
        let mut level = default_levels().remove(0);
        level
            .objects
            .push(GameObject::new(ObjectKind::Key, 600.0, 100.0, 20.0, 20.0));
        let key = level.key().unwrap();
        assert_eq!(key.x, 200.0);
        assert_eq!(key.y, 350.0);
    }

    #[test]
    fn spawn_points_are_inside_the_canvas() {
        for level in default_levels() {
            assert!(level.spawn.x >= 0.0 && level.spawn.x + PLAYER_SIZE <= CANVAS_WIDTH);
            assert!(level.spawn.y >= 0.0 && level.spawn.y + PLAYER_SIZE <= CANVAS_HEIGHT);
        }
    }
}
