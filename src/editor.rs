use macroquad::prelude::*;

use crate::level::{
    GameObject, Level, LevelMode, ObjectKind, CANVAS_HEIGHT, CANVAS_WIDTH, PLAYER_SIZE,
};

/// Picking distance for erase and drag, measured to object centers.
const PICK_RADIUS: f32 = 32.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorTool {
    Platform,
    Wall,
    Obstacle,
    Key,
    Gate,
    Spawn,
    Eraser,
}

impl EditorTool {
    pub const ALL: [EditorTool; 7] = [
        EditorTool::Platform,
        EditorTool::Wall,
        EditorTool::Obstacle,
        EditorTool::Key,
        EditorTool::Gate,
        EditorTool::Spawn,
        EditorTool::Eraser,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EditorTool::Platform => "Platform",
            EditorTool::Wall => "Wall",
            EditorTool::Obstacle => "Obstacle",
            EditorTool::Key => "Key",
            EditorTool::Gate => "Gate",
            EditorTool::Spawn => "Spawn",
            EditorTool::Eraser => "Eraser",
        }
    }

    fn object_kind(&self) -> Option<ObjectKind> {
        match self {
            EditorTool::Platform => Some(ObjectKind::Platform),
            EditorTool::Wall => Some(ObjectKind::Wall),
            EditorTool::Obstacle => Some(ObjectKind::Obstacle),
            EditorTool::Key => Some(ObjectKind::Key),
            EditorTool::Gate => Some(ObjectKind::Gate),
            EditorTool::Spawn | EditorTool::Eraser => None,
        }
    }

    fn placement_size(&self) -> (f32, f32) {
        match self {
            EditorTool::Platform => (120.0, 20.0),
            EditorTool::Wall => (20.0, 120.0),
            EditorTool::Obstacle => (40.0, 30.0),
            EditorTool::Key => (20.0, 20.0),
            EditorTool::Gate => (50.0, 110.0),
            EditorTool::Spawn | EditorTool::Eraser => (PLAYER_SIZE, PLAYER_SIZE),
        }
    }
}

/// In-memory level draft. Lives for the session only; nothing here is ever
/// written to disk.
pub struct EditorState {
    pub mode: LevelMode,
    pub spawn: Vec2,
    pub objects: Vec<GameObject>,
    tool_index: usize,
    dragging: Option<usize>,
    drag_offset: Vec2,
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            mode: LevelMode::Platformer,
            spawn: vec2(50.0, 400.0),
            objects: Vec::new(),
            tool_index: 0,
            dragging: None,
            drag_offset: Vec2::ZERO,
        }
    }

    pub fn tool(&self) -> EditorTool {
        EditorTool::ALL[self.tool_index]
    }

    pub fn cycle_tool(&mut self, dir: i32) {
        let len = EditorTool::ALL.len() as i32;
        self.tool_index = (self.tool_index as i32 + dir).rem_euclid(len) as usize;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LevelMode::Platformer => LevelMode::Maze,
            LevelMode::Maze => LevelMode::Platformer,
        };
    }

    pub fn snap(pos: Vec2, grid: f32) -> Vec2 {
        if grid <= 0.0 {
            return pos;
        }
        vec2((pos.x / grid).round() * grid, (pos.y / grid).round() * grid)
    }

    /// Apply the current tool at a canvas position. Key, gate, and spawn are
    /// singular: placing a new one replaces the previous.
    pub fn place(&mut self, pos: Vec2, grid: f32) {
        let tool = self.tool();
        let (w, h) = tool.placement_size();
        let snapped = Self::snap(pos, grid);
        let x = snapped.x.clamp(0.0, CANVAS_WIDTH - w);
        let y = snapped.y.clamp(0.0, CANVAS_HEIGHT - h);

        match tool {
            EditorTool::Spawn => {
                self.spawn = vec2(x, y);
            }
            EditorTool::Eraser => {
                self.erase_nearest(pos);
            }
            _ => {
                if let Some(kind) = tool.object_kind() {
                    if matches!(kind, ObjectKind::Key | ObjectKind::Gate) {
                        self.objects.retain(|o| o.kind != kind);
                    }
                    self.objects.push(GameObject::new(kind, x, y, w, h));
                }
            }
        }
    }

    /// Remove the object whose center is nearest to `pos`, if it is within
    /// the pick radius. Returns whether anything was removed.
    pub fn erase_nearest(&mut self, pos: Vec2) -> bool {
        let mut best: Option<(usize, f32)> = None;
        for (i, obj) in self.objects.iter().enumerate() {
            let center = vec2(obj.x + obj.width / 2.0, obj.y + obj.height / 2.0);
            let d2 = (center - pos).length_squared();
            if d2 <= PICK_RADIUS * PICK_RADIUS && best.map_or(true, |(_, b)| d2 < b) {
                best = Some((i, d2));
            }
        }
        if let Some((i, _)) = best {
            self.objects.remove(i);
            true
        } else {
            false
        }
    }

    /// Start dragging the topmost object under the cursor. Returns whether a
    /// drag began.
    pub fn begin_drag(&mut self, pos: Vec2) -> bool {
        for (i, obj) in self.objects.iter().enumerate().rev() {
            if obj.rect().contains(pos) {
                self.dragging = Some(i);
                self.drag_offset = pos - vec2(obj.x, obj.y);
                return true;
            }
        }
        false
    }

    pub fn drag_to(&mut self, pos: Vec2, grid: f32) {
        if let Some(i) = self.dragging {
            let obj = &mut self.objects[i];
            let target = Self::snap(pos - self.drag_offset, grid);
            obj.x = target.x.clamp(0.0, CANVAS_WIDTH - obj.width);
            obj.y = target.y.clamp(0.0, CANVAS_HEIGHT - obj.height);
        }
    }

    pub fn end_drag(&mut self) {
        self.dragging = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn build_level(&self) -> Level {
        Level {
            id: 0,
            name: "Draft".to_string(),
            difficulty: 1,
            mode: self.mode,
            spawn: self.spawn,
            objects: self.objects.clone(),
        }
    }

    pub fn draw(&self, grid: f32) {
        draw_rectangle(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, BLACK);

        if grid > 0.0 {
            let color = Color::new(0.2, 0.2, 0.2, 0.7);
            let mut x = grid;
            while x < CANVAS_WIDTH {
                draw_line(x, 0.0, x, CANVAS_HEIGHT, 1.0, color);
                x += grid;
            }
            let mut y = grid;
            while y < CANVAS_HEIGHT {
                draw_line(0.0, y, CANVAS_WIDTH, y, 1.0, color);
                y += grid;
            }
        }

        for obj in &self.objects {
            match obj.kind {
                ObjectKind::Key => {
                    draw_circle(
                        obj.x + obj.width / 2.0,
                        obj.y + obj.height / 2.0,
                        obj.width / 2.0,
                        GOLD,
                    );
                }
                ObjectKind::Gate => {
                    draw_rectangle(obj.x, obj.y, obj.width, obj.height, GRAY);
                    draw_rectangle_lines(obj.x, obj.y, obj.width, obj.height, 2.0, WHITE);
                }
                ObjectKind::Obstacle => {
                    draw_rectangle(obj.x, obj.y, obj.width, obj.height, RED);
                }
                ObjectKind::Platform => {
                    draw_rectangle(
                        obj.x,
                        obj.y,
                        obj.width,
                        obj.height,
                        Color::new(0.176, 0.176, 0.176, 1.0),
                    );
                    draw_rectangle_lines(obj.x, obj.y, obj.width, obj.height, 1.0, DARKGRAY);
                }
                ObjectKind::Wall => {
                    draw_rectangle(
                        obj.x,
                        obj.y,
                        obj.width,
                        obj.height,
                        Color::new(0.16, 0.18, 0.26, 1.0),
                    );
                    draw_rectangle_lines(obj.x, obj.y, obj.width, obj.height, 1.0, DARKGRAY);
                }
            }
        }

        // spawn marker
        draw_rectangle_lines(self.spawn.x, self.spawn.y, PLAYER_SIZE, PLAYER_SIZE, 2.0, GREEN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_tool(tool: EditorTool) -> EditorState {
        let mut editor = EditorState::new();
        while editor.tool() != tool {
            editor.cycle_tool(1);
        }
        editor
    }

    #[test]
    fn snap_quantizes_to_the_grid() {
        assert_eq!(EditorState::snap(vec2(47.0, 33.0), 20.0), vec2(40.0, 40.0));
        assert_eq!(EditorState::snap(vec2(50.0, 50.0), 20.0), vec2(60.0, 60.0));
        // zero grid disables snapping
        assert_eq!(EditorState::snap(vec2(47.0, 33.0), 0.0), vec2(47.0, 33.0));
    }

    #[test]
    fn placing_a_second_key_replaces_the_first() {
        let mut editor = with_tool(EditorTool::Key);
        editor.place(vec2(100.0, 100.0), 20.0);
        editor.place(vec2(300.0, 200.0), 20.0);
        let keys: Vec<&GameObject> = editor
            .objects
            .iter()
            .filter(|o| o.kind == ObjectKind::Key)
            .collect();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].x, 300.0);
    }

    #[test]
    fn eraser_removes_nearest_within_radius_only() {
        let mut editor = with_tool(EditorTool::Obstacle);
        editor.place(vec2(100.0, 100.0), 20.0);
        editor.place(vec2(400.0, 400.0), 20.0);
        assert_eq!(editor.objects.len(), 2);

        // far from everything: nothing removed
        assert!(!editor.erase_nearest(vec2(600.0, 100.0)));
        assert_eq!(editor.objects.len(), 2);

        // near the first obstacle's center (120, 115)
        assert!(editor.erase_nearest(vec2(125.0, 110.0)));
        assert_eq!(editor.objects.len(), 1);
        assert_eq!(editor.objects[0].x, 400.0);
    }

    #[test]
    fn drag_moves_object_snapped_and_clamped() {
        let mut editor = with_tool(EditorTool::Platform);
        editor.place(vec2(100.0, 100.0), 20.0);
        assert!(editor.begin_drag(vec2(110.0, 105.0)));
        editor.drag_to(vec2(790.0, 105.0), 20.0);
        editor.end_drag();
        let obj = editor.objects[0];
        // clamped so the 120-wide platform stays on the canvas
        assert!(obj.x + obj.width <= CANVAS_WIDTH);
        assert!(!editor.is_dragging());
    }

    #[test]
    fn spawn_tool_moves_the_spawn_point() {
        let mut editor = with_tool(EditorTool::Spawn);
        editor.place(vec2(207.0, 313.0), 20.0);
        assert_eq!(editor.spawn, vec2(200.0, 320.0));
        assert!(editor.objects.is_empty());
    }

    #[test]
    fn build_level_carries_mode_spawn_and_objects() {
        let mut editor = with_tool(EditorTool::Wall);
        editor.place(vec2(100.0, 100.0), 20.0);
        editor.toggle_mode();
        let level = editor.build_level();
        assert_eq!(level.mode, LevelMode::Maze);
        assert_eq!(level.objects.len(), 1);
        assert_eq!(level.spawn, editor.spawn);
    }

    #[test]
    fn tool_cycling_wraps_both_ways() {
        let mut editor = EditorState::new();
        editor.cycle_tool(-1);
        assert_eq!(editor.tool(), EditorTool::Eraser);
        editor.cycle_tool(1);
        assert_eq!(editor.tool(), EditorTool::Platform);
    }
}
