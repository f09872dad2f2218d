mod config;
mod editor;
mod game;
mod input;
mod leaderboard;
mod level;
mod skins;

use crate::config::{load_settings, save_settings, SETTINGS_PATH};
use crate::editor::{EditorState, EditorTool};
use crate::game::{GameSession, SessionState, TickEvent, TICK_DT};
use crate::input::{KeyBindings, VirtualJoystick};
use crate::leaderboard::{mock_leaderboard, rank_label};
use crate::level::{default_levels, LevelMode, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::skins::{select_skin, skin_catalog, skin_color, DEFAULT_SKIN};
use macroquad::prelude::*;

#[derive(Copy, Clone)]
enum Screen {
    Menu,
    LevelSelect,
    Custom,
    Game,
    Editor,
    Skins,
    Leaderboard,
}

/// Where the running session came from, so Escape and completion know where
/// to return.
#[derive(Copy, Clone)]
enum GameOrigin {
    LevelSelect(usize),
    Editor,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Key World".to_string(),
        window_width: CANVAS_WIDTH as i32,
        window_height: CANVAS_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let settings = load_settings(SETTINGS_PATH);
    println!("Using settings: {settings:?}");

    let bindings = KeyBindings::for_scheme(&settings.control_scheme);
    let mut joystick = VirtualJoystick::new();
    let levels = default_levels();
    let catalog = skin_catalog();
    let board = mock_leaderboard();

    let mut screen = Screen::Menu;
    let mut menu_index: i32 = 0;
    let mut level_index: i32 = 0;
    let mut skin_index: i32 = 0;
    let mut selected_skin: &str = DEFAULT_SKIN;
    // session-scoped only; nothing here survives a restart
    let mut best_stars: Vec<u32> = vec![0; levels.len()];

    let mut session: Option<GameSession> = None;
    let mut origin = GameOrigin::LevelSelect(0);
    let mut completed: Option<u32> = None;
    let mut tick_accum: f32 = 0.0;

    let mut editor = EditorState::new();

    loop {
        let dt = get_frame_time();

        match screen {
            Screen::Menu => {
                let up = is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W);
                let down = is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S);

                if up {
                    menu_index = (menu_index - 1).rem_euclid(6);
                }
                if down {
                    menu_index = (menu_index + 1).rem_euclid(6);
                }

                if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Space) {
                    match menu_index {
                        0 => {
                            level_index = 0;
                            screen = Screen::LevelSelect;
                        }
                        1 => {
                            screen = Screen::Custom;
                        }
                        2 => {
                            screen = Screen::Editor;
                        }
                        3 => {
                            skin_index = 0;
                            screen = Screen::Skins;
                        }
                        4 => {
                            screen = Screen::Leaderboard;
                        }
                        5 => {
                            break;
                        }
                        _ => {}
                    }
                }
            }
            Screen::LevelSelect => {
                let up = is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W);
                let down = is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S);
                let count = levels.len().max(1) as i32;

                if up {
                    level_index = (level_index - 1).rem_euclid(count);
                }
                if down {
                    level_index = (level_index + 1).rem_euclid(count);
                }

                if is_key_pressed(KeyCode::Escape) {
                    screen = Screen::Menu;
                } else if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Space) {
                    match levels.get(level_index as usize) {
                        Some(level) => {
                            session = Some(GameSession::new(level.clone()));
                            origin = GameOrigin::LevelSelect(level_index as usize);
                            completed = None;
                            tick_accum = 0.0;
                            screen = Screen::Game;
                        }
                        None => {
                            screen = Screen::Menu;
                        }
                    }
                }
            }
            Screen::Custom => {
                // no custom level loader; this screen only shows the empty state
                if is_key_pressed(KeyCode::Escape)
                    || is_key_pressed(KeyCode::Enter)
                    || is_key_pressed(KeyCode::Space)
                {
                    screen = Screen::Menu;
                }
            }
            Screen::Game => {
                if is_key_pressed(KeyCode::Escape) {
                    session = None;
                    screen = match origin {
                        GameOrigin::LevelSelect(_) => Screen::LevelSelect,
                        GameOrigin::Editor => Screen::Editor,
                    };
                } else if completed.is_some() {
                    if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Space) {
                        session = None;
                        screen = match origin {
                            GameOrigin::LevelSelect(_) => Screen::LevelSelect,
                            GameOrigin::Editor => Screen::Editor,
                        };
                    }
                } else if let Some(ref mut s) = session {
                    joystick.update();
                    tick_accum += dt;
                    if tick_accum >= TICK_DT {
                        // a slow frame delays the next tick; ticks never pile up
                        tick_accum = (tick_accum - TICK_DT).min(TICK_DT);
                        let held = bindings.sample(&joystick);
                        if let Some(TickEvent::Completed(stars)) = s.step(&held) {
                            if let GameOrigin::LevelSelect(i) = origin {
                                if let Some(best) = best_stars.get_mut(i) {
                                    *best = (*best).max(stars);
                                }
                            }
                            println!("Level '{}' completed with {} stars", s.level.name, stars);
                            completed = Some(stars);
                        }
                    }
                } else {
                    screen = Screen::Menu;
                }
            }
            Screen::Editor => {
                if is_key_pressed(KeyCode::Q) {
                    editor.cycle_tool(-1);
                }
                if is_key_pressed(KeyCode::E) {
                    editor.cycle_tool(1);
                }
                if is_key_pressed(KeyCode::M) {
                    editor.toggle_mode();
                }

                let mouse = mouse_position();
                let mouse_pos = vec2(mouse.0, mouse.1);

                if is_mouse_button_pressed(MouseButton::Left) {
                    let grabbed =
                        editor.tool() != EditorTool::Eraser && editor.begin_drag(mouse_pos);
                    if !grabbed {
                        editor.place(mouse_pos, settings.editor_grid);
                    }
                }
                if is_mouse_button_down(MouseButton::Left) && editor.is_dragging() {
                    editor.drag_to(mouse_pos, settings.editor_grid);
                }
                if is_mouse_button_released(MouseButton::Left) {
                    editor.end_drag();
                }
                if is_mouse_button_pressed(MouseButton::Right) {
                    editor.erase_nearest(mouse_pos);
                }

                if is_key_pressed(KeyCode::Enter) {
                    session = Some(GameSession::new(editor.build_level()));
                    origin = GameOrigin::Editor;
                    completed = None;
                    tick_accum = 0.0;
                    screen = Screen::Game;
                } else if is_key_pressed(KeyCode::Escape) {
                    // the draft stays in memory for the rest of the session
                    screen = Screen::Menu;
                }
            }
            Screen::Skins => {
                let up = is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W);
                let down = is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S);
                let count = catalog.len().max(1) as i32;

                if up {
                    skin_index = (skin_index - 1).rem_euclid(count);
                }
                if down {
                    skin_index = (skin_index + 1).rem_euclid(count);
                }

                if is_key_pressed(KeyCode::Escape) {
                    screen = Screen::Menu;
                } else if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Space) {
                    match catalog.get(skin_index as usize) {
                        Some(skin) => {
                            selected_skin = select_skin(&catalog, selected_skin, skin.id);
                        }
                        None => {
                            screen = Screen::Menu;
                        }
                    }
                }
            }
            Screen::Leaderboard => {
                if is_key_pressed(KeyCode::Escape)
                    || is_key_pressed(KeyCode::Enter)
                    || is_key_pressed(KeyCode::Space)
                {
                    screen = Screen::Menu;
                }
            }
        }

        clear_background(BLACK);

        match screen {
            Screen::Menu => {
                let center_x = screen_width() * 0.5;
                let center_y = screen_height() * 0.5;

                draw_text("KEY WORLD", center_x - 120.0, center_y - 100.0, 48.0, GOLD);

                let options = [
                    "Play",
                    "Custom Levels",
                    "Editor",
                    "Skins",
                    "Leaderboard",
                    "Quit",
                ];
                for (i, label) in options.iter().enumerate() {
                    let color = if menu_index == i as i32 { GREEN } else { GRAY };
                    draw_text(label, center_x - 80.0, center_y + i as f32 * 36.0, 28.0, color);
                }
                draw_text(
                    "Up/Down: move  Enter: select",
                    16.0,
                    screen_height() - 16.0,
                    20.0,
                    DARKGRAY,
                );
            }
            Screen::LevelSelect => {
                draw_text("Select Level", 60.0, 80.0, 36.0, YELLOW);

                for (i, level) in levels.iter().enumerate() {
                    let y = 150.0 + i as f32 * 60.0;
                    let color = if level_index == i as i32 { GREEN } else { GRAY };
                    let stars = "*".repeat((level.difficulty + 1).min(10) as usize);
                    draw_text(&format!("{}  [{}]", level.name, stars), 80.0, y, 28.0, color);
                    let best = best_stars.get(i).copied().unwrap_or(0);
                    if best > 0 {
                        draw_text(&format!("best: {best} stars"), 500.0, y, 22.0, GOLD);
                    }
                }
                draw_text(
                    "Enter: play  Esc: back",
                    16.0,
                    screen_height() - 16.0,
                    20.0,
                    DARKGRAY,
                );
            }
            Screen::Custom => {
                draw_text("Custom Levels", 60.0, 80.0, 36.0, YELLOW);
                draw_text(
                    "No levels available yet",
                    screen_width() * 0.5 - 140.0,
                    screen_height() * 0.5,
                    28.0,
                    GRAY,
                );
                draw_text("Esc: back", 16.0, screen_height() - 16.0, 20.0, DARKGRAY);
            }
            Screen::Game => {
                if let Some(ref s) = session {
                    s.draw(skin_color(&catalog, selected_skin));
                    if settings.debug_overlay {
                        s.debug_draw();
                    }

                    let stars = "*".repeat(s.stars() as usize);
                    draw_text(
                        &format!("{}  [{}]", s.level.name, stars),
                        16.0,
                        24.0,
                        24.0,
                        YELLOW,
                    );
                    if s.player.has_key {
                        draw_text("KEY", screen_width() - 80.0, 24.0, 24.0, GOLD);
                    }

                    let controls_hint = match s.level.mode {
                        LevelMode::Platformer => "Move: left/right  Jump: space",
                        LevelMode::Maze => "Move: arrows/WASD or drag",
                    };
                    draw_text(controls_hint, 16.0, 48.0, 20.0, DARKGRAY);

                    if let Some(anchor) = joystick.anchor() {
                        draw_circle_lines(
                            anchor.x,
                            anchor.y,
                            input::JOYSTICK_CLAMP_RADIUS,
                            2.0,
                            DARKGRAY,
                        );
                        if let Some(d) = joystick.displacement() {
                            draw_circle(anchor.x + d.x, anchor.y + d.y, 12.0, GRAY);
                        }
                    }

                    if s.state == SessionState::Won {
                        let center_x = screen_width() * 0.5;
                        let center_y = screen_height() * 0.5;
                        draw_rectangle(
                            center_x - 180.0,
                            center_y - 90.0,
                            360.0,
                            180.0,
                            Color::new(0.0, 0.0, 0.0, 0.85),
                        );
                        draw_rectangle_lines(
                            center_x - 180.0,
                            center_y - 90.0,
                            360.0,
                            180.0,
                            2.0,
                            GOLD,
                        );
                        draw_text("Level Complete!", center_x - 120.0, center_y - 30.0, 32.0, GOLD);
                        draw_text(
                            &format!("Stars earned: {stars}"),
                            center_x - 110.0,
                            center_y + 10.0,
                            26.0,
                            WHITE,
                        );
                        if completed.is_some() {
                            draw_text(
                                "Enter: continue",
                                center_x - 90.0,
                                center_y + 55.0,
                                24.0,
                                GREEN,
                            );
                        }
                    }
                }

                if settings.show_fps {
                    draw_text(
                        &format!("FPS: {}", get_fps()),
                        screen_width() - 140.0,
                        screen_height() - 16.0,
                        20.0,
                        GREEN,
                    );
                }
            }
            Screen::Editor => {
                editor.draw(settings.editor_grid);

                let mode = match editor.mode {
                    LevelMode::Platformer => "Platformer",
                    LevelMode::Maze => "Maze",
                };
                let hud = format!("Editor | Tool: {} | Mode: {}", editor.tool().label(), mode);
                draw_text(&hud, 16.0, 28.0, 30.0, YELLOW);
                let hint =
                    "Q/E: tool  M: mode  LMB: place/drag  RMB: erase  Enter: playtest  Esc: back";
                draw_text(hint, 16.0, 58.0, 20.0, GRAY);
            }
            Screen::Skins => {
                draw_text("Skins", 60.0, 80.0, 36.0, YELLOW);

                for (i, skin) in catalog.iter().enumerate() {
                    let y = 140.0 + i as f32 * 56.0;
                    let swatch = if skin.unlocked {
                        skin.color
                    } else {
                        Color::new(skin.color.r, skin.color.g, skin.color.b, 0.3)
                    };
                    draw_rectangle(80.0, y - 20.0, 28.0, 28.0, swatch);

                    let label_color = if skin_index == i as i32 {
                        GREEN
                    } else if skin.unlocked {
                        GRAY
                    } else {
                        DARKGRAY
                    };
                    let suffix = if skin.id == selected_skin {
                        "  (selected)"
                    } else if !skin.unlocked {
                        "  (locked)"
                    } else {
                        ""
                    };
                    draw_text(&format!("{}{suffix}", skin.name), 130.0, y, 28.0, label_color);
                }
                draw_text(
                    "Enter: select  Esc: back",
                    16.0,
                    screen_height() - 16.0,
                    20.0,
                    DARKGRAY,
                );
            }
            Screen::Leaderboard => {
                draw_text("Leaderboard", 60.0, 80.0, 36.0, YELLOW);

                for entry in &board {
                    let y = 130.0 + entry.rank as f32 * 40.0;
                    let color = match entry.rank {
                        1 => GOLD,
                        2 => Color::new(0.75, 0.75, 0.75, 1.0),
                        3 => Color::new(0.8, 0.5, 0.2, 1.0),
                        _ => GRAY,
                    };
                    draw_text(&rank_label(entry.rank), 80.0, y, 26.0, color);
                    draw_text(entry.username, 160.0, y, 26.0, color);
                    draw_text(&format!("{} stars", entry.stars), 460.0, y, 26.0, color);
                    draw_text(&format!("{} levels", entry.levels), 620.0, y, 26.0, color);
                }
                draw_text("Esc: back", 16.0, screen_height() - 16.0, 20.0, DARKGRAY);
            }
        }

        next_frame().await;
    }

    if let Err(e) = save_settings(SETTINGS_PATH, &settings) {
        eprintln!("{e}");
    }
}
