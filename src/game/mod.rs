//! Per-frame update: input, movement and the fixture scene
//!
//! The host owns a `FrameMemory` for the lifetime of the window and calls
//! `update_and_render` once per display refresh with that frame's events.

mod fixtures;
mod mosaic;

use fixtures::{triangles, BACKGROUND};
use mosaic::draw_mosaic;

use crate::display::RenderBuffer;
use crate::math::{scale_pts, vec2, Color, Rect, Vec2};
use crate::raster::{draw_box, draw_polygon, draw_rect_pts, draw_triangle, draw_triangle_outline};

/// Keys the scene reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Escape,
    Num1,
    Num2,
    Num3,
}

impl Key {
    /// Parse a key name as used by remote input ("w", "esc", "1", ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "w" | "up" => Some(Self::W),
            "a" | "left" => Some(Self::A),
            "s" | "down" => Some(Self::S),
            "d" | "right" => Some(Self::D),
            "esc" | "escape" => Some(Self::Escape),
            "1" => Some(Self::Num1),
            "2" => Some(Self::Num2),
            "3" => Some(Self::Num3),
            _ => None,
        }
    }
}

/// One keyboard transition, consumed by the frame it was delivered to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    KeyDown(Key),
    KeyUp(Key),
}

/// Movement intent from currently held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Scene state that survives between frames
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// True until the first frame has been rendered
    pub first_frame: bool,
    pub box1: [Vec2; 4],
    pub box2: [Vec2; 4],
    pub test_background: [Vec2; 4],
    /// Moved by WASD
    pub r1: Rect,
    pub r2: Rect,
    /// Fixture filled at 1:1 under the mosaic
    pub one: bool,
    /// Fixture filled and outlined at mosaic scale
    pub two: bool,
    /// Fixture wireframe at mosaic scale
    pub three: bool,
    pub movement: Movement,
}

/// Seed the scene geometry and display modes
pub fn init_state() -> GameState {
    GameState {
        first_frame: true,
        box1: [vec2(100.0, 100.0), vec2(200.0, 100.0), vec2(200.0, 200.0), vec2(100.0, 200.0)],
        box2: [vec2(100.0, 300.0), vec2(200.0, 300.0), vec2(200.0, 400.0), vec2(100.0, 400.0)],
        test_background: BACKGROUND,
        r1: Rect::from_origin_size(vec2(100.0, 100.0), vec2(50.0, 50.0)),
        r2: Rect::from_origin_size(vec2(100.0, 300.0), vec2(100.0, 100.0)),
        one: true,
        two: false,
        three: false,
        movement: Movement::default(),
    }
}

impl GameState {
    /// Apply one input event
    ///
    /// Returns false when the event asks the host to stop.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::KeyDown(key) => match key {
                Key::W => self.movement.up = true,
                Key::S => self.movement.down = true,
                Key::A => self.movement.left = true,
                Key::D => self.movement.right = true,
                // 1 and 2 both flip the filled / outlined pair together
                Key::Num1 | Key::Num2 => {
                    self.one = !self.one;
                    self.two = !self.two;
                    log::debug!("render modes: one={} two={}", self.one, self.two);
                },
                Key::Num3 => {
                    self.three = !self.three;
                    log::debug!("render modes: three={}", self.three);
                },
                Key::Escape => {},
            },
            Event::KeyUp(key) => match key {
                Key::W => self.movement.up = false,
                Key::S => self.movement.down = false,
                Key::A => self.movement.left = false,
                Key::D => self.movement.right = false,
                Key::Escape => return false,
                Key::Num1 | Key::Num2 | Key::Num3 => {},
            },
        }
        true
    }

    /// Move `r1` by `speed` pixels along every held direction
    pub fn apply_movement(&mut self, speed: f32) {
        let m = self.movement;
        let mut delta = Vec2::zero();
        if m.up {
            delta.y += speed;
        }
        if m.down {
            delta.y -= speed;
        }
        if m.left {
            delta.x -= speed;
        }
        if m.right {
            delta.x += speed;
        }
        self.r1.translate(delta);
    }
}

/// Per-frame tuning, usually taken from `Settings`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameConfig {
    /// Pixels per frame for a held movement key
    pub speed: f32,
    /// Mosaic block pitch; the fixture is scaled by the same factor
    pub cell_size: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            speed: 4.0,
            cell_size: 48.0,
        }
    }
}

/// Everything the frame update owns between calls
pub struct FrameMemory {
    pub state: GameState,
    /// Snapshot of the low-resolution pass, read back by the mosaic
    pub scratch: RenderBuffer,
    /// Cleared when the scene asks to quit
    pub running: bool,
}

impl FrameMemory {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: init_state(),
            scratch: RenderBuffer::with_size(width, height),
            running: true,
        }
    }
}

/// Run one frame: drain `events`, move, then redraw `buffer` from scratch
pub fn update_and_render(
    memory: &mut FrameMemory,
    events: &[Event],
    buffer: &mut RenderBuffer,
    config: &FrameConfig,
) {
    let state = &mut memory.state;
    if state.first_frame {
        log::debug!("first frame: {}x{}", buffer.width(), buffer.height());
    }

    for &event in events {
        if !state.handle_event(event) {
            memory.running = false;
        }
    }
    state.apply_movement(config.speed);

    buffer.clear(Color::BLACK);
    draw_rect_pts(buffer, &state.test_background, Color::WHITE);

    let mut fixture = triangles();
    if state.one {
        for t in &fixture {
            draw_triangle(buffer, t.points, t.color, true);
        }
    }

    // Low-res pass is done; the mosaic reads it back at block scale
    memory.scratch.copy_from(buffer);
    draw_mosaic(buffer, &memory.scratch, &state.test_background, config.cell_size);

    for t in &mut fixture {
        scale_pts(&mut t.points, config.cell_size);
    }
    if state.two {
        let fill = state.two;
        for t in &fixture {
            draw_triangle_outline(buffer, t.points, t.color, Color::BLACK, fill);
        }
    }
    if state.three {
        for t in &fixture {
            draw_triangle_outline(buffer, t.points, t.color, Color::BLACK, false);
        }
    }

    draw_polygon(buffer, &state.box1, Color::MAGENTA);
    draw_polygon(buffer, &state.box2, Color::TEAL);
    draw_box(buffer, state.r2, Color::LIGHT_GRAY);
    draw_box(buffer, state.r1, Color::WHITE);

    state.first_frame = false;
}
