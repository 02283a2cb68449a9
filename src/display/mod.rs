mod render_buffer;

pub use render_buffer::RenderBuffer;

use sdl2::event::Event as SdlEvent;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use crate::game::{Event, Key};

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Key(Event),
}

impl Display {
    /// Create display with custom resolution and VSync settings
    /// vsync=true: locked to monitor refresh (typically 60fps)
    /// vsync=false: uncapped framerate for performance testing
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Upload the buffer and show it
    ///
    /// Buffer memory starts at the bottom row, so the copy is flipped
    /// vertically.
    pub fn present(&mut self, target: &mut RenderTarget, buffer: &RenderBuffer) -> Result<(), String> {
        if (buffer.width(), buffer.height()) != (target.width, target.height) {
            return Err(format!(
                "buffer is {}x{} but render target is {}x{}",
                buffer.width(),
                buffer.height(),
                target.width,
                target.height
            ));
        }

        target
            .texture
            .update(None, buffer.as_bytes(), buffer.pitch())
            .map_err(|e| e.to_string())?;

        self.canvas.copy_ex(&target.texture, None, None, 0.0, None, false, true)?;
        self.canvas.present();
        Ok(())
    }

    /// Drain pending window events, keeping only what the scene reacts to
    ///
    /// Auto-repeated key downs are dropped; a held key is one press.
    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                SdlEvent::Quit { .. } => events.push(InputEvent::Quit),
                SdlEvent::KeyDown {
                    keycode: Some(k),
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = map_keycode(k) {
                        events.push(InputEvent::Key(Event::KeyDown(key)));
                    }
                },
                SdlEvent::KeyUp {
                    keycode: Some(k), ..
                } => {
                    if let Some(key) = map_keycode(k) {
                        events.push(InputEvent::Key(Event::KeyUp(key)));
                    }
                },
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Streaming texture matching the buffer's `0x00RRGGBB` words
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }
}

fn map_keycode(k: Keycode) -> Option<Key> {
    match k {
        Keycode::W => Some(Key::W),
        Keycode::A => Some(Key::A),
        Keycode::S => Some(Key::S),
        Keycode::D => Some(Key::D),
        Keycode::Escape => Some(Key::Escape),
        Keycode::Num1 | Keycode::Kp1 => Some(Key::Num1),
        Keycode::Num2 | Keycode::Kp2 => Some(Key::Num2),
        Keycode::Num3 | Keycode::Kp3 => Some(Key::Num3),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keycode_mapping() {
        assert_eq!(map_keycode(Keycode::W), Some(Key::W));
        assert_eq!(map_keycode(Keycode::Kp2), Some(Key::Num2));
        assert_eq!(map_keycode(Keycode::Escape), Some(Key::Escape));
        assert_eq!(map_keycode(Keycode::Tab), None);
    }
}
