/*!
Interactive front-end (feature `display`): presents the PPU framebuffer
in a window via `pixels` and maps keyboard state onto controller 1.

Key bindings: X = A, Z = B, A = Select, S = Start, arrow keys = D-pad.
*/

use std::sync::Arc;

use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::controller::Button;
use crate::nes::Nes;
use crate::ppu::{NES_HEIGHT, NES_WIDTH};

/// Run the machine under a window until the user closes it.
pub fn run(nes: Nes) -> Result<(), String> {
    let event_loop = EventLoop::new().map_err(|e| format!("event loop: {e}"))?;
    let mut app = App {
        nes,
        window: None,
        pixels: None,
    };
    event_loop
        .run_app(&mut app)
        .map_err(|e| format!("event loop: {e}"))
}

struct App {
    nes: Nes,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title("famicore")
            .with_inner_size(LogicalSize::new(
                (NES_WIDTH * 2) as f64,
                (NES_HEIGHT * 2) as f64,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("failed to create window"),
        );
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window.clone());
        let pixels = Pixels::new(NES_WIDTH as u32, NES_HEIGHT as u32, surface)
            .expect("failed to create surface");
        self.window = Some(window);
        self.pixels = Some(pixels);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(pixels) = &mut self.pixels {
                    let _ = pixels.resize_surface(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(button) = map_key(code) {
                        let pressed = event.state == ElementState::Pressed;
                        self.nes.bus.controllers[0].set_button(button, pressed);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.nes.step_frame();
                if let Some(pixels) = &mut self.pixels {
                    pixels
                        .frame_mut()
                        .copy_from_slice(self.nes.bus.ppu.framebuffer());
                    if pixels.render().is_err() {
                        event_loop.exit();
                        return;
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn map_key(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::KeyX => Some(Button::A),
        KeyCode::KeyZ => Some(Button::B),
        KeyCode::KeyA => Some(Button::Select),
        KeyCode::KeyS => Some(Button::Start),
        KeyCode::ArrowUp => Some(Button::Up),
        KeyCode::ArrowDown => Some(Button::Down),
        KeyCode::ArrowLeft => Some(Button::Left),
        KeyCode::ArrowRight => Some(Button::Right),
        _ => None,
    }
}
