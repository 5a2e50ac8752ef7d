//! Window, event loop and the per-frame drive.

use std::sync::mpsc;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::camera::OrbitCamera;
use crate::config::SceneConfig;
use crate::error::{AppError, PhotoError};
use crate::gallery::{self, DecodedPhoto};
use crate::gpu::GpuState;
use crate::morph::SceneMode;
use crate::scene::Scene;
use crate::time::FrameClock;
use crate::ui;

/// Build the scene from `config` and run it. Blocks until the window closes.
pub fn run(config: SceneConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    // Bootstrap failures inside resumed() can only surface here.
    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    scene: Scene,
    camera: OrbitCamera,
    clock: FrameClock,
    photo_rx: mpsc::Receiver<(usize, Result<DecodedPhoto, PhotoError>)>,

    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    fatal: Option<AppError>,

    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
}

impl App {
    fn new(config: SceneConfig) -> Self {
        let photo_rx = gallery::spawn_loader(config.photos.clone());
        Self {
            scene: Scene::new(&config),
            camera: OrbitCamera::new(),
            clock: FrameClock::new(),
            photo_rx,
            window: None,
            gpu: None,
            fatal: None,
            mouse_pressed: false,
            last_mouse_pos: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attrs = Window::default_attributes()
            .with_title("treemorph")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = pollster::block_on(GpuState::new(window.clone(), self.scene.photo_count()))?;

        self.window = Some(window);
        self.gpu = Some(gpu);
        Ok(())
    }

    /// Swap in any photos the decode thread has finished since last frame.
    fn drain_photos(&mut self) {
        let Some(gpu) = &mut self.gpu else { return };
        while let Ok((index, result)) = self.photo_rx.try_recv() {
            match result {
                Ok(photo) => gpu.upload_photo(index, photo.width, photo.height, &photo.rgba),
                Err(err) => eprintln!("{}", err),
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.drain_photos();

        let (Some(window), Some(gpu)) = (self.window.clone(), self.gpu.as_mut()) else {
            return;
        };

        let (time, dt) = self.clock.tick();

        gpu.overlay.begin_frame(&window);
        let picked = ui::draw(&gpu.overlay.ctx, self.scene.mode(), self.clock.fps());
        let overlay_frame = gpu.overlay.end_frame(&window);

        if let Some(mode) = picked {
            self.scene.set_mode(mode);
        }

        if self.scene.mode() == SceneMode::Formed {
            self.camera.auto_rotate(dt);
        }

        self.scene.update(dt, time);

        match gpu.render(&window, &self.scene, &self.camera, time, dt, &overlay_frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let size = gpu.size;
                gpu.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
            Err(e) => eprintln!("Render error: {:?}", e),
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                self.fatal = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        // The overlay gets first refusal on pointer events.
        if let (Some(window), Some(gpu)) = (&self.window, &mut self.gpu) {
            if gpu.overlay.on_window_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        self.camera.orbit(dx, dy);
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                self.camera.zoom(scroll);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}
