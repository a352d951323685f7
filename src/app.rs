use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    config::ViewerConfig,
    error::{Result, ViewerError},
    gfx::{
        camera::ControllerResponse,
        rendering::render_engine::{FrameOutcome, RenderEngine},
        scene::Scene,
    },
};

/// Window, renderer and scene wired to one event loop
pub struct SortBinApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    startup_error: Option<ViewerError>,
}

impl SortBinApp {
    /// Creates the event loop and builds the scene geometry
    pub fn new(config: ViewerConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;
        let scene = Scene::new(config.camera_manager());

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                scene,
                startup_error: None,
            },
        })
    }

    /// Runs until the window closes or ESC is pressed
    ///
    /// Returns the error that stopped startup, if any.
    pub fn run(self) -> Result<()> {
        let SortBinApp {
            event_loop,
            mut app_state,
        } = self;

        // Redraw only on input and resize
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut app_state)?;

        match app_state.startup_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (width, height) = self.config.window_size;
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(self.config.title.as_str())
                    .with_inner_size(LogicalSize::new(width, height)),
            )?,
        );

        let PhysicalSize { width, height } = window.inner_size();
        let mut renderer = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            self.config.clear_color,
        ))?;
        renderer.upload_mesh(&self.scene.mesh);

        self.scene
            .camera_manager
            .camera
            .resize_projection(width, height);
        window.request_redraw();

        self.window = Some(window);
        self.render_engine = Some(renderer);
        Ok(())
    }

    fn request_redraw(&self) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init_graphics(event_loop) {
            log::error!("Startup failed: {}", e);
            self.startup_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match self.scene.camera_manager.process_event(&event) {
            ControllerResponse::Exit => {
                log::info!("Exit requested");
                event_loop.exit();
                return;
            }
            ControllerResponse::Redraw => self.request_redraw(),
            ControllerResponse::Ignored => {}
        }

        match event {
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                self.request_redraw();
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let Some(render_engine) = self.render_engine.as_mut() else {
                    return;
                };
                self.scene.update();
                render_engine.update(self.scene.camera_manager.camera.uniform);
                if render_engine.render_frame() == FrameOutcome::Fatal {
                    event_loop.exit();
                }
            }
            _ => (),
        }
    }
}
