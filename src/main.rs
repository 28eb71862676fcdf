//! Universe
//!
//! Real-time N-body gravity rendered as glowing points. Hold the left mouse
//! button to drag particle 0 around; `Q` or `Escape` quits.

mod input;

use glam::Vec2;
use input::PointerInput;
use particle_renderer::{GpuError, ParticleRenderer};
use particle_simulation::{FrameClock, Simulation, SimulationParams};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

const WINDOW_SIZE: u32 = 800;
const WINDOW_TITLE: &str = "Universe";

/// The grid-coarsened galaxy; swap in `SimulationParams::lattice()` for the
/// direct pairwise version
fn simulation_params() -> SimulationParams {
    SimulationParams::galaxy()
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    simulation: Simulation,
    renderer: ParticleRenderer,
    clock: FrameClock,
}

impl GpuState {
    async fn new(window: Arc<Window>, simulation: Simulation) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            // One simulation step per presented frame
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let params = *simulation.params();
        let renderer = ParticleRenderer::new(
            &device,
            &config,
            simulation.particle_count(),
            params.point_size,
        );
        log::info!("✓ Renderer initialized");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            simulation,
            renderer,
            clock: FrameClock::new(params.time_speed),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.renderer.resize(
                &self.device,
                &self.queue,
                new_size.width,
                new_size.height,
            );
            log::debug!("Resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Run one frame: step, upload, draw, present. Returns the smoothed FPS.
    fn render(&mut self, pointer: &PointerInput) -> Result<f32, wgpu::SurfaceError> {
        let dt = self.clock.tick();
        let pinned: Option<Vec2> = pointer.override_position(self.config.width, self.config.height);
        self.simulation.step(dt, pinned);

        self.renderer.upload(
            &self.queue,
            self.simulation.positions(),
            self.simulation.colors(),
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.render(
            &self.device,
            &self.queue,
            &view,
            self.simulation.particle_count() as u32,
        );

        output.present();
        Ok(self.clock.fps())
    }
}

struct App {
    params: SimulationParams,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    pointer: PointerInput,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_SIZE, WINDOW_SIZE));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Unable to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let simulation = Simulation::new(self.params);
        match pollster::block_on(GpuState::new(window.clone(), simulation)) {
            Ok(gpu_state) => {
                self.window = Some(window);
                self.gpu_state = Some(gpu_state);
            }
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape | KeyCode::KeyQ),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                if state == ElementState::Pressed {
                    self.pointer.press();
                } else {
                    self.pointer.release();
                }
                log::debug!("Particle 0 pinned: {}", self.pointer.is_held());
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.move_to(position.x, position.y);
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
                    match gpu_state.render(&self.pointer) {
                        Ok(fps) => {
                            window.set_title(&format!(
                                "{} - {:.0} FPS - {} particles",
                                WINDOW_TITLE,
                                fps,
                                gpu_state.simulation.particle_count()
                            ));
                        }
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu_state.resize(window.inner_size())
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Surface out of memory");
                            event_loop.exit()
                        }
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }
                }
            }

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting N-body gravity simulation...");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        params: simulation_params(),
        window: None,
        gpu_state: None,
        pointer: PointerInput::default(),
    };

    event_loop.run_app(&mut app)?;
    Ok(())
}
