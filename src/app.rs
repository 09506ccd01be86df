//! The windowed frame loop.
//!
//! Startup happens in `resumed`: window, GPU context, the 13 scene meshes,
//! and the render pass. Any failure there aborts the run before the frame
//! loop starts. After that every `RedrawRequested` drains pending thruster
//! pulses into the spacecraft, composes the draw list from the elapsed
//! clock, and renders it.

use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::camera::Camera;
use crate::gpu::{GpuContext, InitError};
use crate::input::Input;
use crate::mesh::SceneMeshes;
use crate::scene;
use crate::scene_pass::{CLEAR_COLOR, ScenePass};
use crate::spacecraft::SpacecraftState;

/// Window configuration.
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Solar System".to_string(),
            width: 1200,
            height: 600,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Run the demo with the default window.
pub fn run() -> Result<(), InitError> {
    run_with_config(AppConfig::default())
}

/// Run the demo with a custom window title or size.
pub fn run_with_config(config: AppConfig) -> Result<(), InitError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    // A failure inside `resumed` exits the loop and parks the error here.
    match app.init_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    pass: Option<ScenePass>,
    meshes: Option<SceneMeshes>,
    input: Input,
    spacecraft: SpacecraftState,
    camera: Camera,
    start: Instant,
    init_error: Option<InitError>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            gpu: None,
            pass: None,
            meshes: None,
            input: Input::new(),
            spacecraft: SpacecraftState::new(),
            camera: Camera::new(),
            start: Instant::now(),
            init_error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: InitError) {
        self.init_error = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu), Some(pass), Some(meshes)) = (
            self.window.as_ref(),
            self.gpu.as_ref(),
            self.pass.as_mut(),
            self.meshes.as_ref(),
        ) else {
            return;
        };

        for thruster in self.input.drain() {
            self.spacecraft.apply(thruster);
        }

        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let commands = scene::compose(elapsed_ms, &self.spacecraft);
        pass.prepare(gpu, commands.len());

        let output = match gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure and pick the frame up on the next redraw.
                gpu.surface.configure(&gpu.device, &gpu.config);
                window.request_redraw();
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                window.request_redraw();
                return;
            }
            Err(err) => {
                log::error!("surface unusable: {err}");
                event_loop.exit();
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &pass.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.render(gpu, &mut render_pass, &self.camera, meshes, &commands);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };

        let gpu = match GpuContext::new(window.clone()) {
            Ok(gpu) => gpu,
            Err(err) => return self.fail(event_loop, err),
        };

        let pass = ScenePass::new(&gpu, scene::DRAW_COUNT);
        let meshes = SceneMeshes::create(&gpu);
        log::info!("scene ready, entering frame loop");

        self.gpu = Some(gpu);
        self.pass = Some(pass);
        self.meshes = Some(meshes);
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => (),
        }
    }
}
