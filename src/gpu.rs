//! GPU context and device management.
//!
//! [`GpuContext`] owns the wgpu surface, device, queue, and surface
//! configuration, and is passed by reference to everything that touches the
//! GPU. It is created once at startup; any failure along the way is fatal
//! and surfaces as an [`InitError`] so the process can exit before the
//! frame loop ever runs.

use std::sync::Arc;
use winit::window::Window;

/// A startup failure while bringing up the window or GPU.
///
/// None of these are recoverable: there are no retries and no degraded
/// mode. The error propagates to `main`, which reports it and exits.
#[derive(Debug)]
pub enum InitError {
    /// The event loop could not be created or run.
    EventLoop(winit::error::EventLoopError),
    /// The window could not be created.
    Window(winit::error::OsError),
    /// The rendering surface could not be created from the window.
    Surface(wgpu::CreateSurfaceError),
    /// No suitable GPU adapter was found.
    Adapter(wgpu::RequestAdapterError),
    /// The logical device could not be created.
    Device(wgpu::RequestDeviceError),
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitError::EventLoop(e) => write!(f, "event loop error: {e}"),
            InitError::Window(e) => write!(f, "window creation failed: {e}"),
            InitError::Surface(e) => write!(f, "surface creation failed: {e}"),
            InitError::Adapter(e) => write!(f, "no suitable GPU adapter: {e}"),
            InitError::Device(e) => write!(f, "device creation failed: {e}"),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InitError::EventLoop(e) => Some(e),
            InitError::Window(e) => Some(e),
            InitError::Surface(e) => Some(e),
            InitError::Adapter(e) => Some(e),
            InitError::Device(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for InitError {
    fn from(e: winit::error::EventLoopError) -> Self {
        InitError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for InitError {
    fn from(e: winit::error::OsError) -> Self {
        InitError::Window(e)
    }
}

/// Core GPU context holding wgpu resources.
///
/// Fields are public for direct wgpu access where the pass needs it. The
/// context is created once and borrowed everywhere else.
pub struct GpuContext {
    /// The surface presenting rendered frames to the window.
    pub surface: wgpu::Surface<'static>,
    /// The logical device for creating resources and pipelines.
    pub device: wgpu::Device,
    /// The command queue for submitting work.
    pub queue: wgpu::Queue,
    /// Current surface configuration (format, size, present mode).
    pub config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    /// Create a GPU context from a winit window.
    ///
    /// Runs the full wgpu bring-up: instance, surface, adapter, device and
    /// queue, then configures the surface with an sRGB format and Fifo
    /// present mode. Blocks on the async adapter and device requests.
    pub fn new(window: Arc<Window>) -> Result<Self, InitError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(InitError::Surface)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(InitError::Adapter)?;

        log::info!("rendering on {}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Orrery Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: Default::default(),
            experimental_features: Default::default(),
        }))
        .map_err(InitError::Device)?;

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
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    /// Resize the surface to new dimensions.
    ///
    /// Zero-sized dimensions are ignored; they show up during minimize and
    /// would trip wgpu validation.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Current surface width in pixels.
    pub fn width(&self) -> u32 {
        self.config.width
    }

    /// Current surface height in pixels.
    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// Current aspect ratio (width / height).
    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height as f32
    }
}
