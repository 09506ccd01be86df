//! The depth-tested render pass for the whole scene.
//!
//! One pipeline draws everything: planets, satellites, spacecraft. Shading
//! is deliberately fixed-function flavored, a single point light over a
//! single material.
//!
//! # Uniforms
//!
//! - **Group 0**: per-frame globals: view-projection matrix, the point
//!   light, the material, and the scene ambient term.
//! - **Group 1**: per-draw model and normal matrices, packed into one
//!   uniform buffer with a dynamic offset per draw command. Each command
//!   gets its own aligned slot so every draw reads the matrices written for
//!   it, no matter when the queued buffer writes land.
//!
//! # Depth
//!
//! The pass owns a `Depth32Float` buffer recreated on resize; call
//! [`ScenePass::prepare`] before building the render pass each frame.

use glam::{Mat4, Vec3, Vec4};

use crate::camera::Camera;
use crate::gpu::GpuContext;
use crate::mesh::{SceneMeshes, Vertex3d};
use crate::scene::DrawCommand;

/// Background color behind the system.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

/// The single point light illuminating the scene.
#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec4,
    /// Hard cutoff distance; far enough to cover the whole system.
    pub range: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 50.0, 0.0),
            color: Vec4::ONE,
            range: 5000.0,
        }
    }
}

/// The single material every mesh is shaded with.
#[derive(Clone, Copy, Debug)]
pub struct Material {
    pub diffuse: Vec4,
    pub ambient: Vec4,
}

impl Default for Material {
    fn default() -> Self {
        // Yellow, diffuse and ambient alike.
        Self {
            diffuse: Vec4::new(1.0, 1.0, 0.0, 1.0),
            ambient: Vec4::new(1.0, 1.0, 0.0, 1.0),
        }
    }
}

/// Low grey ambient floor so unlit faces stay visible.
const SCENE_AMBIENT: Vec4 = Vec4::new(0.125, 0.125, 0.125, 1.0);

/// Per-frame globals uploaded once per frame.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct GlobalUniforms {
    view_proj: [[f32; 4]; 4],
    /// xyz = position, w = range.
    light_pos_range: [f32; 4],
    light_color: [f32; 4],
    material_diffuse: [f32; 4],
    material_ambient: [f32; 4],
    scene_ambient: [f32; 4],
}

/// Per-draw uniforms, one aligned slot per draw command.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniforms {
    model: [[f32; 4]; 4],
    /// Inverse transpose of the model matrix.
    normal: [[f32; 4]; 4],
}

/// The scene's one render pass: pipeline, uniforms, and depth buffer.
pub struct ScenePass {
    pipeline: wgpu::RenderPipeline,
    global_buffer: wgpu::Buffer,
    global_bind_group: wgpu::BindGroup,
    model_bind_group_layout: wgpu::BindGroupLayout,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    model_stride: u64,
    model_capacity: usize,
    pub(crate) depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
    pub light: PointLight,
    pub material: Material,
}

impl ScenePass {
    /// Create the pass with capacity for `draw_capacity` commands per frame.
    pub fn new(gpu: &GpuContext, draw_capacity: usize) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let global_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Global Uniforms"),
            size: std::mem::size_of::<GlobalUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let global_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Global Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let global_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &global_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: global_buffer.as_entire_binding(),
            }],
        });

        let model_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Model Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ModelUniforms>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let align = device.limits().min_uniform_buffer_offset_alignment as u64;
        let model_stride = (std::mem::size_of::<ModelUniforms>() as u64).next_multiple_of(align);
        let (model_buffer, model_bind_group) = Self::create_model_buffer(
            gpu,
            &model_bind_group_layout,
            model_stride,
            draw_capacity,
        );

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&global_bind_group_layout, &model_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex3d::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                front_face: wgpu::FrontFace::Ccw,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let depth_view = Self::create_depth_texture(gpu);

        Self {
            pipeline,
            global_buffer,
            global_bind_group,
            model_bind_group_layout,
            model_buffer,
            model_bind_group,
            model_stride,
            model_capacity: draw_capacity,
            depth_view,
            depth_size: (gpu.width(), gpu.height()),
            light: PointLight::default(),
            material: Material::default(),
        }
    }

    fn create_model_buffer(
        gpu: &GpuContext,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        capacity: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Model Uniforms"),
            size: stride * capacity.max(1) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Model Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ModelUniforms>() as u64),
                }),
            }],
        });
        (buffer, bind_group)
    }

    fn create_depth_texture(gpu: &GpuContext) -> wgpu::TextureView {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: gpu.width(),
                height: gpu.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Make buffers match the frame about to be rendered.
    ///
    /// Recreates the depth texture if the surface was resized and grows the
    /// model uniform buffer if the draw list outgrew it.
    pub fn prepare(&mut self, gpu: &GpuContext, draw_count: usize) {
        if self.depth_size != (gpu.width(), gpu.height()) {
            self.depth_view = Self::create_depth_texture(gpu);
            self.depth_size = (gpu.width(), gpu.height());
        }
        if draw_count > self.model_capacity {
            let (buffer, bind_group) = Self::create_model_buffer(
                gpu,
                &self.model_bind_group_layout,
                self.model_stride,
                draw_count,
            );
            self.model_buffer = buffer;
            self.model_bind_group = bind_group;
            self.model_capacity = draw_count;
        }
    }

    /// Record the frame's draw commands into an open render pass.
    ///
    /// Uploads the per-frame globals once, then one model slot per command,
    /// each draw bound at its own dynamic offset.
    pub fn render(
        &self,
        gpu: &GpuContext,
        render_pass: &mut wgpu::RenderPass,
        camera: &Camera,
        meshes: &SceneMeshes,
        commands: &[DrawCommand],
    ) {
        if commands.is_empty() {
            return;
        }
        debug_assert!(commands.len() <= self.model_capacity);

        let globals = GlobalUniforms {
            view_proj: camera.view_projection(gpu.aspect()).to_cols_array_2d(),
            light_pos_range: self.light.position.extend(self.light.range).to_array(),
            light_color: self.light.color.to_array(),
            material_diffuse: self.material.diffuse.to_array(),
            material_ambient: self.material.ambient.to_array(),
            scene_ambient: SCENE_AMBIENT.to_array(),
        };
        gpu.queue
            .write_buffer(&self.global_buffer, 0, bytemuck::cast_slice(&[globals]));

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.global_bind_group, &[]);

        for (i, command) in commands.iter().enumerate() {
            let model: Mat4 = command.world;
            let uniforms = ModelUniforms {
                model: model.to_cols_array_2d(),
                normal: model.inverse().transpose().to_cols_array_2d(),
            };

            let offset = i as u64 * self.model_stride;
            gpu.queue
                .write_buffer(&self.model_buffer, offset, bytemuck::cast_slice(&[uniforms]));

            render_pass.set_bind_group(1, &self.model_bind_group, &[offset as u32]);

            let mesh = meshes.get(command.mesh);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}
