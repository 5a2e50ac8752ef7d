//! The wgpu renderer.
//!
//! Four passes per frame: the lit meshes (needles, bells, gifts, frames),
//! the photo faces, the snow motes, then the offscreen result goes through
//! the finishing pass onto the surface with the overlay composited last.

pub mod overlay;
pub mod post;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::camera::OrbitCamera;
use crate::error::GpuError;
use crate::mesh::{self, Mesh, MeshVertex};
use crate::morph::Instance;
use crate::scene::Scene;
use crate::snow::MoteInstance;

use overlay::{Overlay, OverlayFrame};
use post::PostState;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Per-frame uniforms shared by every pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    camera_right: [f32; 4],
    camera_up: [f32; 4],
    resolution: [f32; 2],
    time: f32,
    delta_time: f32,
}

/// Vertex of the photo face quad.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct QuadVertex {
    position: [f32; 3],
    uv: [f32; 2],
}

/// The photo quad sits inside the frame border, nudged forward so it does
/// not z-fight the frame face. The frame leaves the classic wide strip at
/// the bottom.
const PHOTO_QUAD: [QuadVertex; 6] = [
    QuadVertex { position: [-0.5, -0.4, 0.026], uv: [0.0, 1.0] },
    QuadVertex { position: [0.5, -0.4, 0.026], uv: [1.0, 1.0] },
    QuadVertex { position: [0.5, 0.6, 0.026], uv: [1.0, 0.0] },
    QuadVertex { position: [-0.5, -0.4, 0.026], uv: [0.0, 1.0] },
    QuadVertex { position: [0.5, 0.6, 0.026], uv: [1.0, 0.0] },
    QuadVertex { position: [-0.5, 0.6, 0.026], uv: [0.0, 0.0] },
];

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
    7 => Float32x3,
    8 => Float32,
];

fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: Instance::STRIDE as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRS,
    }
}

/// One uploaded mesh plus its per-frame instance buffer.
struct MeshDraw {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    instances: InstanceBuffer,
}

impl MeshDraw {
    fn new(device: &wgpu::Device, label: &str, mesh: &Mesh) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            vertex_buffer,
            vertex_count: mesh.vertex_count(),
            instances: InstanceBuffer::new(),
        }
    }
}

/// Instance storage that regrows when a frame needs more room.
struct InstanceBuffer {
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    count: u32,
}

impl InstanceBuffer {
    fn new() -> Self {
        Self {
            buffer: None,
            capacity: 0,
            count: 0,
        }
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[u8], count: usize) {
        self.count = count as u32;
        if count == 0 {
            return;
        }
        match &self.buffer {
            Some(buffer) if count <= self.capacity => {
                queue.write_buffer(buffer, 0, data);
            }
            _ => {
                self.buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Instance Buffer"),
                    contents: data,
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                }));
                self.capacity = count;
            }
        }
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,

    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,

    scene_pipeline: wgpu::RenderPipeline,
    mote_pipeline: wgpu::RenderPipeline,
    gallery_pipeline: wgpu::RenderPipeline,

    needles: MeshDraw,
    ornaments: MeshDraw,
    gifts: MeshDraw,
    frames: MeshDraw,
    motes: InstanceBuffer,

    quad_buffer: wgpu::Buffer,
    photo_layout: wgpu::BindGroupLayout,
    photo_sampler: wgpu::Sampler,
    photo_bind_groups: Vec<wgpu::BindGroup>,

    post: PostState,
    pub overlay: Overlay,
}

impl GpuState {
    pub async fn new(window: Arc<Window>, photo_count: usize) -> Result<Self, GpuError> {
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
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
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
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniforms = Uniforms {
            view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            camera_pos: [0.0; 4],
            camera_right: [1.0, 0.0, 0.0, 0.0],
            camera_up: [0.0, 1.0, 0.0, 0.0],
            resolution: [config.width as f32, config.height as f32],
            time: 0.0,
            delta_time: 0.0,
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Uniform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let photo_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Photo Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let photo_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Photo Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        // Every card starts on the placeholder until its photo decodes.
        let placeholder = upload_texture(&device, &queue, 1, 1, &[96, 96, 104, 255]);
        let photo_bind_groups = (0..photo_count)
            .map(|_| photo_bind_group(&device, &photo_layout, &placeholder, &photo_sampler))
            .collect();

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });
        let mote_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mote Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/motes.wgsl").into()),
        });
        let gallery_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Gallery Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/gallery.wgsl").into()),
        });

        let mesh_layout = wgpu::VertexBufferLayout {
            array_stride: MeshVertex::STRIDE as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x3,
                2 => Float32x3,
            ],
        };

        let scene_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });

        let scene_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Pipeline"),
            layout: Some(&scene_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &scene_shader,
                entry_point: Some("vs_main"),
                buffers: &[mesh_layout.clone(), instance_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &scene_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let mote_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mote Pipeline"),
            layout: Some(&scene_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &mote_shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: MoteInstance::STRIDE as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32,
                        2 => Float32x3,
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &mote_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    // Additive: motes brighten whatever is behind them.
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent::OVER,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let gallery_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Gallery Pipeline Layout"),
                bind_group_layouts: &[&uniform_layout, &photo_layout],
                push_constant_ranges: &[],
            });

        let gallery_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Gallery Pipeline"),
            layout: Some(&gallery_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &gallery_shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x2,
                        ],
                    },
                    instance_layout(),
                ],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &gallery_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Photos read from both sides while cards tumble.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Photo Quad"),
            contents: bytemuck::cast_slice(&PHOTO_QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let needles = MeshDraw::new(&device, "Needle Mesh", &mesh::tetrahedron([1.0, 1.0, 1.0]));
        let ornaments = MeshDraw::new(&device, "Bell Mesh", &mesh::bell());
        let gifts = MeshDraw::new(&device, "Gift Mesh", &mesh::gift_box());
        let frames = MeshDraw::new(&device, "Frame Mesh", &mesh::polaroid_frame());

        let post = PostState::new(&device, &uniform_buffer, config.width, config.height, surface_format);
        let overlay = Overlay::new(&device, surface_format, &window);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            uniform_buffer,
            uniform_bind_group,
            scene_pipeline,
            mote_pipeline,
            gallery_pipeline,
            needles,
            ornaments,
            gifts,
            frames,
            motes: InstanceBuffer::new(),
            quad_buffer,
            photo_layout,
            photo_sampler,
            photo_bind_groups,
            post,
            overlay,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.post.resize(
            &self.device,
            &self.uniform_buffer,
            new_size.width,
            new_size.height,
            self.config.format,
        );
    }

    /// Swap a card's placeholder for its decoded photo.
    pub fn upload_photo(&mut self, index: usize, width: u32, height: u32, rgba: &[u8]) {
        if index >= self.photo_bind_groups.len() {
            return;
        }
        let view = upload_texture(&self.device, &self.queue, width, height, rgba);
        self.photo_bind_groups[index] =
            photo_bind_group(&self.device, &self.photo_layout, &view, &self.photo_sampler);
    }

    pub fn render(
        &mut self,
        window: &Window,
        scene: &Scene,
        camera: &OrbitCamera,
        time: f32,
        delta_time: f32,
        overlay_frame: &OverlayFrame,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let aspect = self.config.width as f32 / self.config.height.max(1) as f32;
        let (right, up) = camera.basis();
        let pos = camera.position();
        let uniforms = Uniforms {
            view_proj: camera.view_proj(aspect).to_cols_array_2d(),
            camera_pos: [pos.x, pos.y, pos.z, 1.0],
            camera_right: [right.x, right.y, right.z, 0.0],
            camera_up: [up.x, up.y, up.z, 0.0],
            resolution: [self.config.width as f32, self.config.height as f32],
            time,
            delta_time,
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        self.needles.instances.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(scene.needle_instances()),
            scene.needle_instances().len(),
        );
        self.ornaments.instances.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(scene.ornament_instances()),
            scene.ornament_instances().len(),
        );
        self.gifts.instances.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(scene.gift_instances()),
            scene.gift_instances().len(),
        );
        self.frames.instances.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(scene.card_instances()),
            scene.card_instances().len(),
        );
        self.motes.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(scene.mote_instances()),
            scene.mote_instances().len(),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: overlay_frame.pixels_per_point,
        };
        self.overlay.prepare(
            &self.device,
            &self.queue,
            &mut encoder,
            overlay_frame,
            &screen_descriptor,
        );

        // Scene pass into the offscreen target.
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.post.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.012,
                            g: 0.02,
                            b: 0.016,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.post.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.scene_pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            for draw in [&self.needles, &self.ornaments, &self.gifts, &self.frames] {
                if let Some(buffer) = &draw.instances.buffer {
                    if draw.instances.count > 0 {
                        pass.set_vertex_buffer(0, draw.vertex_buffer.slice(..));
                        pass.set_vertex_buffer(1, buffer.slice(..));
                        pass.draw(0..draw.vertex_count, 0..draw.instances.count);
                    }
                }
            }

            // Photo faces share the frame instance buffer, one card at a time
            // so each can bind its own texture.
            if let Some(buffer) = &self.frames.instances.buffer {
                pass.set_pipeline(&self.gallery_pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
                pass.set_vertex_buffer(1, buffer.slice(..));
                let cards = (self.frames.instances.count as usize).min(self.photo_bind_groups.len());
                for i in 0..cards {
                    pass.set_bind_group(1, &self.photo_bind_groups[i], &[]);
                    pass.draw(0..6, i as u32..i as u32 + 1);
                }
            }

            if let Some(buffer) = &self.motes.buffer {
                if self.motes.count > 0 {
                    pass.set_pipeline(&self.mote_pipeline);
                    pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                    pass.set_vertex_buffer(0, buffer.slice(..));
                    pass.draw(0..6, 0..self.motes.count);
                }
            }
        }

        // Finishing pass onto the surface, then the overlay on top.
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Post Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &surface_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();

            pass.set_pipeline(&self.post.pipeline);
            pass.set_bind_group(0, &self.post.bind_group, &[]);
            pass.draw(0..3, 0..1);

            self.overlay
                .renderer()
                .render(&mut pass, &overlay_frame.paint_jobs, &screen_descriptor);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        window.pre_present_notify();
        output.present();

        self.overlay.cleanup(overlay_frame);

        Ok(())
    }
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Photo Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn photo_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Photo Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
