//! WebGPU state and the per-frame draw of the portal scene.
//!
//! Four pipelines share one render pass: baked geometry (textured), the two
//! pole lights (constant emissive), the portal glow (animated shader), and
//! the fireflies (instanced additive sprites). Uniform values come from the
//! core `SceneContext` each frame; this module never mutates scene state.

use glam::Mat4;
use portal_core::{
    hex_to_linear_rgb, FireflyField, MeshData, PortalScene, SceneContext, DEFAULT_CLEAR_COLOR,
};
use web_sys as web;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    uv: [f32; 2],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FireflyInstance {
    position: [f32; 3],
    scale: f32,
}

impl FireflyInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniformsRaw {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PortalUniformsRaw {
    view_proj: [[f32; 4]; 4],
    color_start: [f32; 4],
    color_end: [f32; 4],
    time: f32,
    _pad: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FirefliesUniformsRaw {
    view_proj: [[f32; 4]; 4],
    resolution: [f32; 2],
    pixel_ratio: f32,
    point_size: f32,
    time: f32,
    _pad: [f32; 3],
}

struct MeshBuffers {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    index_count: u32,
}

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    depth_view: wgpu::TextureView,

    baked_pipeline: wgpu::RenderPipeline,
    baked_bind_group: wgpu::BindGroup,
    pole_pipeline: wgpu::RenderPipeline,
    pole_bind_group: wgpu::BindGroup,
    portal_pipeline: wgpu::RenderPipeline,
    portal_bind_group: wgpu::BindGroup,
    fireflies_pipeline: wgpu::RenderPipeline,
    fireflies_bind_group: wgpu::BindGroup,

    scene_uniform_buffer: wgpu::Buffer,
    portal_uniform_buffer: wgpu::Buffer,
    fireflies_uniform_buffer: wgpu::Buffer,

    baked_mesh: MeshBuffers,
    pole_light_a: MeshBuffers,
    pole_light_b: MeshBuffers,
    portal_mesh: MeshBuffers,
    firefly_instances: wgpu::Buffer,
    firefly_count: u32,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        scene: &PortalScene,
        fireflies: &FireflyField,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, width, height);

        // Baked lighting texture
        let baked_size = wgpu::Extent3d {
            width: scene.baked_image.width,
            height: scene.baked_image.height,
            depth_or_array_layers: 1,
        };
        let baked_tex = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("baked_tex"),
            size: baked_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &baked_tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &scene.baked_image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * scene.baked_image.width),
                rows_per_image: Some(scene.baked_image.height),
            },
            baked_size,
        );
        let baked_view = baked_tex.create_view(&wgpu::TextureViewDescriptor::default());
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // Uniform buffers
        let scene_uniform_buffer = create_uniform_buffer::<SceneUniformsRaw>(&device, "scene_uniforms");
        let portal_uniform_buffer =
            create_uniform_buffer::<PortalUniformsRaw>(&device, "portal_uniforms");
        let fireflies_uniform_buffer =
            create_uniform_buffer::<FirefliesUniformsRaw>(&device, "fireflies_uniforms");

        // Bind group layouts: textured scene geometry vs plain uniform consumers
        let textured_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("textured_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bgl"),
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

        let baked_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("baked_bg"),
            layout: &textured_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&baked_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&linear_sampler),
                },
            ],
        });
        let pole_bind_group = create_uniform_bind_group(
            &device,
            "pole_bg",
            &uniform_bgl,
            &scene_uniform_buffer,
        );
        let portal_bind_group = create_uniform_bind_group(
            &device,
            "portal_bg",
            &uniform_bgl,
            &portal_uniform_buffer,
        );
        let fireflies_bind_group = create_uniform_bind_group(
            &device,
            "fireflies_bg",
            &uniform_bgl,
            &fireflies_uniform_buffer,
        );

        // Shaders and pipelines
        let baked_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("baked_shader"),
            source: wgpu::ShaderSource::Wgsl(portal_core::BAKED_WGSL.into()),
        });
        let pole_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pole_light_shader"),
            source: wgpu::ShaderSource::Wgsl(portal_core::POLE_LIGHT_WGSL.into()),
        });
        let portal_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("portal_shader"),
            source: wgpu::ShaderSource::Wgsl(portal_core::PORTAL_WGSL.into()),
        });
        let fireflies_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fireflies_shader"),
            source: wgpu::ShaderSource::Wgsl(portal_core::FIREFLIES_WGSL.into()),
        });

        let textured_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("textured_pl"),
            bind_group_layouts: &[&textured_bgl],
            push_constant_ranges: &[],
        });
        let uniform_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("uniform_pl"),
            bind_group_layouts: &[&uniform_bgl],
            push_constant_ranges: &[],
        });

        let baked_pipeline = make_scene_pipeline(
            &device,
            "baked_pipeline",
            &textured_pl,
            &baked_shader,
            &[Vertex::layout()],
            format,
            None,
            true,
        );
        let pole_pipeline = make_scene_pipeline(
            &device,
            "pole_pipeline",
            &uniform_pl,
            &pole_shader,
            &[Vertex::layout()],
            format,
            None,
            true,
        );
        let portal_pipeline = make_scene_pipeline(
            &device,
            "portal_pipeline",
            &uniform_pl,
            &portal_shader,
            &[Vertex::layout()],
            format,
            None,
            true,
        );
        // Additive, no depth write: fireflies blend over the scene without
        // occluding each other
        let fireflies_pipeline = make_scene_pipeline(
            &device,
            "fireflies_pipeline",
            &uniform_pl,
            &fireflies_shader,
            &[FireflyInstance::layout()],
            format,
            Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            }),
            false,
        );

        // Geometry uploads
        let baked_mesh = upload_mesh(&device, "baked", &scene.baked);
        let pole_light_a = upload_mesh(&device, "poleLightA", &scene.pole_light_a);
        let pole_light_b = upload_mesh(&device, "poleLightB", &scene.pole_light_b);
        let portal_mesh = upload_mesh(&device, "portalLight", &scene.portal_light);

        let instances: Vec<FireflyInstance> = fireflies
            .positions
            .iter()
            .zip(fireflies.scales.iter())
            .map(|(pos, scale)| FireflyInstance {
                position: *pos,
                scale: *scale,
            })
            .collect();
        let firefly_instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("firefly_instances"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let clear_color = clear_color_from_hex(DEFAULT_CLEAR_COLOR);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            baked_pipeline,
            baked_bind_group,
            pole_pipeline,
            pole_bind_group,
            portal_pipeline,
            portal_bind_group,
            fireflies_pipeline,
            fireflies_bind_group,
            scene_uniform_buffer,
            portal_uniform_buffer,
            fireflies_uniform_buffer,
            baked_mesh,
            pole_light_a,
            pole_light_b,
            portal_mesh,
            firefly_instances,
            firefly_count: instances.len() as u32,
            width,
            height,
            clear_color,
        })
    }

    pub fn set_clear_color(&mut self, rgb_linear: [f32; 3]) {
        self.clear_color = wgpu::Color {
            r: rgb_linear[0] as f64,
            g: rgb_linear[1] as f64,
            b: rgb_linear[2] as f64,
            a: 1.0,
        };
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    /// Draw one frame from the current scene state.
    pub fn render(&mut self, ctx: &SceneContext) -> Result<(), wgpu::SurfaceError> {
        let view_proj = ctx.camera.view_projection();
        self.write_uniforms(view_proj, ctx);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.baked_pipeline);
            rpass.set_bind_group(0, &self.baked_bind_group, &[]);
            draw_mesh(&mut rpass, &self.baked_mesh);

            rpass.set_pipeline(&self.pole_pipeline);
            rpass.set_bind_group(0, &self.pole_bind_group, &[]);
            draw_mesh(&mut rpass, &self.pole_light_a);
            draw_mesh(&mut rpass, &self.pole_light_b);

            rpass.set_pipeline(&self.portal_pipeline);
            rpass.set_bind_group(0, &self.portal_bind_group, &[]);
            draw_mesh(&mut rpass, &self.portal_mesh);

            if self.firefly_count > 0 {
                rpass.set_pipeline(&self.fireflies_pipeline);
                rpass.set_bind_group(0, &self.fireflies_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.firefly_instances.slice(..));
                rpass.draw(0..6, 0..self.firefly_count);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn write_uniforms(&self, view_proj: Mat4, ctx: &SceneContext) {
        let vp = view_proj.to_cols_array_2d();
        let scene_raw = SceneUniformsRaw { view_proj: vp };
        self.queue.write_buffer(
            &self.scene_uniform_buffer,
            0,
            bytemuck::bytes_of(&scene_raw),
        );

        let p = &ctx.uniforms.portal;
        let portal_raw = PortalUniformsRaw {
            view_proj: vp,
            color_start: [p.color_start[0], p.color_start[1], p.color_start[2], 1.0],
            color_end: [p.color_end[0], p.color_end[1], p.color_end[2], 1.0],
            time: p.time,
            _pad: [0.0; 3],
        };
        self.queue.write_buffer(
            &self.portal_uniform_buffer,
            0,
            bytemuck::bytes_of(&portal_raw),
        );

        let f = &ctx.uniforms.fireflies;
        let fireflies_raw = FirefliesUniformsRaw {
            view_proj: vp,
            resolution: [self.config.width as f32, self.config.height as f32],
            pixel_ratio: f.pixel_ratio,
            point_size: f.point_size,
            time: f.time,
            _pad: [0.0; 3],
        };
        self.queue.write_buffer(
            &self.fireflies_uniform_buffer,
            0,
            bytemuck::bytes_of(&fireflies_raw),
        );
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_tex"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_uniform_buffer<T>(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<T>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_uniform_bind_group(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}

#[allow(clippy::too_many_arguments)]
fn make_scene_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    buffers: &[wgpu::VertexBufferLayout],
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    depth_write: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        // Scene meshes are authored double-sided
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn upload_mesh(device: &wgpu::Device, label: &str, mesh: &MeshData) -> MeshBuffers {
    let verts: Vec<Vertex> = mesh
        .positions
        .iter()
        .enumerate()
        .map(|(i, pos)| Vertex {
            position: *pos,
            uv: mesh.uvs.get(i).copied().unwrap_or([0.0, 0.0]),
        })
        .collect();
    let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&verts),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    MeshBuffers {
        vertex,
        index,
        index_count: mesh.indices.len() as u32,
    }
}

fn draw_mesh<'p>(rpass: &mut wgpu::RenderPass<'p>, mesh: &'p MeshBuffers) {
    rpass.set_vertex_buffer(0, mesh.vertex.slice(..));
    rpass.set_index_buffer(mesh.index.slice(..), wgpu::IndexFormat::Uint32);
    rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
}

fn clear_color_from_hex(hex: &str) -> wgpu::Color {
    match hex_to_linear_rgb(hex) {
        Some([r, g, b]) => wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        },
        None => wgpu::Color::BLACK,
    }
}
