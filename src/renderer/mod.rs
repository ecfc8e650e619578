//! Batched quad renderer.
//!
//! Widgets push colored and textured quads into a [`QuadBatch`] during the
//! frame; [`Renderer::draw`] uploads them and paints every quad with a single
//! instanced draw call, then empties the batch for the next frame.

pub mod atlas;
pub mod batch;
pub mod constants;
pub mod gpu;
pub mod gpu_context;
pub mod pipeline;

use std::sync::Arc;

use wgpu::util::DeviceExt;
use wgpu::{
    BindGroup, Buffer, BufferUsages, Device, Extent3d, Queue, RenderPipeline, Texture,
    TextureDimension, TextureUsages,
};

use crate::geometry::{IRect, Rect, Vec2};
use crate::widgets::Color;

use self::constants::{ATLAS_LAYER_SIZE, MAX_ATLASES};
use self::gpu::{QuadInstance, ShaderUniforms, QUAD_INDICES, QUAD_VERTICES};

pub use atlas::{AtlasError, AtlasId};
pub use batch::QuadBatch;
pub use gpu_context::{GpuContext, SurfaceState};

pub struct Renderer {
    device: Arc<Device>,
    queue: Arc<Queue>,
    pipeline: RenderPipeline,

    // Shared unit quad
    vertex_buffer: Buffer,
    index_buffer: Buffer,

    uniforms: ShaderUniforms,
    uniform_buffer: Buffer,
    bind_group: BindGroup,

    // One R8 layer per registered atlas
    atlas_texture: Texture,

    // Sized for the batch capacity, never resized
    instance_buffer: Buffer,

    batch: QuadBatch,
}

impl Renderer {
    /// Create the pipeline and every GPU resource the renderer needs.
    ///
    /// Resource creation failures surface through wgpu's device error
    /// handler, which panics by default.
    pub fn new(device: Arc<Device>, queue: Arc<Queue>, format: wgpu::TextureFormat) -> Self {
        let bind_group_layout = pipeline::create_bind_group_layout(&device);
        let render_pipeline = pipeline::create_render_pipeline(&device, &bind_group_layout, format);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quill Vertex Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quill Index Buffer"),
            contents: bytemuck::cast_slice(QUAD_INDICES),
            usage: BufferUsages::INDEX,
        });

        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        let uniforms = ShaderUniforms::new(viewport.width, viewport.height);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quill Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });

        let atlas_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Quill Atlas Array"),
            size: Extent3d {
                width: ATLAS_LAYER_SIZE,
                height: ATLAS_LAYER_SIZE,
                depth_or_array_layers: MAX_ATLASES as u32,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let atlas_view = atlas_texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Quill Atlas View"),
            dimension: Some(wgpu::TextureViewDimension::D2Array),
            ..Default::default()
        });

        // Glyph coverage is sampled pixel-exact
        let atlas_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Quill Atlas Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Quill Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&atlas_sampler),
                },
            ],
        });

        let batch = QuadBatch::new(viewport);
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Quill Instance Buffer"),
            size: (batch.capacity() * std::mem::size_of::<QuadInstance>()) as u64,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::info!(
            "Quad renderer ready: {} quads per frame, {} atlas layers of {}px",
            batch.capacity(),
            MAX_ATLASES,
            ATLAS_LAYER_SIZE
        );

        Self {
            device,
            queue,
            pipeline: render_pipeline,
            vertex_buffer,
            index_buffer,
            uniforms,
            uniform_buffer,
            bind_group,
            atlas_texture,
            instance_buffer,
            batch,
        }
    }

    /// Record the window size used for the projection and the default clip.
    /// Call on every host resize, before the next draw.
    pub fn set_viewport(&mut self, viewport: Rect) {
        log::debug!("Viewport set to {}x{}", viewport.width, viewport.height);
        self.batch.set_viewport(viewport);
        self.uniforms.screen_size = [viewport.width, viewport.height];
    }

    pub fn viewport(&self) -> Rect {
        self.batch.viewport()
    }

    /// Upload a single-channel bitmap and its subtexture table.
    ///
    /// `pixels` holds `width * height` bytes, row-major without padding.
    /// Capacity exhaustion and malformed input are reported, never fatal.
    pub fn register_texture_atlas(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u8],
        subtextures: &[IRect],
    ) -> Result<AtlasId, AtlasError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(AtlasError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }

        let id = match self.batch.register_atlas(width, height, subtextures) {
            Ok(id) => id,
            Err(err) => {
                log::warn!("Atlas registration failed: {}", err);
                return Err(err);
            }
        };

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.atlas_texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: 0,
                    y: 0,
                    z: id.index() as u32,
                },
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width),
                rows_per_image: Some(height),
            },
            Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.uniforms.set_atlas_size(id.index(), width, height);

        log::info!(
            "Registered atlas {:?}: {}x{} with {} subtextures",
            id,
            width,
            height,
            subtextures.len()
        );
        Ok(id)
    }

    /// The pending batch, for handing to a UI frame.
    pub fn batch_mut(&mut self) -> &mut QuadBatch {
        &mut self.batch
    }

    pub fn push_colored_quad(&mut self, rect: Rect, color: Color, z: i8, clip: Option<Rect>) {
        self.batch.push_colored_quad(rect, color, z, clip);
    }

    pub fn push_textured_quad(
        &mut self,
        atlas: AtlasId,
        subtexture: usize,
        position: Vec2,
        z: i8,
        clip: Option<Rect>,
    ) {
        self.batch.push_textured_quad(atlas, subtexture, position, z, clip);
    }

    /// Paint the pending quads to the window surface and reset the batch.
    pub fn draw(&mut self, surface: &mut SurfaceState, clear_color: Color) {
        let output = match surface.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => {
                surface.resize(surface.width(), surface.height());
                self.batch.reset();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory");
                self.batch.reset();
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                self.batch.reset();
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.draw_to_view(&view, clear_color);
        output.present();
    }

    /// Paint the pending quads into `view` and reset the batch.
    pub fn draw_to_view(&mut self, view: &wgpu::TextureView, clear_color: Color) {
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[self.uniforms]));

        let instances = self.batch.prepare();
        let count = instances.len() as u32;
        if count > 0 {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Quill Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Quill Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color.into()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if count > 0 {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_bind_group(0, &self.bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                render_pass
                    .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..count);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        log::trace!("Drew {} quads", count);
        self.batch.reset();
    }
}

