use reel_core::BackgroundUniforms;
use web_sys as web;

mod canvas2d;
mod helpers;

pub use canvas2d::CpuRenderer;

// ===================== WebGPU state =====================

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, transparent: bool) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

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
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = helpers::pick_surface_format(&caps.formats)
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = helpers::pick_alpha_mode(&caps.alpha_modes, transparent);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] surface {}x{} format={:?} alpha={:?}",
            width,
            height,
            format,
            alpha_mode
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("background_shader"),
            source: wgpu::ShaderSource::Wgsl(reel_core::BACKGROUND_WGSL.into()),
        });
        let uniform_size = std::mem::size_of::<BackgroundUniforms>() as u64;
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("background_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(uniform_size),
                },
                count: None,
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("background_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        // output is already premultiplied, so replace rather than blend
        let pipeline =
            helpers::make_fullscreen_pipeline(&device, &pl, &shader, "fs_background", format, None);
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("background_uniforms"),
            size: uniform_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("background_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            bind_group,
            width,
            height,
        })
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
        }
    }

    pub fn render(&mut self, uniforms: &BackgroundUniforms) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("background_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

// ===================== Backend selection =====================

pub enum Renderer {
    Gpu(GpuState),
    Cpu(CpuRenderer),
}

impl Renderer {
    /// WebGPU when available; otherwise the CPU path on a fresh canvas that
    /// replaces `canvas` in the DOM (a canvas keeps the first context type it
    /// hands out).
    pub async fn create(
        canvas: &web::HtmlCanvasElement,
        transparent: bool,
    ) -> anyhow::Result<(Self, web::HtmlCanvasElement)> {
        match GpuState::new(canvas, transparent).await {
            Ok(gpu) => Ok((Renderer::Gpu(gpu), canvas.clone())),
            Err(e) => {
                log::warn!("[gpu] WebGPU unavailable, using CPU fallback: {:?}", e);
                let fresh = canvas2d::replace_canvas(canvas)?;
                let cpu = CpuRenderer::new(&fresh)?;
                Ok((Renderer::Cpu(cpu), fresh))
            }
        }
    }

    pub fn is_gpu(&self) -> bool {
        matches!(self, Renderer::Gpu(_))
    }

    /// Backing size the renderer wants for a full-resolution `width x height`.
    pub fn surface_size(&self, width: u32, height: u32) -> (u32, u32) {
        match self {
            Renderer::Gpu(_) => (width, height),
            Renderer::Cpu(_) => crate::input::fallback_size(width, height),
        }
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        match self {
            Renderer::Gpu(g) => g.resize_if_needed(width, height),
            Renderer::Cpu(c) => c.resize_if_needed(width, height),
        }
    }

    pub fn render(&mut self, uniforms: &BackgroundUniforms) {
        match self {
            Renderer::Gpu(g) => {
                if let Err(e) = g.render(uniforms) {
                    log::warn!("[gpu] frame skipped: {:?}", e);
                }
            }
            Renderer::Cpu(c) => {
                if let Err(e) = c.render(uniforms) {
                    log::warn!("[cpu] frame skipped: {:?}", e);
                }
            }
        }
    }
}
