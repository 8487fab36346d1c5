use crate::camera::Camera;
use crate::constants::{AMBIENT_INTENSITY, CLEAR_COLOR_SRGB, LIGHT_INTENSITY, LIGHT_POSITION};
use crate::markers::OriginMarkers;
use crate::passes::{post_chain, PostChain, PostParams, PostPass};
use crate::scene::{MeshId, Model};
use crate::viewer::RenderBackend;
use glam::Vec3;
use web_sys as web;

mod helpers;
mod markers;
mod mesh;
mod post;
mod targets;
use markers::{create_marker_resources, MarkerResources};
use mesh::{create_scene_resources, upload_model, GpuMesh, SceneResources, SceneUniforms};
use post::{create_post_resources, PostResources, PostUniforms};
use targets::RenderTargets;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

// ===================== WebGPU state =====================

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    scene: SceneResources,
    markers: MarkerResources,
    post: PostResources,

    meshes: Vec<GpuMesh>,
    outline_targets: Vec<MeshId>,
    markers_visible: bool,
    chain: PostChain,
    scene_uniforms: SceneUniforms,
    post_params: PostParams,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
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
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
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

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let scene = create_scene_resources(&device, &scene_shader);
        let markers = create_marker_resources(&device, &scene_shader, &scene.bgl);
        let post = create_post_resources(&device, &post_shader, format);
        let targets = RenderTargets::new(&device, width, height);

        let mut scene_uniforms = SceneUniforms::default();
        scene_uniforms.set_light(
            Vec3::from(LIGHT_POSITION),
            LIGHT_INTENSITY,
            AMBIENT_INTENSITY,
        );

        log::info!("[gpu] surface {}x{} format {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            scene,
            markers,
            post,
            meshes: Vec::new(),
            outline_targets: Vec::new(),
            markers_visible: false,
            chain: post_chain(None),
            scene_uniforms,
            post_params: PostParams::default(),
            width,
            height,
            clear_color: wgpu::Color {
                r: helpers::srgb_to_linear(CLEAR_COLOR_SRGB[0]) as f64,
                g: helpers::srgb_to_linear(CLEAR_COLOR_SRGB[1]) as f64,
                b: helpers::srgb_to_linear(CLEAR_COLOR_SRGB[2]) as f64,
                a: 1.0,
            },
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
            self.targets.recreate(&self.device, width, height);
        }
    }

    fn draw_scene(&self, encoder: &mut wgpu::CommandEncoder) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.targets.hdr_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.targets.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_bind_group(0, &self.scene.bind_group, &[]);
        rpass.set_pipeline(&self.scene.mesh_pipeline);
        for mesh in &self.meshes {
            mesh.draw(&mut rpass);
        }
        if self.markers_visible {
            self.markers.draw(&mut rpass);
        }
    }

    fn draw_outline_mask(&self, encoder: &mut wgpu::CommandEncoder) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("outline_mask_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.targets.mask_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        if self.outline_targets.is_empty() {
            return;
        }
        rpass.set_bind_group(0, &self.scene.bind_group, &[]);
        rpass.set_pipeline(&self.scene.mask_pipeline);
        for mesh in self
            .meshes
            .iter()
            .filter(|m| self.outline_targets.contains(&m.id))
        {
            mesh.draw(&mut rpass);
        }
    }
}

impl<'a> RenderBackend for GpuState<'a> {
    fn load_model(&mut self, model: &Model) {
        self.meshes = upload_model(&self.device, model);
        log::info!("[gpu] uploaded {} meshes", self.meshes.len());
    }

    fn load_markers(&mut self, markers: &OriginMarkers) {
        self.markers.upload(&self.device, markers);
    }

    fn set_camera(&mut self, camera: &Camera) {
        self.scene_uniforms.set_camera(camera);
    }

    fn set_outline_targets(&mut self, targets: &[MeshId]) {
        self.outline_targets.clear();
        self.outline_targets.extend_from_slice(targets);
    }

    fn set_markers_visible(&mut self, visible: bool) {
        self.markers_visible = visible;
    }

    fn set_post_chain(&mut self, chain: &[PostPass]) {
        if self.chain.as_slice() != chain {
            self.chain = chain.iter().copied().collect();
        }
    }

    fn set_post_params(&mut self, params: &PostParams) {
        self.post_params = *params;
    }

    /// Scene → outline mask → post chain, the last pass writing the swapchain.
    fn render(&mut self, _dt_sec: f32) -> anyhow::Result<()> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.scene_uniforms.params[0] = self.post_params.exposure;
        self.queue.write_buffer(
            &self.scene.uniform_buffer,
            0,
            bytemuck::bytes_of(&self.scene_uniforms),
        );
        let uniforms = PostUniforms::from_chain(
            [self.width as f32, self.height as f32],
            &self.chain,
            &self.post_params,
        );
        post::write_post_uniforms(&self.queue, &self.post.uniform_buffer, &uniforms);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        self.draw_scene(&mut encoder);
        self.draw_outline_mask(&mut encoder);

        let mask_bg = self.post.mask_bind_group(&self.device, &self.targets.mask_view);
        let passes: Vec<&PostPass> = self
            .chain
            .iter()
            .filter(|p| !matches!(p, PostPass::Render))
            .collect();
        let mut source = &self.targets.hdr_view;
        for (i, pass) in passes.iter().enumerate() {
            let Some(pipeline) = self.post.pipeline_for(pass) else {
                continue;
            };
            let is_last = i + 1 == passes.len();
            let target = if is_last {
                &view
            } else {
                self.targets.intermediate(i)
            };
            let bg0 = self.post.source_bind_group(&self.device, pass.label(), source);
            let bg1 = matches!(pass, PostPass::Outline(_)).then_some(&mask_bg);
            post::blit(
                &mut encoder,
                pass.label(),
                target,
                wgpu::Color::BLACK,
                pipeline,
                &bg0,
                bg1,
            );
            source = target;
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
