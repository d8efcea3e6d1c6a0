//! The top-level engine: owns the GPU context, the scene, the page model,
//! and all animation state, and wires window events into them.
//!
//! Per-frame ordering is fixed: the smooth scroll advances first, then the
//! scroll bindings read it, then the tween timeline samples, and only then
//! do the per-frame filters (pointer follow, idle float) run. Every scroll
//! consumer therefore sees the same position within a frame.

use std::path::Path;
use std::time::Instant;

use crate::animation::{intro_tweens, Channel, Timeline};
use crate::assets::TextureSet;
use crate::camera::Camera;
use crate::error::PlumeError;
use crate::gpu::RenderContext;
use crate::input::{PointerState, Viewport};
use crate::options::Options;
use crate::page::{ElementRef, Page, PageLayout, Property};
use crate::renderer::{CameraBinding, QuadRenderer, SteamRenderer};
use crate::scene::{DishGroup, SteamField};
use crate::scroll::{ScrollBindings, SmoothScroll};

/// Scrollable range for a document of `content_height` in a viewport of
/// `viewport_height`, never negative.
#[inline]
#[must_use]
pub fn scroll_range(content_height: f32, viewport_height: f32) -> f32 {
    (content_height - viewport_height).max(0.0)
}

/// The assembled experience.
pub struct App {
    context: RenderContext,
    options: Options,
    camera: Camera,
    camera_binding: CameraBinding,
    quad_renderer: QuadRenderer,
    steam_renderer: SteamRenderer,
    steam_field: SteamField,
    dish: DishGroup,
    page: Page,
    bindings: ScrollBindings,
    timeline: Timeline,
    smooth_scroll: SmoothScroll,
    pointer: PointerState,
    viewport: Viewport,
    time: f32,
}

impl App {
    /// Build the whole experience against a window surface.
    ///
    /// Fail-fast: a missing texture or page element aborts startup here,
    /// before the first frame.
    ///
    /// # Errors
    ///
    /// Returns [`PlumeError::Gpu`] if the GPU context cannot be created,
    /// [`PlumeError::AssetLoad`] if a texture fails to load, or
    /// [`PlumeError::MissingElement`] if the page layout is incomplete.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        options: Options,
        layout: PageLayout,
    ) -> Result<Self, PlumeError> {
        let context = RenderContext::new(window, initial_size).await?;
        let textures = TextureSet::load(&context, Path::new("assets/textures"))?;

        let viewport = Viewport::new(initial_size.0, initial_size.1);
        let camera = Camera::new(
            options.scene.fovy,
            options.scene.camera_distance,
            viewport.aspect(),
        );
        let camera_binding = CameraBinding::new(&context.device);

        let quad_renderer = QuadRenderer::new(
            &context,
            &camera_binding,
            &textures.dish_shadow,
            &textures.dish_base,
        );
        let steam_field =
            SteamField::seeded(options.scene.particle_count, &mut rand::rng());
        let steam_renderer =
            SteamRenderer::new(&context, &steam_field, &textures.steam);

        let mut page = Page::new(layout)?;
        let bindings = ScrollBindings::resolve(
            &mut page,
            viewport,
            &options.scroll,
            &options.tilt,
        );

        let smooth_scroll = SmoothScroll::new(
            options.scroll.smooth_duration,
            scroll_range(page.content_height, viewport.height_f()),
        );

        let mut timeline = Timeline::new();
        timeline.add_all(intro_tweens(&options.intro), Instant::now());

        log::info!(
            "scene ready: {} steam particles, {} tour scenes, {} cards",
            steam_field.particles.len(),
            page.tour_scenes.len(),
            page.cards.len()
        );

        Ok(Self {
            context,
            options,
            camera,
            camera_binding,
            quad_renderer,
            steam_renderer,
            steam_field,
            dish: DishGroup::new(),
            page,
            bindings,
            timeline,
            smooth_scroll,
            pointer: PointerState::default(),
            viewport,
            time: 0.0,
        })
    }

    /// Advance all animation state one frame.
    pub fn update(&mut self, dt: f32, now: Instant) {
        self.time += dt;

        let scroll = self.smooth_scroll.update(now);
        self.bindings.apply(
            scroll,
            dt,
            now,
            &mut self.page,
            &mut self.dish,
            &mut self.timeline,
        );

        let _ = self.timeline.update(now);
        for &(channel, value) in self.timeline.samples() {
            match channel {
                Channel::DishPositionY => self.dish.position.y = value,
                Channel::DishPositionZ => self.dish.position.z = value,
                Channel::DishRotationX => self.dish.base_rotation.x = value,
                Channel::DishRotationY => self.dish.base_rotation.y = value,
                Channel::Element(element, prop) => {
                    self.page.apply(element, prop, value);
                }
            }
        }
        for &channel in self.timeline.completed() {
            match channel {
                // The drop-in finishing is the entrance/scroll hand-off.
                Channel::DishPositionY => self.dish.finish_entrance(),
                Channel::Element(ElementRef::Loader, Property::Opacity) => {
                    self.page.remove_loader();
                    log::debug!("loader removed");
                }
                _ => {}
            }
        }

        self.dish.smooth_toward_pointer(self.pointer.x, self.pointer.y);
        self.dish.float(self.time);
    }

    /// Render one frame: shadow, plate, then steam, over the clear color.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain texture cannot be
    /// acquired; the caller resizes and retries on `Lost`/`Outdated`.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.camera_binding.update(&self.context, &self.camera);
        self.quad_renderer.update(&self.context, &self.dish);
        self.steam_renderer.update(
            &self.context,
            &self.camera,
            &self.steam_field,
            self.time,
        );

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();

        {
            let [r, g, b, a] = self.options.scene.background;
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            depth_slice: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: f64::from(r),
                                    g: f64::from(g),
                                    b: f64::from(b),
                                    a: f64::from(a),
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            self.quad_renderer.draw(&mut pass, &self.camera_binding);
            self.steam_renderer.draw(&mut pass);
        }

        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Window cursor movement, in physical pixels.
    pub fn handle_pointer_move(&mut self, px: f32, py: f32, now: Instant) {
        self.pointer.set_from_window(px, py, self.viewport);

        // Card hit-testing happens in document space.
        let doc_y = py + self.smooth_scroll.current();
        self.bindings
            .pointer_move(px, doc_y, &self.page, &mut self.timeline, now);
    }

    /// Cursor left the window: release any tilted card.
    pub fn handle_pointer_left(&mut self, now: Instant) {
        self.bindings
            .pointer_leave(&self.page, &mut self.timeline, now);
    }

    /// Wheel input in document units.
    pub fn handle_scroll_delta(&mut self, delta: f32, now: Instant) {
        self.smooth_scroll.scroll_by(delta, now);
    }

    /// Window resize: reconfigure the surface and recompute every
    /// scroll range.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.viewport = Viewport::new(width, height);
        self.camera.set_aspect(width, height);
        self.bindings.refresh(&self.page, self.viewport);
        self.smooth_scroll.set_max(scroll_range(
            self.page.content_height,
            self.viewport.height_f(),
        ));
    }

    /// Current options.
    pub fn options(&self) -> &Options {
        &self.options
    }
}
