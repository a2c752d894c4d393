//! macroquad side of the renderer: off-screen target, blits, present.

use crate::assets::SpriteSheets;
use crate::entity::SheetId;
use crate::render::Surface;
use macroquad::prelude::*;
use tracing::warn;

/// Draws straight into whatever camera is active.
pub struct MacroquadSurface<'a> {
    sheets: &'a SpriteSheets,
    missing_warned: bool,
}

impl<'a> MacroquadSurface<'a> {
    /// Surface drawing textures from `sheets`.
    pub fn new(sheets: &'a SpriteSheets) -> Self {
        Self {
            sheets,
            missing_warned: false,
        }
    }
}

impl Surface for MacroquadSurface<'_> {
    fn fill(&mut self, color: Color) {
        clear_background(color);
    }

    fn blit(&mut self, sheet: SheetId, src: Rect, dest: Vec2) {
        let Some(tex) = self.sheets.get(sheet) else {
            if !self.missing_warned {
                warn!(sheet = sheet.0, "blit_unknown_sheet");
                self.missing_warned = true;
            }
            return;
        };
        draw_texture_ex(
            tex,
            dest.x,
            dest.y,
            WHITE,
            DrawTextureParams {
                source: Some(src),
                ..Default::default()
            },
        );
    }
}

/// Fixed-resolution off-screen target scaled onto the window.
pub struct Presenter {
    target: RenderTarget,
    camera: Camera2D,
    size: Vec2,
}

impl Presenter {
    /// Allocates the off-screen target at the logical resolution.
    pub fn new(logical_width: u32, logical_height: u32) -> Self {
        let target = render_target(logical_width, logical_height);
        target.texture.set_filter(FilterMode::Nearest);

        let size = vec2(logical_width as f32, logical_height as f32);
        let mut camera = Camera2D::from_display_rect(Rect::new(0.0, 0.0, size.x, size.y));
        camera.render_target = Some(target.clone());

        Self {
            target,
            camera,
            size,
        }
    }

    /// Redirects drawing into the off-screen target.
    pub fn begin(&self) {
        set_camera(&self.camera);
    }

    /// Copies the target to the window, aspect kept and centered.
    pub fn present(&self) {
        set_default_camera();
        clear_background(BLACK);

        let (dest, offset) = fit(self.size, vec2(screen_width(), screen_height()));
        draw_texture_ex(
            &self.target.texture,
            offset.x,
            offset.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(dest),
                flip_y: true,
                ..Default::default()
            },
        );
    }
}

/// Largest `logical`-shaped box inside `screen` and its top-left offset.
fn fit(logical: Vec2, screen: Vec2) -> (Vec2, Vec2) {
    let scale = (screen.x / logical.x).min(screen.y / logical.y);
    let dest = logical * scale;
    (dest, (screen - dest) * 0.5)
}
