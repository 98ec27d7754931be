//! Canvas 2D painter (browser only)
//!
//! Images are requested once at startup and load in the background. Until an
//! image completes, commands using it are skipped.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::sprites::{DrawCommand, Sprite, SpriteAtlas, ready};

pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<Sprite, HtmlImageElement>,
}

impl CanvasPainter {
    /// Grab the 2D context and start loading every sprite
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let mut images = HashMap::new();
        for sprite in Sprite::ALL {
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(sprite.url());
                    images.insert(sprite, img);
                }
                Err(e) => log::warn!("Could not create image for {:?}: {:?}", sprite, e),
            }
        }

        Some(Self {
            canvas,
            ctx,
            images,
        })
    }

    /// Match the backing store to the given size
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Clear and draw one frame
    pub fn paint(&self, commands: &[DrawCommand]) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);

        for cmd in ready(commands, self) {
            let Some(img) = self.images.get(&cmd.sprite) else {
                continue;
            };
            let (x, y) = (cmd.pos.x as f64, cmd.pos.y as f64);
            let (dw, dh) = (cmd.size.x as f64, cmd.size.y as f64);

            if cmd.circular {
                self.ctx.save();
                self.ctx.begin_path();
                let r = dw.min(dh) / 2.0;
                let _ = self
                    .ctx
                    .arc(x + dw / 2.0, y + dh / 2.0, r, 0.0, std::f64::consts::TAU);
                self.ctx.clip();
            }

            if let Err(e) = self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, dw, dh)
            {
                log::warn!("draw {:?} failed: {:?}", cmd.sprite, e);
            }

            if cmd.circular {
                self.ctx.restore();
            }
        }
    }
}

impl SpriteAtlas for CanvasPainter {
    fn is_ready(&self, sprite: Sprite) -> bool {
        // A broken image is `complete` with zero natural width
        self.images
            .get(&sprite)
            .is_some_and(|img| img.complete() && img.natural_width() > 0)
    }
}
