//! Canvas2D backend

use std::f64::consts::TAU;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::scene::SpriteAvailability;
use super::shapes::{Canvas, DrawCommand, Paint, Shape, Sprite, css_color};

/// Loaded (or loading) sprite images
pub struct SpriteImages {
    player: HtmlImageElement,
    asteroid: HtmlImageElement,
    platform: HtmlImageElement,
}

impl SpriteImages {
    pub fn new(player: HtmlImageElement, asteroid: HtmlImageElement, platform: HtmlImageElement) -> Self {
        Self {
            player,
            asteroid,
            platform,
        }
    }

    pub fn get(&self, sprite: Sprite) -> &HtmlImageElement {
        match sprite {
            Sprite::Player => &self.player,
            Sprite::Asteroid => &self.asteroid,
            Sprite::Platform => &self.platform,
        }
    }

    /// Sprites that can be drawn right now (loaded with a real size)
    pub fn availability(&self) -> SpriteAvailability {
        let ready = |img: &HtmlImageElement| img.complete() && img.natural_width() != 0;
        SpriteAvailability {
            player: ready(&self.player),
            asteroid: ready(&self.asteroid),
            platform: ready(&self.platform),
        }
    }
}

/// Executes draw commands on a 2D rendering context
pub struct Canvas2d<'a> {
    ctx: &'a CanvasRenderingContext2d,
    images: Option<&'a SpriteImages>,
}

impl<'a> Canvas2d<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d, images: Option<&'a SpriteImages>) -> Self {
        Self { ctx, images }
    }

    fn set_fill(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&css_color(*color)),
            Paint::Radial {
                center,
                inner_radius,
                outer_radius,
                stops,
            } => {
                let gradient = match self.ctx.create_radial_gradient(
                    center.x as f64,
                    center.y as f64,
                    *inner_radius as f64,
                    center.x as f64,
                    center.y as f64,
                    *outer_radius as f64,
                ) {
                    Ok(gradient) => gradient,
                    Err(e) => {
                        log::warn!("Radial gradient failed: {e:?}");
                        return;
                    }
                };
                for (offset, color) in stops {
                    gradient.add_color_stop(*offset, &css_color(*color)).ok();
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
    }
}

impl Canvas for Canvas2d<'_> {
    fn draw(&mut self, command: &DrawCommand) {
        let ctx = self.ctx;
        let style = &command.style;

        match &command.shape {
            Shape::Rect { pos, size } => {
                if let Some(fill) = &style.fill {
                    self.set_fill(fill);
                    ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                }
                if let Some(stroke) = &style.stroke {
                    ctx.set_stroke_style_str(&css_color(stroke.color));
                    ctx.set_line_width(stroke.width as f64);
                    ctx.stroke_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                }
            }
            Shape::Circle { center, radius } => {
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                    .ok();
                if let Some(fill) = &style.fill {
                    self.set_fill(fill);
                    ctx.fill();
                }
                if let Some(stroke) = &style.stroke {
                    ctx.set_stroke_style_str(&css_color(stroke.color));
                    ctx.set_line_width(stroke.width as f64);
                    ctx.stroke();
                }
            }
            Shape::Image { sprite, pos, size } => {
                let Some(images) = self.images else {
                    return;
                };
                ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    images.get(*sprite),
                    pos.x as f64,
                    pos.y as f64,
                    size.x as f64,
                    size.y as f64,
                )
                .ok();
            }
            Shape::Text {
                text,
                pos,
                font_px,
                bold,
                align,
            } => {
                let weight = if *bold { "bold " } else { "" };
                ctx.set_font(&format!("{weight}{font_px}px sans-serif"));
                ctx.set_text_align(align.as_str());
                if let Some(stroke) = &style.stroke {
                    ctx.set_stroke_style_str(&css_color(stroke.color));
                    ctx.set_line_width(stroke.width as f64);
                    ctx.stroke_text(text, pos.x as f64, pos.y as f64).ok();
                }
                if let Some(fill) = &style.fill {
                    self.set_fill(fill);
                    ctx.fill_text(text, pos.x as f64, pos.y as f64).ok();
                }
            }
        }
    }
}
