//! Draw primitives
//!
//! The scene is described as a list of [`DrawCommand`]s (shape + style); a
//! backend implementing [`Canvas`] executes them.

use glam::Vec2;

/// RGBA, each channel 0-1
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.078, 0.078, 0.078, 1.0]; // #141414
    pub const STAR: Color = [1.0, 1.0, 1.0, 1.0];
    pub const PLATFORM: Color = [0.302, 0.878, 0.416, 1.0]; // #4de06a
    pub const PLATFORM_FLASH: Color = [0.659, 1.0, 0.722, 1.0]; // #a8ffb8
    pub const ASTEROID: Color = [0.553, 0.553, 0.553, 1.0]; // #8d8d8d
    pub const PLAYER: Color = [0.333, 0.902, 1.0, 1.0]; // #55e6ff
    pub const SHIELD_PICKUP: Color = [0.0, 0.749, 1.0, 1.0]; // deepskyblue
    pub const SHIELD_RING: Color = [0.0, 1.0, 1.0, 0.8];
    pub const DAMAGE_FLASH: Color = [1.0, 0.0, 0.0, 0.5];
    pub const HORIZON_RING: Color = [1.0, 1.0, 1.0, 0.2];
    pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const TEXT_OUTLINE: Color = [0.0, 0.0, 0.0, 1.0];
    pub const BEST_TIME: Color = [1.0, 0.867, 0.341, 1.0]; // #ffdd57
    pub const TRANSPARENT: Color = [0.0, 0.0, 0.0, 0.0];
    pub const HOLE_CORE: Color = [0.0, 0.0, 0.0, 1.0];

    /// White overlay with the given alpha
    pub const fn white(alpha: f32) -> Color {
        [1.0, 1.0, 1.0, alpha]
    }
}

/// Images the game can draw in place of flat shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Asteroid,
    Platform,
}

impl Sprite {
    pub const ALL: [Sprite; 3] = [Sprite::Player, Sprite::Asteroid, Sprite::Platform];

    /// Asset path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            Sprite::Player => "images/player.jpg",
            Sprite::Asteroid => "images/meteor.jpg",
            Sprite::Platform => "images/step.jpg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// How a shape is filled
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Radial gradient between two concentric circles
    Radial {
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        /// (offset 0-1, color)
        stops: Vec<(f32, Color)>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect { pos: Vec2, size: Vec2 },
    Circle { center: Vec2, radius: f32 },
    Image { sprite: Sprite, pos: Vec2, size: Vec2 },
    Text {
        text: String,
        pos: Vec2,
        font_px: f32,
        bold: bool,
        align: TextAlign,
    },
}

/// One primitive for the host to draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub shape: Shape,
    pub style: Style,
}

impl DrawCommand {
    pub fn fill_rect(pos: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            shape: Shape::Rect { pos, size },
            style: Style {
                fill: Some(Paint::Solid(color)),
                stroke: None,
            },
        }
    }

    pub fn fill_circle(center: Vec2, radius: f32, paint: Paint) -> Self {
        Self {
            shape: Shape::Circle { center, radius },
            style: Style {
                fill: Some(paint),
                stroke: None,
            },
        }
    }

    pub fn stroke_circle(center: Vec2, radius: f32, color: Color, width: f32) -> Self {
        Self {
            shape: Shape::Circle { center, radius },
            style: Style {
                fill: None,
                stroke: Some(Stroke { color, width }),
            },
        }
    }

    pub fn image(sprite: Sprite, pos: Vec2, size: Vec2) -> Self {
        Self {
            shape: Shape::Image { sprite, pos, size },
            style: Style::default(),
        }
    }

    pub fn text(text: impl Into<String>, pos: Vec2, font_px: f32, align: TextAlign, color: Color) -> Self {
        Self {
            shape: Shape::Text {
                text: text.into(),
                pos,
                font_px,
                bold: false,
                align,
            },
            style: Style {
                fill: Some(Paint::Solid(color)),
                stroke: None,
            },
        }
    }

    /// Switch a text command to the bold face
    pub fn bold(mut self) -> Self {
        if let Shape::Text { bold, .. } = &mut self.shape {
            *bold = true;
        }
        self
    }

    /// Bold text with an outline drawn under the fill
    pub fn outlined_text(text: impl Into<String>, pos: Vec2, font_px: f32, fill: Color, outline: Stroke) -> Self {
        Self {
            shape: Shape::Text {
                text: text.into(),
                pos,
                font_px,
                bold: true,
                align: TextAlign::Center,
            },
            style: Style {
                fill: Some(Paint::Solid(fill)),
                stroke: Some(outline),
            },
        }
    }
}

/// A drawing backend (the host's canvas)
pub trait Canvas {
    fn draw(&mut self, command: &DrawCommand);

    fn draw_all(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            self.draw(command);
        }
    }
}

/// CSS color string for a [`Color`]
pub fn css_color(color: Color) -> String {
    let [r, g, b, a] = color;
    format!(
        "rgba({}, {}, {}, {})",
        (r.clamp(0.0, 1.0) * 255.0).round() as u8,
        (g.clamp(0.0, 1.0) * 255.0).round() as u8,
        (b.clamp(0.0, 1.0) * 255.0).round() as u8,
        a.clamp(0.0, 1.0)
    )
}
