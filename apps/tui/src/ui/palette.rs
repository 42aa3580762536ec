use airwatch_core::color::Rgb;
use airwatch_core::{Theme, Tone};
use ratatui::style::Color;

pub const fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Colours of one theme, shared by every panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub key: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
}

impl Palette {
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Rgb::new(0x12, 0x14, 0x1c),
                text: Color::White,
                muted: Color::Gray,
                accent: Color::Cyan,
                border: Color::DarkGray,
                key: Color::Yellow,
                success: Color::Rgb(0x00, 0xE3, 0x96),
                warning: Color::Rgb(0xFE, 0xB0, 0x19),
                danger: Color::Rgb(0xFF, 0x45, 0x60),
            },
            Theme::Light => Self {
                background: Rgb::new(0xf4, 0xf5, 0xf7),
                text: Color::Rgb(0x33, 0x33, 0x33),
                muted: Color::Rgb(0x66, 0x66, 0x66),
                accent: Color::Rgb(0x00, 0x8F, 0xFB),
                border: Color::Rgb(0xbb, 0xbb, 0xbb),
                key: Color::Rgb(0xb3, 0x6b, 0x00),
                success: Color::Rgb(0x00, 0x9e, 0x68),
                warning: Color::Rgb(0xc7, 0x86, 0x00),
                danger: Color::Rgb(0xd6, 0x28, 0x3f),
            },
        }
    }

    pub const fn background(&self) -> Color {
        rgb(self.background)
    }

    pub const fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::Success => self.success,
            Tone::Warning => self.warning,
            Tone::Danger => self.danger,
        }
    }
}
