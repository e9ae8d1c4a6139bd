//! This file is part of the xilem_audio_controls project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use std::borrow::Cow;

use xilem::masonry::core::{BrushIndex, StyleProperty};
use xilem::masonry::parley::style::{FontFamily, FontStack, GenericFamily};
use xilem::masonry::vello::peniko::Color;

use crate::theme::{DEFAULT_BACKGROUND, DISABLED_ALPHA};

/// Font used for control labels.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FontFace {
    /// The platform UI font.
    #[default]
    System,
    /// A font family looked up by name.
    Named(String),
}

impl FontFace {
    pub(crate) fn style_property(&self) -> StyleProperty<'static, BrushIndex> {
        let family = match self {
            Self::System => FontFamily::Generic(GenericFamily::SystemUi),
            Self::Named(name) => FontFamily::Named(Cow::Owned(name.clone())),
        };
        StyleProperty::FontStack(FontStack::Single(family))
    }
}

/// Appearance shared by all controls.
///
/// Each setter replaces one field and leaves the others alone, so the order
/// they are applied in does not matter.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlStyle {
    pub background_color: Color,
    pub foreground_color: Color,
    pub corner_radius: f64,
    pub font_face: FontFace,
}

impl ControlStyle {
    /// Gray background, the given accent, square corners, system font.
    pub fn new(foreground_color: Color) -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND,
            foreground_color,
            corner_radius: 0.0,
            font_face: FontFace::System,
        }
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_foreground_color(mut self, color: Color) -> Self {
        self.foreground_color = color;
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_font_face(mut self, font_face: FontFace) -> Self {
        self.font_face = font_face;
        self
    }

    /// `color` as it should be painted, dimmed when the control is disabled.
    pub(crate) fn paint_color(color: Color, disabled: bool) -> Color {
        if disabled {
            color.multiply_alpha(DISABLED_ALPHA)
        } else {
            color
        }
    }
}

/// Style overrides collected by a view before its widget exists.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct StyleOverrides {
    pub background_color: Option<Color>,
    pub foreground_color: Option<Color>,
    pub corner_radius: Option<f64>,
    pub font_face: Option<FontFace>,
}

impl StyleOverrides {
    pub(crate) fn resolve(&self, foreground_default: Color) -> ControlStyle {
        let mut style = ControlStyle::new(foreground_default);
        if let Some(c) = self.background_color { style = style.with_background_color(c); }
        if let Some(c) = self.foreground_color { style = style.with_foreground_color(c); }
        if let Some(r) = self.corner_radius { style = style.with_corner_radius(r); }
        if let Some(f) = &self.font_face { style = style.with_font_face(f.clone()); }
        style
    }
}
