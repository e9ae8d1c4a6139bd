//! This file is part of the xilem_audio_controls project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::masonry::vello::peniko::Color;

/// Default background: plain gray.
pub const DEFAULT_BACKGROUND: Color = Color::from_rgb8(0x80, 0x80, 0x80);

/// Default knob indicator color.
pub const KNOB_FOREGROUND: Color = Color::BLACK;

/// Default fill for the arc knob and the indexed slider.
pub const ACCENT_FOREGROUND: Color = Color::from_rgb8(0xFF, 0x3B, 0x30);

/// Text drawn on top of the background.
pub const TEXT_COLOR: Color = Color::WHITE;

/// Opacity applied to a disabled control.
pub const DISABLED_ALPHA: f32 = 0.5;

/// Start of the default angular span, degrees clockwise from straight down.
pub const DEFAULT_MINIMUM_ANGLE: f64 = 45.0;

/// End of the default angular span.
pub const DEFAULT_MAXIMUM_ANGLE: f64 = 315.0;
