//! This file is part of the xilem_audio_controls project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

pub mod control;
pub mod range;
pub mod style;
pub mod theme;
mod widgets;
mod views;

pub use style::{ControlStyle, FontFace};
pub use views::arc_knob::arc_knob;
pub use views::indexed_slider::indexed_slider;
pub use views::knob::knob;
pub use widgets::ControlAction;

pub use xilem;
