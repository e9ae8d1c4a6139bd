//! This file is part of the xilem_audio_controls project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::masonry::properties::types::{AsUnit, CrossAxisAlignment};
use xilem::masonry::vello::peniko::Color;
use xilem::style::Style;
use xilem::view::{flex_col, flex_row, label};
use xilem::{EventLoop, WidgetView, WindowOptions, Xilem};

use xilem_audio_controls::{FontFace, arc_knob, indexed_slider, knob};

const TEXT_COLOR: Color = Color::from_rgb8(0xDD, 0xDD, 0xDD);
const DIM_TEXT: Color = Color::from_rgb8(0x99, 0x99, 0x99);
const PANEL: Color = Color::from_rgb8(0x22, 0x22, 0x22);

const NOTES: [&str; 14] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B", "C", "C#",
];

struct DemoState {
    cutoff: f64,
    resonance: f64,
    volume: f64,
    pan: f64,
    note: usize,
    dragging: bool,
}

impl DemoState {
    fn new() -> Self {
        Self {
            cutoff: 0.33,
            resonance: 0.5,
            volume: 75.0,
            pan: 0.0,
            // Deliberately out of range; the slider writes back the last index.
            note: 99,
            dragging: false,
        }
    }
}

fn app_logic(state: &mut DemoState) -> impl WidgetView<DemoState> + use<> {
    let status = if state.dragging { "dragging" } else { "idle" };

    flex_col((
        flex_row((
            flex_col((
                knob(0.0..=1.0, state.cutoff, |s: &mut DemoState, v| s.cutoff = v)
                    .on_started(|s: &mut DemoState| s.dragging = true)
                    .on_ended(|s: &mut DemoState| s.dragging = false),
                label(format!("Cutoff {:.2}", state.cutoff)).text_size(10.0).color(DIM_TEXT),
            ))
            .gap(2.0.px()),
            flex_col((
                knob(0.0..=1.0, state.resonance, |s: &mut DemoState, v| s.resonance = v)
                    .sensitivity(0.5, 1.0)
                    .foreground_color(Color::WHITE)
                    .background_color(Color::from_rgb8(0x30, 0x30, 0x30)),
                label(format!("Resonance {:.2}", state.resonance)).text_size(10.0).color(DIM_TEXT),
            ))
            .gap(2.0.px()),
            arc_knob("Volume", 0.0..=100.0, state.volume, |s: &mut DemoState, v| s.volume = v)
                .corner_radius(10.0),
            arc_knob("Pan", -1.0..=1.0, state.pan, |s: &mut DemoState, v| s.pan = v)
                .origin(0.0)
                .corner_radius(10.0)
                .font(FontFace::Named("Roboto".into())),
        ))
        .gap(12.0.px()),
        indexed_slider(
            NOTES.iter().map(|n| (*n).to_string()).collect(),
            state.note,
            |s: &mut DemoState, idx| s.note = idx,
        )
        .corner_radius(4.0),
        label(format!("Note {} ({status})", NOTES.get(state.note).unwrap_or(&"-")))
            .text_size(11.0)
            .color(TEXT_COLOR),
    ))
    .cross_axis_alignment(CrossAxisAlignment::Fill)
    .gap(8.0.px())
    .background_color(PANEL)
}

fn main() {
    let app = Xilem::new_simple(
        DemoState::new(),
        app_logic,
        WindowOptions::new("Audio Controls Demo")
            .with_initial_inner_size(xilem::winit::dpi::LogicalSize::new(480.0, 220.0)),
    );
    app.run_in(EventLoop::with_user_event()).unwrap();
}
