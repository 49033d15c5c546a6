pub mod renderer;

pub use renderer::{centered_rect, format_score, pulse_alpha, Renderer};
