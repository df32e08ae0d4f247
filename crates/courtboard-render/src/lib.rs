//! Courtboard Render Library
//!
//! Renderer abstraction and the SVG backend used for export.

mod renderer;
mod svg;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use svg::{Exporter, SvgExporter, SvgRenderer};
