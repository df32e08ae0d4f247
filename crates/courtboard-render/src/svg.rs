//! SVG backend and file export.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use courtboard_core::entities::SerializableColor;
use courtboard_core::scene::{DrawItem, Label, Scene};
use peniko::Color;
use std::fmt::Write as _;
use std::path::Path;

/// Renders a scene to an SVG document held in memory.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    svg: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document produced by the last `build_scene`.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn take_svg(&mut self) -> String {
        std::mem::take(&mut self.svg)
    }

    /// Render a scene in one call with default context settings.
    pub fn render(scene: &Scene) -> RenderResult<String> {
        let mut renderer = Self::new();
        renderer.build_scene(&RenderContext::new(scene))?;
        Ok(renderer.take_svg())
    }
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let size = ctx.scene.size;
        if !size.is_finite() || size.width < 0.0 || size.height < 0.0 {
            return Err(RendererError::RenderFailed(format!(
                "invalid surface size {}x{}",
                size.width, size.height
            )));
        }
        if !(ctx.scale_factor > 0.0) {
            return Err(RendererError::RenderFailed(format!(
                "invalid scale factor {}",
                ctx.scale_factor
            )));
        }

        let mut svg = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            size.width * ctx.scale_factor,
            size.height * ctx.scale_factor,
            size.width,
            size.height,
        );
        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            hex(self.background_color(ctx))
        );
        for item in &ctx.scene.items {
            write_item(&mut svg, item);
        }
        for label in &ctx.scene.labels {
            write_label(&mut svg, label);
        }
        svg.push_str("</svg>\n");

        log::debug!(
            "Rendered SVG with {} items and {} labels",
            ctx.scene.items.len(),
            ctx.scene.labels.len()
        );
        self.svg = svg;
        Ok(())
    }
}

fn hex(color: Color) -> String {
    SerializableColor::from(color).to_hex()
}

fn write_item(svg: &mut String, item: &DrawItem) {
    if item.path.elements().is_empty() {
        return;
    }
    let fill = item.fill.map_or_else(|| "none".to_string(), |c| c.to_hex());
    let _ = write!(svg, r#"  <path d="{}" fill="{}""#, item.path.to_svg(), fill);
    if let Some(stroke) = item.stroke {
        let _ = write!(
            svg,
            r#" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
            stroke.color.to_hex(),
            stroke.width
        );
    }
    svg.push_str("/>\n");
}

fn write_label(svg: &mut String, label: &Label) {
    let _ = writeln!(
        svg,
        r#"  <text x="{}" y="{}" fill="{}" font-size="{}" font-family="sans-serif" font-weight="bold" text-anchor="middle" dominant-baseline="central">{}</text>"#,
        label.position.x,
        label.position.y,
        label.color.to_hex(),
        label.size,
        escape(&label.text)
    );
}

fn escape(text: &str) -> String {
    text.chars().fold(String::with_capacity(text.len()), |mut out, c| {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
        out
    })
}

/// Turns a scene into an image artifact on disk.
pub trait Exporter {
    fn export(&self, scene: &Scene, path: &Path) -> RenderResult<()>;
}

/// Writes scenes as SVG files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgExporter;

impl Exporter for SvgExporter {
    fn export(&self, scene: &Scene, path: &Path) -> RenderResult<()> {
        let svg = SvgRenderer::render(scene)?;
        std::fs::write(path, svg).map_err(|source| RendererError::Export {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Exported board to {}", path.display());
        Ok(())
    }
}
