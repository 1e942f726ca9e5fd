use std::sync::Arc;

use crate::{
    assets::{decode::SourceImage, text::TextLayout},
    foundation::{
        core::{Affine, Rect, Rgba8},
        error::{FotobooError, FotobooResult},
    },
};

/// CPU raster target backed by `vello_cpu`.
///
/// Drawing calls are recorded into a render context; [`Surface::into_image`] rasterizes them in
/// submission order, so later calls paint over earlier ones.
pub struct Surface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Surface {
    pub fn new(width: u32, height: u32) -> FotobooResult<Self> {
        if width == 0 || height == 0 {
            return Err(FotobooError::render("surface dimensions must be > 0"));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| FotobooError::render(format!("surface width {width} exceeds u16")))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| FotobooError::render(format!("surface height {height} exceeds u16")))?;
        Ok(Self {
            width: w,
            height: h,
            ctx: vello_cpu::RenderContext::new(w, h),
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Paint the whole surface with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    /// Draw the `src` region of `image` stretched onto `dst`, then apply `extra` on top.
    ///
    /// Parts of `src` outside the image bounds are left unpainted.
    pub fn draw_image_region(
        &mut self,
        image: &SourceImage,
        src: Rect,
        dst: Rect,
        extra: Affine,
    ) -> FotobooResult<()> {
        if src.width() <= 0.0 || src.height() <= 0.0 {
            return Err(FotobooError::render("source region must have positive size"));
        }
        let visible = src.intersect(image.canvas().rect());
        if visible.width() <= 0.0 || visible.height() <= 0.0 {
            return Ok(());
        }

        let to_dst = Affine::translate(dst.origin().to_vec2())
            * Affine::scale_non_uniform(dst.width() / src.width(), dst.height() / src.height())
            * Affine::translate(-src.origin().to_vec2());

        let pixmap = image_to_pixmap(image)?;
        self.ctx.set_transform(affine_to_cpu(extra * to_dst));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        });
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            visible.x0, visible.y0, visible.x1, visible.y1,
        ));
        Ok(())
    }

    /// Draw shaped text; `transform` maps layout space (top-left of the line box) to the surface.
    pub fn draw_text(&mut self, text: &TextLayout, transform: Affine) {
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(text.font.bytes.as_ref().clone()),
            text.font.index,
        );
        self.ctx.set_transform(affine_to_cpu(transform));

        for line in text.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Rasterize everything drawn so far.
    pub fn into_image(mut self) -> FotobooResult<SourceImage> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        SourceImage::from_rgba8_premul(
            u32::from(self.width),
            u32::from(self.height),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn image_to_pixmap(image: &SourceImage) -> FotobooResult<vello_cpu::Pixmap> {
    let w: u16 = image
        .width()
        .try_into()
        .map_err(|_| FotobooError::render("image width exceeds u16"))?;
    let h: u16 = image
        .height()
        .try_into()
        .map_err(|_| FotobooError::render("image height exceeds u16"))?;

    let mut may_have_opacities = false;
    let pixels: Vec<_> = image
        .rgba8_premul()
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
