//! PNG page output painted with `imageproc`.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{FilterType, overlay, resize};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use crate::config::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::error::{Error, Result};
use crate::render::{PageCanvas, mm_to_px};

const PAGE_BG: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
const OUTLINE: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xff]);

/// Keeps every page as an RGBA buffer and writes `<stem>_page_NNN.png` files on finalize.
pub struct RasterCanvas {
    px_per_mm: f32,
    pages: Vec<RgbaImage>,
}

impl RasterCanvas {
    pub fn new(px_per_mm: f32) -> Self {
        Self {
            px_per_mm,
            pages: Vec::new(),
        }
    }

    fn px(&self, mm: f32) -> i32 {
        mm_to_px(mm, self.px_per_mm)
    }

    fn page(&mut self) -> Result<&mut RgbaImage> {
        self.pages
            .last_mut()
            .ok_or_else(|| Error::Backend("drawing before the first page".to_string()))
    }

    /// File written for page `index` (0-based) of `output`.
    pub fn page_path(output: &Path, index: usize) -> PathBuf {
        let stem = output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cards".to_string());
        output.with_file_name(format!("{stem}_page_{:03}.png", index + 1))
    }
}

impl PageCanvas for RasterCanvas {
    fn new_page(&mut self) -> Result<()> {
        let width = self.px(PAGE_WIDTH_MM).max(1) as u32;
        let height = self.px(PAGE_HEIGHT_MM).max(1) as u32;
        self.pages
            .push(RgbaImage::from_pixel(width, height, PAGE_BG));
        Ok(())
    }

    fn draw_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<()> {
        let rect = Rect::at(self.px(x), self.px(y))
            .of_size(self.px(width).max(1) as u32, self.px(height).max(1) as u32);
        draw_hollow_rect_mut(self.page()?, rect, OUTLINE);
        Ok(())
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32) -> Result<()> {
        let center = (self.px(cx), self.px(cy));
        let radius = self.px(radius);
        draw_hollow_circle_mut(self.page()?, center, radius, OUTLINE);
        Ok(())
    }

    fn place_image(
        &mut self,
        bitmap: &RgbaImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<()> {
        let (left, top) = (self.px(x), self.px(y));
        let w = self.px(width).max(1) as u32;
        let h = self.px(height).max(1) as u32;
        let page = self.page()?;
        if bitmap.dimensions() == (w, h) {
            overlay(page, bitmap, left as i64, top as i64);
        } else {
            let scaled = resize(bitmap, w, h, FilterType::Triangle);
            overlay(page, &scaled, left as i64, top as i64);
        }
        Ok(())
    }

    fn finalize(self, output: &Path) -> Result<Vec<PathBuf>> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| Error::io(parent, err))?;
        }
        let mut written = Vec::with_capacity(self.pages.len());
        for (index, page) in self.pages.iter().enumerate() {
            let path = Self::page_path(output, index);
            page.save(&path)?;
            written.push(path);
        }
        Ok(written)
    }
}
