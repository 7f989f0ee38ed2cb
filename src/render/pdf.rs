//! A4 PDF output built directly with `lopdf`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use image::RgbaImage;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use crate::config::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::error::{Error, Result};
use crate::render::PageCanvas;

/// Points per millimetre (1 inch = 72 points = 25.4 mm).
const POINTS_PER_MM: f32 = 72.0 / 25.4;
/// Bezier control distance for a quarter circle.
const KAPPA: f32 = 0.552_284_8;
const OUTLINE_WIDTH_PT: f32 = 0.5;

fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

struct PageContent {
    operations: Vec<Operation>,
    xobjects: Dictionary,
}

/// Accumulates pages in memory; nothing touches disk until [`PageCanvas::finalize`].
pub struct PdfCanvas {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    current: Option<PageContent>,
    images: usize,
    title: String,
}

impl PdfCanvas {
    pub fn new(title: impl Into<String>) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
            current: None,
            images: 0,
            title: title.into(),
        }
    }

    fn page(&mut self) -> Result<&mut PageContent> {
        self.current
            .as_mut()
            .ok_or_else(|| Error::Backend("drawing before the first page".to_string()))
    }

    /// Flip from top-left millimetres to bottom-left points.
    fn to_pdf_y(y_mm: f32) -> f32 {
        mm_to_pt(PAGE_HEIGHT_MM - y_mm)
    }

    fn flush_page(&mut self) -> Result<()> {
        let Some(page) = self.current.take() else {
            return Ok(());
        };
        let content = Content {
            operations: page.operations,
        };
        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! { "XObject" => page.xobjects },
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    fn add_image_xobject(&mut self, bitmap: &RgbaImage) -> ObjectId {
        let (width, height) = bitmap.dimensions();
        let pixels = (width * height) as usize;
        let mut rgb = Vec::with_capacity(pixels * 3);
        let mut alpha = Vec::with_capacity(pixels);
        for px in bitmap.pixels() {
            rgb.extend_from_slice(&px.0[..3]);
            alpha.push(px.0[3]);
        }

        let smask_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8_i64,
            },
            alpha,
        ));
        self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
                "SMask" => smask_id,
            },
            rgb,
        ))
    }
}

fn stroke_setup() -> Vec<Operation> {
    vec![
        Operation::new("RG", vec![0_i64.into(), 0_i64.into(), 0_i64.into()]),
        Operation::new("w", vec![OUTLINE_WIDTH_PT.into()]),
    ]
}

impl PageCanvas for PdfCanvas {
    fn new_page(&mut self) -> Result<()> {
        self.flush_page()?;
        self.current = Some(PageContent {
            operations: stroke_setup(),
            xobjects: Dictionary::new(),
        });
        Ok(())
    }

    fn draw_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<()> {
        let bottom = Self::to_pdf_y(y + height);
        let page = self.page()?;
        page.operations.push(Operation::new(
            "re",
            vec![
                mm_to_pt(x).into(),
                bottom.into(),
                mm_to_pt(width).into(),
                mm_to_pt(height).into(),
            ],
        ));
        page.operations.push(Operation::new("S", vec![]));
        Ok(())
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32) -> Result<()> {
        let (x, y, r) = (mm_to_pt(cx), Self::to_pdf_y(cy), mm_to_pt(radius));
        let k = r * KAPPA;
        let curve = |pts: [f32; 6]| Operation::new("c", pts.iter().map(|&v| v.into()).collect());
        let page = self.page()?;
        page.operations.extend([
            Operation::new("m", vec![(x + r).into(), y.into()]),
            curve([x + r, y + k, x + k, y + r, x, y + r]),
            curve([x - k, y + r, x - r, y + k, x - r, y]),
            curve([x - r, y - k, x - k, y - r, x, y - r]),
            curve([x + k, y - r, x + r, y - k, x + r, y]),
            Operation::new("S", vec![]),
        ]);
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
        self.page()?;
        let image_id = self.add_image_xobject(bitmap);
        self.images += 1;
        let name = format!("Im{}", self.images);
        let bottom = Self::to_pdf_y(y + height);
        let page = self.page()?;
        page.xobjects.set(name.as_bytes().to_vec(), image_id);
        page.operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    mm_to_pt(width).into(),
                    0_i64.into(),
                    0_i64.into(),
                    mm_to_pt(height).into(),
                    mm_to_pt(x).into(),
                    bottom.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(name.into_bytes())]),
            Operation::new("Q", vec![]),
        ]);
        Ok(())
    }

    fn finalize(mut self, output: &Path) -> Result<Vec<PathBuf>> {
        self.flush_page()?;
        let kids: Vec<Object> = self.page_ids.iter().map(|&id| id.into()).collect();
        let media_box: Vec<Object> = vec![
            0_i64.into(),
            0_i64.into(),
            mm_to_pt(PAGE_WIDTH_MM).into(),
            mm_to_pt(PAGE_HEIGHT_MM).into(),
        ];
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
            "MediaBox" => media_box,
        };
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        let created = Local::now().format("D:%Y%m%d%H%M%S").to_string();
        let info_id = self.doc.add_object(dictionary! {
            "Title" => Object::string_literal(self.title.as_str()),
            "Producer" => Object::string_literal(concat!("spotdeck ", env!("CARGO_PKG_VERSION"))),
            "CreationDate" => Object::string_literal(created),
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.trailer.set("Info", info_id);
        self.doc.compress();

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| Error::io(parent, err))?;
        }
        self.doc
            .save(output)
            .map_err(|err| Error::io(output, err))?;
        Ok(vec![output.to_path_buf()])
    }
}
