//! Page drawing backends and the driver that feeds them a deck.

mod pdf;
mod raster;

pub use pdf::PdfCanvas;
pub use raster::RasterCanvas;

use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{debug, info};
use rand::Rng;

use crate::config::Config;
use crate::core::Deck;
use crate::error::{Error, Result};
use crate::imaging::transform_symbol;
use crate::layout::{CardShape, LayoutEngine, Placement, Slot, SymbolTransform};

/// A fixed-size A4 surface addressed in millimetres from the top-left corner.
pub trait PageCanvas {
    fn new_page(&mut self) -> Result<()>;
    fn draw_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<()>;
    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32) -> Result<()>;
    fn place_image(
        &mut self,
        bitmap: &RgbaImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<()>;
    /// Persist every page, returning the files written.
    fn finalize(self, output: &Path) -> Result<Vec<PathBuf>>;
}

/// Outcome of a completed render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub cards: usize,
    pub pages: usize,
    pub outputs: Vec<PathBuf>,
}

/// Lay out and draw every card, then finalize the canvas.
///
/// The first failing symbol aborts the run before anything is written.
pub fn render_deck<C, R>(
    deck: &Deck,
    engine: &LayoutEngine,
    config: &Config,
    mut canvas: C,
    output: &Path,
    rng: &mut R,
) -> Result<RenderSummary>
where
    C: PageCanvas,
    R: Rng + ?Sized,
{
    let grid = engine.grid();
    let px_per_mm = config.px_per_mm();
    let mut pages = 0;

    for (index, card) in deck.cards.iter().enumerate() {
        if grid.starts_page(index) {
            canvas.new_page()?;
            pages += 1;
            info!("starting page {pages}");
        }

        let layout = engine.place_card(index, card.len(), rng);
        let pos = layout.position;
        debug!(
            "card {index}: page {} row {} col {} at ({:.1}, {:.1})",
            pos.page, pos.row, pos.col, pos.x, pos.y
        );

        match layout.shape {
            CardShape::Square => canvas.draw_rectangle(pos.x, pos.y, layout.size, layout.size)?,
            CardShape::Round => {
                let r = layout.size / 2.0;
                canvas.draw_circle(pos.x + r, pos.y + r, r)?
            }
        }

        for (symbol, slot) in card.symbols.iter().zip(&layout.slots) {
            let placement = Placement {
                slot: *slot,
                transform: SymbolTransform::random(rng, config.min_scale, config.max_scale),
            };
            let footprint = placement.footprint();
            let drawn = transform_symbol(
                &symbol.path,
                footprint.size,
                placement.transform.rotation,
                px_per_mm,
            )
            .and_then(|bitmap| {
                let (x, y, w, h) = fit_within(bitmap.width(), bitmap.height(), &footprint);
                canvas.place_image(&bitmap, x, y, w, h)
            });
            drawn.map_err(|err| Error::Render {
                card: index,
                symbol: symbol.path.display().to_string(),
                source: Box::new(err),
            })?;
        }
    }

    let outputs = canvas.finalize(output)?;
    info!(
        "wrote {} cards on {pages} page(s) to {}",
        deck.len(),
        output.display()
    );
    Ok(RenderSummary {
        cards: deck.len(),
        pages,
        outputs,
    })
}

/// Largest rectangle with the bitmap's aspect ratio centred inside `slot`.
pub fn fit_within(width: u32, height: u32, slot: &Slot) -> (f32, f32, f32, f32) {
    let longest = width.max(height).max(1) as f32;
    let w = slot.size * width as f32 / longest;
    let h = slot.size * height as f32 / longest;
    (
        slot.x + (slot.size - w) / 2.0,
        slot.y + (slot.size - h) / 2.0,
        w,
        h,
    )
}

pub(crate) fn mm_to_px(mm: f32, px_per_mm: f32) -> i32 {
    (mm * px_per_mm).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, Symbol};
    use image::Rgba;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<String>,
        images: Vec<(f32, f32, f32, f32)>,
    }

    impl PageCanvas for &mut Recorder {
        fn new_page(&mut self) -> Result<()> {
            self.calls.push("page".into());
            Ok(())
        }
        fn draw_rectangle(&mut self, _: f32, _: f32, _: f32, _: f32) -> Result<()> {
            self.calls.push("rect".into());
            Ok(())
        }
        fn draw_circle(&mut self, _: f32, _: f32, _: f32) -> Result<()> {
            self.calls.push("circle".into());
            Ok(())
        }
        fn place_image(&mut self, _: &RgbaImage, x: f32, y: f32, w: f32, h: f32) -> Result<()> {
            self.calls.push("image".into());
            self.images.push((x, y, w, h));
            Ok(())
        }
        fn finalize(self, output: &Path) -> Result<Vec<PathBuf>> {
            self.calls.push("finalize".into());
            Ok(vec![output.to_path_buf()])
        }
    }

    fn deck_from(dir: &Path, cards: usize, per_card: usize) -> Deck {
        let symbols: Vec<Symbol> = (0..per_card)
            .map(|i| {
                let path = dir.join(format!("s{i}.png"));
                RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255]))
                    .save(&path)
                    .unwrap();
                Symbol::new(path)
            })
            .collect();
        Deck {
            order: per_card - 1,
            cards: vec![Card { symbols }; cards],
        }
    }

    #[test]
    fn pages_break_every_twelve_cards() {
        let dir = tempfile::tempdir().unwrap();
        let deck = deck_from(dir.path(), 13, 3);
        let config = Config::default();
        let engine = LayoutEngine::new(&config, CardShape::Round).unwrap();
        let mut recorder = Recorder::default();
        let summary = render_deck(
            &deck,
            &engine,
            &config,
            &mut recorder,
            Path::new("out.pdf"),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();

        assert_eq!(summary.pages, 2);
        assert_eq!(summary.cards, 13);
        let count = |name: &str| recorder.calls.iter().filter(|c| *c == name).count();
        assert_eq!(count("page"), 2);
        assert_eq!(count("circle"), 13);
        assert_eq!(count("image"), 39);
        assert_eq!(recorder.calls.last().map(String::as_str), Some("finalize"));
        assert_eq!(recorder.calls[12 * 4 + 1], "page");
    }

    #[test]
    fn missing_symbol_aborts_without_finalizing() {
        let dir = tempfile::tempdir().unwrap();
        let mut deck = deck_from(dir.path(), 3, 3);
        deck.cards[1].symbols[2] = Symbol::new(dir.path().join("gone.png"));
        let config = Config::default();
        let engine = LayoutEngine::new(&config, CardShape::Square).unwrap();
        let mut recorder = Recorder::default();

        let err = render_deck(
            &deck,
            &engine,
            &config,
            &mut recorder,
            Path::new("out.pdf"),
            &mut StdRng::seed_from_u64(2),
        )
        .unwrap_err();

        match err {
            Error::Render { card, symbol, .. } => {
                assert_eq!(card, 1);
                assert!(symbol.ends_with("gone.png"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(!recorder.calls.iter().any(|c| c == "finalize"));
    }

    #[test]
    fn fit_keeps_aspect_and_centres() {
        let slot = Slot { x: 10.0, y: 10.0, size: 20.0 };
        assert_eq!(fit_within(100, 50, &slot), (10.0, 15.0, 20.0, 10.0));
        assert_eq!(fit_within(50, 100, &slot), (15.0, 10.0, 10.0, 20.0));
        assert_eq!(fit_within(64, 64, &slot), (10.0, 10.0, 20.0, 20.0));
    }
}
