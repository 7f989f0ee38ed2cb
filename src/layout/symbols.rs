//! Symbol slots inside a single card.
//!
//! Slot sizes are computed from the unscaled maximum, so the per-symbol
//! scale applied later only ever shrinks a symbol inside its slot.

use std::f32::consts::PI;

use rand::Rng;

/// Fraction of the usable radius at which round-card symbols are centred.
pub const RING_DISTANCE: f32 = 0.6;

/// Square area reserved for one symbol, in page millimetres (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl Slot {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.size / 2.0, self.y + self.size / 2.0)
    }
}

/// Right-angle rotation applied to a symbol bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::None,
        Rotation::Quarter,
        Rotation::Half,
        Rotation::ThreeQuarter,
    ];

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Quarter => 90,
            Rotation::Half => 180,
            Rotation::ThreeQuarter => 270,
        }
    }
}

/// Random per-symbol variation: a shrink factor and a rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolTransform {
    pub scale: f32,
    pub rotation: Rotation,
}

impl SymbolTransform {
    /// Draw a uniform scale in `[min_scale, max_scale]` and a uniform rotation.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, min_scale: f32, max_scale: f32) -> Self {
        let scale = min_scale + rng.random::<f32>() * (max_scale - min_scale);
        let rotation = Rotation::ALL[rng.random_range(0..Rotation::ALL.len())];
        Self {
            scale: scale.clamp(min_scale, max_scale),
            rotation,
        }
    }
}

/// A slot together with the transform drawn for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub slot: Slot,
    pub transform: SymbolTransform,
}

impl Placement {
    /// The footprint after scaling, anchored at the slot's top-left corner.
    pub fn footprint(&self) -> Slot {
        Slot {
            x: self.slot.x,
            y: self.slot.y,
            size: self.slot.size * self.transform.scale,
        }
    }
}

/// `k` equal horizontal bands; one symbol per band, jittered inside it.
pub fn square_slots<R: Rng + ?Sized>(
    origin: (f32, f32),
    card_size: f32,
    inset: f32,
    count: usize,
    rng: &mut R,
) -> Vec<Slot> {
    if count == 0 {
        return Vec::new();
    }
    let available = card_size - 2.0 * inset;
    let band = available / count as f32;
    let size = (available / 2.0).min(band);
    let x_room = (available - size).max(0.0);
    let y_room = (band - size).max(0.0);

    (0..count)
        .map(|i| {
            let band_top = origin.1 + inset + i as f32 * band;
            let x = origin.0 + inset + rng.random::<f32>() * x_room;
            let y = band_top + rng.random::<f32>() * y_room;
            // the band is a hard bound even under float rounding
            let y = y.min(band_top + band - size).max(band_top);
            Slot { x, y, size }
        })
        .collect()
}

/// Symbols evenly spaced on a ring at a fixed fraction of the usable radius.
///
/// With fewer than three symbols the slots are large enough to reach past the
/// card outline (k = 2 on a 55 mm card reaches about 29.4 mm from the centre).
pub fn round_slots(origin: (f32, f32), diameter: f32, inset: f32, count: usize) -> Vec<Slot> {
    if count == 0 {
        return Vec::new();
    }
    let radius = diameter / 2.0;
    let available = radius - inset;
    let size = available * 2.0 / (count as f32).sqrt();
    let distance = available * RING_DISTANCE;
    let (cx, cy) = (origin.0 + radius, origin.1 + radius);

    (0..count)
        .map(|i| {
            let angle = 2.0 * PI * i as f32 / count as f32;
            Slot {
                x: cx + distance * angle.cos() - size / 2.0,
                y: cy + distance * angle.sin() - size / 2.0,
                size,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPS: f32 = 1e-3;

    #[test]
    fn square_bands_never_overlap() {
        let mut rng = StdRng::seed_from_u64(3);
        for count in 1..=12 {
            let slots = square_slots((5.0, 5.0), 55.0, 5.0, count, &mut rng);
            assert_eq!(slots.len(), count);
            let available = 45.0;
            let band = available / count as f32;
            for (i, slot) in slots.iter().enumerate() {
                assert!(slot.size <= available / 2.0 + EPS);
                let top = 10.0 + i as f32 * band;
                assert!(slot.y >= top - EPS, "slot {i} of {count} above its band");
                assert!(slot.y + slot.size <= top + band + EPS);
                assert!(slot.x >= 10.0 - EPS);
                assert!(slot.x + slot.size <= 55.0 + EPS);
            }
            for pair in slots.windows(2) {
                assert!(pair[0].y + pair[0].size <= pair[1].y + EPS);
            }
        }
    }

    #[test]
    fn square_size_is_shared_and_capped_at_half_width() {
        let mut rng = StdRng::seed_from_u64(11);
        let slots = square_slots((0.0, 0.0), 55.0, 5.0, 2, &mut rng);
        assert!(slots.iter().all(|s| (s.size - 22.5).abs() < EPS));
        let slots = square_slots((0.0, 0.0), 55.0, 5.0, 9, &mut rng);
        assert!(slots.iter().all(|s| (s.size - 5.0).abs() < EPS));
    }

    #[test]
    fn round_ring_is_evenly_spaced_at_fixed_radius() {
        let origin = (65.0, 5.0);
        let (cx, cy) = (92.5, 32.5);
        let available = 27.5 - 5.0;
        for count in 1..=10 {
            let slots = round_slots(origin, 55.0, 5.0, count);
            assert_eq!(slots.len(), count);
            let step = 2.0 * PI / count as f32;
            for (i, slot) in slots.iter().enumerate() {
                let (sx, sy) = slot.center();
                let (dx, dy) = (sx - cx, sy - cy);
                let distance = (dx * dx + dy * dy).sqrt();
                assert!((distance - RING_DISTANCE * available).abs() < EPS);
                let angle = dy.atan2(dx).rem_euclid(2.0 * PI);
                let expected = step * i as f32;
                let diff = (angle - expected).abs();
                assert!(
                    diff < EPS || (2.0 * PI - diff) < EPS,
                    "slot {i} of {count}: angle {angle} expected {expected}"
                );
                assert!((slot.size - available * 2.0 / (count as f32).sqrt()).abs() < EPS);
            }
        }
    }

    #[test]
    fn round_slots_reach_past_the_outline_only_below_three_symbols() {
        let (cx, cy) = (27.5, 27.5);
        for count in 1..=12 {
            let reach = round_slots((0.0, 0.0), 55.0, 5.0, count)
                .iter()
                .map(|slot| {
                    let (sx, sy) = slot.center();
                    ((sx - cx).powi(2) + (sy - cy).powi(2)).sqrt() + slot.size / 2.0
                })
                .fold(0.0_f32, f32::max);
            if count < 3 {
                assert!(reach > 27.5, "{count} symbols reach {reach}");
            } else {
                assert!(reach <= 27.5, "{count} symbols reach {reach}");
            }
        }
        let two = round_slots((0.0, 0.0), 55.0, 5.0, 2);
        let (sx, _) = two[0].center();
        assert!(((sx - cx) + two[0].size / 2.0 - 29.41).abs() < 0.01);
    }

    #[test]
    fn transform_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let t = SymbolTransform::random(&mut rng, 0.7, 1.0);
            assert!((0.7..=1.0).contains(&t.scale));
            seen[(t.rotation.degrees() / 90) as usize] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn footprint_only_shrinks() {
        let slot = Slot { x: 10.0, y: 20.0, size: 8.0 };
        let placement = Placement {
            slot,
            transform: SymbolTransform { scale: 0.75, rotation: Rotation::Half },
        };
        let footprint = placement.footprint();
        assert_eq!((footprint.x, footprint.y), (10.0, 20.0));
        assert_eq!(footprint.size, 6.0);
    }
}
