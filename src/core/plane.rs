//! Finite projective plane incidence construction.
//!
//! Symbols are numbered `1..=n²+n+1` and every card holds `n+1` of them. The
//! layout is generated in two phases: the pencil of lines through symbol 1,
//! followed by the `n × n` grid of remaining lines.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Error, Result};

/// Largest supported order. A plane of order 256 already needs 65 793 symbol
/// images, and capping here keeps `n² + n + 1` far from overflowing.
pub const MAX_ORDER: usize = 256;

/// Plane order `n`, one less than the number of symbols per card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Order(usize);

impl Order {
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::Configuration(
                "plane order must be at least 1".to_string(),
            ));
        }
        if n > MAX_ORDER {
            return Err(Error::Configuration(format!(
                "plane order {n} exceeds the maximum of {MAX_ORDER}"
            )));
        }
        Ok(Self(n))
    }

    /// Derive the order from a symbols-per-card count, rejecting counts below 2
    /// or above `MAX_ORDER + 1`.
    pub fn from_symbols_per_card(symbols_per_card: usize) -> Result<Self> {
        if symbols_per_card < 2 || symbols_per_card > MAX_ORDER + 1 {
            return Err(Error::Configuration(format!(
                "symbols per card must be between 2 and {} (got {symbols_per_card})",
                MAX_ORDER + 1
            )));
        }
        Ok(Self(symbols_per_card - 1))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn symbols_per_card(self) -> usize {
        self.0 + 1
    }

    /// Number of cards in the full plane, which is also the number of distinct symbols.
    pub fn deck_size(self) -> usize {
        self.0 * self.0 + self.0 + 1
    }

    /// Whether the modular construction yields a valid plane: order 1 (the
    /// triangle) or any prime order.
    pub fn yields_valid_plane(self) -> bool {
        let n = self.0;
        if n < 2 {
            return n == 1;
        }
        (2..).take_while(|d: &usize| d * d <= n).all(|d| n % d != 0)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A card expressed as 1-based symbol slot indices.
pub type SlotCard = Vec<usize>;

/// Build all `n²+n+1` cards of the plane, pencil first, then the grid.
pub fn construct(order: Order) -> Vec<SlotCard> {
    let mut cards = Vec::with_capacity(order.deck_size());
    cards.extend(pencil(order));
    cards.extend(grid(order));
    cards
}

/// The `n+1` lines through symbol 1.
fn pencil(order: Order) -> impl Iterator<Item = SlotCard> {
    let n = order.get();
    (0..=n).map(move |i| {
        let mut card = Vec::with_capacity(n + 1);
        card.push(1);
        card.extend((0..n).map(|j| (j + 1) + i * n + 1));
        card
    })
}

/// The `n²` lines that avoid symbol 1.
fn grid(order: Order) -> impl Iterator<Item = SlotCard> {
    let n = order.get();
    (0..n).flat_map(move |i| {
        (0..n).map(move |j| {
            let mut card = Vec::with_capacity(n + 1);
            card.push(i + 2);
            card.extend((0..n).map(|k| (n + 1 + n * k + (i * k + j) % n) + 1));
            card
        })
    })
}

/// Result of checking a set of cards against the one-shared-symbol rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IncidenceReport {
    pub cards: usize,
    /// Card pairs (0-based) whose intersection is not exactly one symbol.
    pub bad_pairs: Vec<(usize, usize)>,
    /// Symbols that do not appear on exactly `n+1` cards.
    pub unbalanced_symbols: Vec<usize>,
}

impl IncidenceReport {
    pub fn is_valid(&self) -> bool {
        self.bad_pairs.is_empty() && self.unbalanced_symbols.is_empty()
    }
}

/// Check the incidence structure produced by [`construct`].
pub fn verify_incidence(order: Order, cards: &[SlotCard]) -> IncidenceReport {
    let sets: Vec<BTreeSet<usize>> = cards.iter().map(|c| c.iter().copied().collect()).collect();
    let mut report = IncidenceReport {
        cards: cards.len(),
        ..IncidenceReport::default()
    };

    for a in 0..sets.len() {
        for b in (a + 1)..sets.len() {
            if sets[a].intersection(&sets[b]).count() != 1 {
                report.bad_pairs.push((a, b));
            }
        }
    }

    let mut counts = vec![0usize; order.deck_size() + 1];
    for set in &sets {
        for &symbol in set {
            if let Some(slot) = counts.get_mut(symbol) {
                *slot += 1;
            }
        }
    }
    report.unbalanced_symbols = counts
        .iter()
        .enumerate()
        .skip(1)
        .filter(|&(_, &count)| count != order.symbols_per_card())
        .map(|(symbol, _)| symbol)
        .collect();

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn order_one_is_the_triangle() {
        let cards = construct(Order::new(1).unwrap());
        assert_eq!(cards, vec![vec![1, 2], vec![1, 3], vec![2, 3]]);
    }

    #[test]
    fn order_two_matches_fano_plane() {
        let cards = construct(Order::new(2).unwrap());
        assert_eq!(
            cards,
            vec![
                vec![1, 2, 3],
                vec![1, 4, 5],
                vec![1, 6, 7],
                vec![2, 4, 6],
                vec![2, 5, 7],
                vec![3, 4, 7],
                vec![3, 5, 6],
            ]
        );
    }

    #[test]
    fn prime_orders_produce_valid_planes() {
        for n in [1, 2, 3, 5, 7, 11] {
            let order = Order::new(n).unwrap();
            let cards = construct(order);
            assert_eq!(cards.len(), n * n + n + 1);
            for card in &cards {
                assert_eq!(card.len(), n + 1);
                assert!(card.iter().all(|&s| (1..=order.deck_size()).contains(&s)));
                let distinct: BTreeSet<_> = card.iter().collect();
                assert_eq!(distinct.len(), card.len(), "duplicate symbol on {card:?}");
            }
            let report = verify_incidence(order, &cards);
            assert!(report.is_valid(), "order {n}: {report:?}");
        }
    }

    #[test]
    fn composite_order_is_detected() {
        let order = Order::new(4).unwrap();
        assert!(!order.yields_valid_plane());
        let report = verify_incidence(order, &construct(order));
        assert!(!report.is_valid());
        assert!(!report.bad_pairs.is_empty());
    }

    #[test]
    fn symbols_per_card_below_two_are_rejected() {
        assert!(matches!(
            Order::from_symbols_per_card(1),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            Order::from_symbols_per_card(0),
            Err(Error::Configuration(_))
        ));
        assert_eq!(Order::from_symbols_per_card(8).unwrap().get(), 7);
    }

    #[test]
    fn huge_orders_are_rejected_without_overflow() {
        for symbols in [usize::MAX / 2, usize::MAX, MAX_ORDER + 2] {
            assert!(matches!(
                Order::from_symbols_per_card(symbols),
                Err(Error::Configuration(_))
            ));
        }
        assert!(matches!(
            Order::new(usize::MAX / 2),
            Err(Error::Configuration(_))
        ));

        let largest = Order::from_symbols_per_card(MAX_ORDER + 1).unwrap();
        assert_eq!(largest, Order::new(MAX_ORDER).unwrap());
        assert_eq!(largest.deck_size(), 65_793);
    }

    #[test]
    fn valid_orders_are_one_and_primes() {
        let primes: Vec<usize> = (1..20)
            .filter(|&n| Order::new(n).unwrap().yields_valid_plane())
            .collect();
        assert_eq!(primes, vec![1, 2, 3, 5, 7, 11, 13, 17, 19]);
    }
}
