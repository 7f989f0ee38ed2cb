//! Construction checks (`spotdeck verify`).

use anyhow::{Result, anyhow};
use clap::{ArgGroup, Args};
use spotdeck::{Order, construct, verify_incidence};

/// Largest order `verify` will check; the pairwise scan grows with `n⁴`.
const MAX_VERIFY_ORDER: usize = 64;

fn checked_order(order: Order) -> Result<Order> {
    if order.get() > MAX_VERIFY_ORDER {
        return Err(anyhow!(
            "order {order} is too large to verify (maximum {MAX_VERIFY_ORDER})"
        ));
    }
    Ok(order)
}

/// Arguments for `spotdeck verify`.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["symbols", "max_order"])))]
pub struct VerifyArgs {
    /// Check the deck for this many symbols per card; fails if it is invalid.
    #[arg(short = 's', long = "symbols")]
    pub symbols: Option<usize>,
    /// Tabulate every order from 1 up to this value.
    #[arg(long = "max-order")]
    pub max_order: Option<usize>,
}

/// Execute `spotdeck verify`.
pub fn handle(args: VerifyArgs) -> Result<()> {
    if let Some(symbols) = args.symbols {
        let order = checked_order(Order::from_symbols_per_card(symbols)?)?;
        let report = verify_incidence(order, &construct(order));
        if !report.is_valid() {
            return Err(anyhow!(
                "order {order} is not a valid plane: {} card pair(s) do not share exactly one symbol, {} symbol(s) unbalanced",
                report.bad_pairs.len(),
                report.unbalanced_symbols.len()
            ));
        }
        println!(
            "order {order}: {} cards of {} symbols, every pair shares exactly one symbol",
            report.cards,
            order.symbols_per_card()
        );
        return Ok(());
    }

    let max_order = args.max_order.unwrap_or(1);
    checked_order(Order::new(max_order)?)?;
    println!("{:>5} {:>7} {:>6}  status", "order", "symbols", "cards");
    for n in 1..=max_order {
        let order = Order::new(n)?;
        let report = verify_incidence(order, &construct(order));
        let status = if report.is_valid() {
            "ok".to_string()
        } else {
            format!("{} bad pair(s)", report.bad_pairs.len())
        };
        println!(
            "{:>5} {:>7} {:>6}  {}",
            n,
            order.symbols_per_card(),
            report.cards,
            status
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_orders_fail_with_a_message() {
        let err = handle(VerifyArgs {
            symbols: Some(usize::MAX / 2),
            max_order: None,
        })
        .unwrap_err();
        assert!(err.to_string().contains("symbols per card"), "{err}");

        let err = handle(VerifyArgs {
            symbols: None,
            max_order: Some(MAX_VERIFY_ORDER + 1),
        })
        .unwrap_err();
        assert!(err.to_string().contains("too large to verify"), "{err}");
    }

    #[test]
    fn small_prime_order_verifies() {
        handle(VerifyArgs {
            symbols: Some(4),
            max_order: None,
        })
        .unwrap();
    }
}
