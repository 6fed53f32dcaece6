//! # Cart Commands
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  CART                                            2 item(s)     │
//! ├────────────────────────────────────────────────────────────────┤
//! │  p1  Desk Lamp             x2     $19.99        $39.98         │
//! │  p7  Bulb                  x1      $2.50         $2.50         │
//! ├────────────────────────────────────────────────────────────────┤
//! │  3 unit(s)                                      $42.48         │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use clap::Subcommand;
use storefront_client::{CartView, FlowOutcome, Storefront};

/// Printed when price × quantity does not fit in the money type.
const LINE_TOTAL_OVERFLOW: &str = "n/a";

#[derive(Subcommand)]
pub enum CartCommand {
    /// Fetch and print the cart
    Show,

    /// Remove one product from the cart
    Delete {
        product_id: String,
    },

    /// Remove everything from the cart
    Clear,

    /// Set the quantity of one product (must be at least 1)
    Update {
        product_id: String,

        quantity: i64,
    },
}

pub async fn run(storefront: &Storefront, command: CartCommand) -> FlowOutcome {
    let flow = storefront.cart();

    let outcome = match command {
        CartCommand::Show => flow.fetch().await,
        CartCommand::Delete { product_id } => flow.delete_item(&product_id).await,
        CartCommand::Clear => flow.clear().await,
        CartCommand::Update {
            product_id,
            quantity,
        } => flow.update_quantity(&product_id, quantity).await,
    };

    let view = flow.view();
    if view.loaded {
        print!("{}", render(&view, storefront.store().cart().count));
    }
    outcome
}

fn render(view: &CartView, count: usize) -> String {
    if view.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let mut out = format!("CART ({} item(s))\n", count);
    for item in view.rows() {
        out.push_str(&format!(
            "  {:<10} {:<24} x{:<4} {:>10} {:>10}\n",
            item.product_id,
            item.name,
            item.quantity,
            item.price.to_string(),
            item.line_total()
                .map(|total| total.to_string())
                .unwrap_or_else(|| LINE_TOTAL_OVERFLOW.to_string())
        ));
    }
    out.push_str(&format!(
        "  {} unit(s), total {}\n",
        view.total_quantity, view.total_price
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{CartItem, Money};

    #[test]
    fn test_render_empty_cart() {
        let view = CartView {
            loaded: true,
            ..Default::default()
        };
        assert_eq!(render(&view, 0), "Your cart is empty\n");
    }

    #[test]
    fn test_render_rows_and_totals() {
        let view = CartView {
            items: vec![CartItem {
                product_id: "p1".into(),
                name: "Desk Lamp".into(),
                price: Money::from_cents(1999),
                quantity: 2,
                images: vec![],
            }],
            total_quantity: 2,
            total_price: Money::from_cents(3998),
            loaded: true,
        };

        let out = render(&view, 1);
        assert!(out.starts_with("CART (1 item(s))"));
        assert!(out.contains("Desk Lamp"));
        assert!(out.contains("$39.98"));
        assert!(out.contains("2 unit(s), total $39.98"));
    }

    #[test]
    fn test_render_overflowing_line_total() {
        let view = CartView {
            items: vec![CartItem {
                product_id: "p9".into(),
                name: "Yacht".into(),
                price: Money::from_cents(i64::MAX / 2),
                quantity: 3,
                images: vec![],
            }],
            total_quantity: 3,
            total_price: Money::from_cents(100),
            loaded: true,
        };

        let out = render(&view, 1);
        assert!(out.contains("Yacht"));
        assert!(out.contains(LINE_TOTAL_OVERFLOW));
    }
}
