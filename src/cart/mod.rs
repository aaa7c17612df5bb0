use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::jersey::{Jersey, JerseyId};

pub mod endpoints;
pub mod manager;
pub use endpoints::*;

const FREE_SHIPPING_OVER: f64 = 50.0;
const SHIPPING_FEE: f64 = 9.99;
const TAX_RATE: f64 = 0.0875;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub jersey: Jersey,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.jersey.price * f64::from(self.quantity)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    pub item_count: u32,
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
}

/// Jerseys the shopper intends to buy, one line per jersey. The total
/// quantity across all lines always fits in a `u32`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Cart {
        Cart::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn add(&mut self, jersey: Jersey) -> Result<(), Error> {
        self.insert(jersey, 1)
    }

    /// Adds `quantity` of `jersey`, merging with an existing line.
    pub fn insert(&mut self, jersey: Jersey, quantity: u32) -> Result<(), Error> {
        if quantity == 0 {
            return Ok(());
        }

        let jersey_id = jersey.id;
        self.item_count()
            .checked_add(quantity)
            .ok_or(Error::InvalidCartQuantity {
                jersey_id,
                quantity,
            })?;

        match self.line_mut(jersey_id) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartLine { jersey, quantity }),
        }

        Ok(())
    }

    /// Sets the quantity of a line. Anything below one removes it.
    pub fn update_quantity(&mut self, jersey_id: JerseyId, quantity: u32) -> Result<(), Error> {
        if quantity < 1 {
            self.remove(jersey_id);
            return Ok(());
        }

        let item_count = self.item_count();
        let line = match self.line_mut(jersey_id) {
            Some(line) => line,
            None => return Ok(()),
        };

        (item_count - line.quantity)
            .checked_add(quantity)
            .ok_or(Error::InvalidCartQuantity {
                jersey_id,
                quantity,
            })?;
        line.quantity = quantity;

        Ok(())
    }

    pub fn remove(&mut self, jersey_id: JerseyId) {
        self.lines.retain(|line| line.jersey.id != jersey_id);
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn summary(&self) -> CartSummary {
        let item_count = self.item_count();
        let subtotal: f64 = self.lines.iter().map(CartLine::line_total).sum();
        let shipping = if subtotal > FREE_SHIPPING_OVER {
            0.0
        } else {
            SHIPPING_FEE
        };
        let tax = subtotal * TAX_RATE;

        CartSummary {
            item_count,
            subtotal: to_cents(subtotal),
            shipping,
            tax: to_cents(tax),
            total: to_cents(subtotal + shipping + tax),
        }
    }

    fn line_mut(&mut self, jersey_id: JerseyId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.jersey.id == jersey_id)
    }
}

pub(crate) fn to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
