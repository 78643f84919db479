use crate::models::Size;

/// Hard cap on distinct size lines per sale.
pub const MAX_CART_LINES: usize = 3;

#[derive(Debug, Clone)]
pub struct CartLine {
    pub size: Size,
    pub quantity: i64,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.size.price * self.quantity as f64
    }
}

/// The in-flight sale being assembled before submission. Holds up to
/// [`MAX_CART_LINES`] distinct size lines; adding a size already in the cart
/// accumulates onto its line instead of duplicating it.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` of `size`. Returns false (no-op) when the quantity is
    /// below 1 or the cart already holds the maximum of distinct sizes and
    /// this one is not among them.
    pub fn add(&mut self, size: &Size, quantity: i64) -> bool {
        if quantity < 1 {
            return false;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.size.id == size.id) {
            line.quantity += quantity;
            return true;
        }

        if self.lines.len() >= MAX_CART_LINES {
            return false;
        }

        self.lines.push(CartLine {
            size: size.clone(),
            quantity,
        });
        true
    }

    /// Set a line's quantity. Values below 1 are rejected; use [`Cart::remove`]
    /// to drop a line.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> bool {
        if quantity < 1 {
            return false;
        }
        match self.lines.get_mut(index) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(|l| l.subtotal()).sum()
    }

    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Blended unit price for the legacy sales header field.
    pub fn unit_price(&self) -> f64 {
        let quantity = self.total_quantity();
        if quantity > 0 {
            self.total() / quantity as f64
        } else {
            0.0
        }
    }

    /// The first line's size id fills the legacy single-size header field.
    pub fn first_size_id(&self) -> Option<i64> {
        self.lines.first().map(|l| l.size.id)
    }
}
