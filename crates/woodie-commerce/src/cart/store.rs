//! The cart store.

use crate::cart::{CartItem, CartLine, CartStorage, Quantity};
use crate::money::Money;
use tracing::{debug, warn};

/// Client-side cart: an ordered list of lines, one per [`LineId`](crate::ids::LineId).
///
/// Lines are loaded from storage once at construction and written back
/// after every mutation. Storage failures are logged and otherwise
/// ignored; the in-memory lines stay authoritative.
pub struct CartStore<S: CartStorage> {
    lines: Vec<CartLine>,
    open: bool,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Load the cart from storage. Missing or unreadable data yields an empty cart.
    pub fn load(storage: S) -> Self {
        let lines = match storage.load() {
            Ok(Some(lines)) => normalize(lines),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to load cart, starting empty");
                Vec::new()
            }
        };
        debug!(lines = lines.len(), "cart loaded");
        Self {
            lines,
            open: false,
            storage,
        }
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by id.
    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id.as_str() == id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Add `quantity` units of an item and open the cart.
    ///
    /// An existing line with the same id grows by exactly `quantity`;
    /// otherwise a new line is appended with the item's current fields.
    /// Zero or negative amounts leave an existing line unchanged and create
    /// a new line with quantity 1. Items without an id are ignored.
    /// Returns whether the lines changed.
    pub fn add_to_cart(&mut self, item: &CartItem, quantity: impl Into<i64>) -> bool {
        if item.id.is_blank() {
            debug!("ignoring add_to_cart without an id");
            return false;
        }
        let amount = Quantity::positive(quantity.into());
        self.open = true;

        match (self.lines.iter_mut().find(|l| l.id == item.id), amount) {
            (Some(line), Some(amount)) => {
                line.quantity = line.quantity.saturating_add(amount);
                debug!(id = %item.id, quantity = %line.quantity, "cart line merged");
            }
            (Some(_), None) => {
                debug!(id = %item.id, "non-positive add left line unchanged");
                return false;
            }
            (None, amount) => {
                let amount = amount.unwrap_or(Quantity::ONE);
                self.lines.push(item.to_line(amount));
                debug!(id = %item.id, quantity = %amount, "cart line added");
            }
        }

        self.persist();
        true
    }

    /// Remove a line. Unknown ids are a no-op.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id.as_str() != id);
        let removed = self.lines.len() < before;
        if removed {
            debug!(id, "cart line removed");
            self.persist();
        }
        removed
    }

    /// Set a line's quantity. Values below 1 and non-numeric input become 1.
    pub fn set_quantity(&mut self, id: &str, quantity: impl Into<Quantity>) -> bool {
        let quantity = quantity.into();
        self.update(id, |_| quantity)
    }

    /// Add one unit to a line.
    pub fn increment(&mut self, id: &str) -> bool {
        self.update(id, Quantity::increment)
    }

    /// Remove one unit from a line, never going below 1.
    pub fn decrement(&mut self, id: &str) -> bool {
        self.update(id, Quantity::decrement)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        debug!("cart cleared");
        self.persist();
    }

    /// Sum of quantities across lines.
    pub fn total_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity.get())).sum()
    }

    /// Sum of price × quantity across lines.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Whether the cart presentation should be shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the cart.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the cart.
    pub fn close(&mut self) {
        self.open = false;
    }

    fn update(&mut self, id: &str, f: impl FnOnce(Quantity) -> Quantity) -> bool {
        let Some(line) = self.lines.iter_mut().find(|l| l.id.as_str() == id) else {
            return false;
        };
        line.quantity = f(line.quantity);
        debug!(id, quantity = %line.quantity, "cart line quantity set");
        self.persist();
        true
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.lines) {
            warn!(error = %e, "failed to persist cart");
        }
    }
}

/// Restore the one-line-per-id invariant on data read from storage.
fn normalize(stored: Vec<CartLine>) -> Vec<CartLine> {
    let mut lines: Vec<CartLine> = Vec::with_capacity(stored.len());
    for line in stored {
        if line.id.is_blank() {
            continue;
        }
        match lines.iter_mut().find(|l| l.id == line.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => lines.push(line),
        }
    }
    lines
}
