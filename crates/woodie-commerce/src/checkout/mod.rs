//! Checkout: delivery areas and the order summary.

mod delivery;
mod summary;

pub use delivery::{DeliveryArea, DELIVERY_AREAS};
pub use summary::{BuyNow, CheckoutLine, CheckoutMode, OrderSummary, PaymentMethod};
