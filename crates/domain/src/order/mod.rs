//! Order placement value objects.

mod request;
mod result;
mod value_objects;

pub use request::PlaceOrderRequest;
pub use result::{OrderResult, order_total};
pub use value_objects::{Address, CartItem, CreditCardInfo, OrderItem, ProductId};
