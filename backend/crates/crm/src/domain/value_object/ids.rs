//! Typed identifiers for CRM entities

use kernel::id::Id;

pub struct ClientMarker;
pub type ClientId = Id<ClientMarker>;

pub struct OrderMarker;
pub type OrderId = Id<OrderMarker>;

pub struct PaymentMarker;
pub type PaymentId = Id<PaymentMarker>;
