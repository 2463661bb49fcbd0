//! Entity Module

pub mod client;
pub mod order;
pub mod payment;

pub use client::{Client, ClientFields};
pub use order::{Order, OrderFields};
pub use payment::{Payment, PaymentFields};

use chrono::{DateTime, SubsecRound, Utc};

/// Current time at the microsecond precision PostgreSQL stores, so an entity
/// returned by a create compares equal to the same row read back
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_has_no_sub_microsecond_part() {
        for _ in 0..100 {
            assert_eq!(now().timestamp_subsec_nanos() % 1_000, 0);
        }
    }
}
