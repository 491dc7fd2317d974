//! Role-keyed order status transitions.
//!
//! Each actor owns a disjoint slice of the order lifecycle:
//!
//! ```text
//! merchant: pending -> confirmed | cancelled, confirmed -> cooking, cooking -> ready
//! driver:   ready -> delivery, delivery -> completed
//! customer: pending -> cancelled
//! ```
//!
//! The tables are pure data; the engine resolves the actor and persists the
//! result.

use serde::{Deserialize, Serialize};

use crate::{EngineError, OrderStatus, ResultEngine};

/// The role a user plays on a given order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderActor {
    Merchant,
    Driver,
    Customer,
}

impl OrderActor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Merchant => "merchant",
            Self::Driver => "driver",
            Self::Customer => "customer",
        }
    }

    /// Statuses this actor may move an order to from `from`.
    pub fn successors(self, from: OrderStatus) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match (self, from) {
            (Self::Merchant, Pending) => &[Confirmed, Cancelled],
            (Self::Merchant, Confirmed) => &[Cooking],
            (Self::Merchant, Cooking) => &[Ready],
            (Self::Driver, Ready) => &[Delivery],
            (Self::Driver, Delivery) => &[Completed],
            (Self::Customer, Pending) => &[Cancelled],
            _ => &[],
        }
    }

    pub fn can_transition(self, from: OrderStatus, to: OrderStatus) -> bool {
        self.successors(from).contains(&to)
    }
}

pub fn validate_transition(
    actor: OrderActor,
    from: OrderStatus,
    to: OrderStatus,
) -> ResultEngine<()> {
    if actor.can_transition(from, to) {
        return Ok(());
    }
    Err(EngineError::InvalidTransition(format!(
        "{} cannot move order from {} to {}",
        actor.as_str(),
        from.as_str(),
        to.as_str()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrderStatus::*;

    const ALL: [OrderStatus; 7] = [
        Pending, Confirmed, Cooking, Ready, Delivery, Completed, Cancelled,
    ];

    #[test]
    fn merchant_drives_the_kitchen() {
        let m = OrderActor::Merchant;
        assert!(m.can_transition(Pending, Confirmed));
        assert!(m.can_transition(Pending, Cancelled));
        assert!(m.can_transition(Confirmed, Cooking));
        assert!(m.can_transition(Cooking, Ready));
        assert!(!m.can_transition(Ready, Delivery));
        assert!(!m.can_transition(Pending, Cooking));
        assert!(!m.can_transition(Confirmed, Cancelled));
    }

    #[test]
    fn driver_only_handles_delivery() {
        let d = OrderActor::Driver;
        assert!(d.can_transition(Ready, Delivery));
        assert!(d.can_transition(Delivery, Completed));
        assert!(!d.can_transition(Pending, Confirmed));
        assert!(!d.can_transition(Ready, Completed));
    }

    #[test]
    fn customer_can_only_cancel_pending() {
        let c = OrderActor::Customer;
        assert!(c.can_transition(Pending, Cancelled));
        for from in ALL {
            for to in ALL {
                if (from, to) != (Pending, Cancelled) {
                    assert!(!c.can_transition(from, to), "{from:?} -> {to:?}");
                }
            }
        }
    }

    #[test]
    fn terminal_states_have_no_successors() {
        for actor in [OrderActor::Merchant, OrderActor::Driver, OrderActor::Customer] {
            assert!(actor.successors(Completed).is_empty());
            assert!(actor.successors(Cancelled).is_empty());
        }
    }

    #[test]
    fn rejection_names_the_move() {
        let err = validate_transition(OrderActor::Driver, Pending, Confirmed).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidTransition(
                "driver cannot move order from pending to confirmed".to_string()
            )
        );
    }
}
