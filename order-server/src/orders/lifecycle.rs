//! Order Lifecycle Gates
//!
//! Status checks applied before a mutation is attempted. Only open orders
//! (CREATED, PROCESSING) accept line edits or cancellation; payment
//! requires PROCESSING.

use shared::models::OrderStatus;

use super::error::{OrderError, OrderResult};

/// Line items may only change while the order is open
pub fn ensure_can_modify_items(status: OrderStatus) -> OrderResult<()> {
    match status {
        OrderStatus::Created | OrderStatus::Processing => Ok(()),
        other => Err(OrderError::InvalidState(other)),
    }
}

/// Customers may cancel any open order
pub fn ensure_can_cancel(status: OrderStatus) -> OrderResult<()> {
    match status {
        OrderStatus::Created | OrderStatus::Processing => Ok(()),
        other => Err(OrderError::InvalidState(other)),
    }
}

/// Payment only applies to an order the kitchen has accepted
pub fn ensure_can_pay(status: OrderStatus) -> OrderResult<()> {
    match status {
        OrderStatus::Processing => Ok(()),
        other => Err(OrderError::InvalidState(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_orders_accept_item_edits() {
        assert!(ensure_can_modify_items(OrderStatus::Created).is_ok());
        assert!(ensure_can_modify_items(OrderStatus::Processing).is_ok());
    }

    #[test]
    fn test_terminal_orders_reject_item_edits() {
        for status in [OrderStatus::Billed, OrderStatus::Canceled, OrderStatus::Closed] {
            match ensure_can_modify_items(status) {
                Err(OrderError::InvalidState(s)) => assert_eq!(s, status),
                other => panic!("expected InvalidState, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_pay_requires_processing() {
        assert!(ensure_can_pay(OrderStatus::Processing).is_ok());
        assert!(ensure_can_pay(OrderStatus::Created).is_err());
        assert!(ensure_can_pay(OrderStatus::Billed).is_err());
    }

    #[test]
    fn test_cancel_requires_open_order() {
        assert!(ensure_can_cancel(OrderStatus::Created).is_ok());
        assert!(ensure_can_cancel(OrderStatus::Processing).is_ok());
        assert!(ensure_can_cancel(OrderStatus::Canceled).is_err());
    }
}
