//! Error taxonomy for the matching core
//!
//! The public entry points flatten every rejection to `false`; these
//! variants carry the reason between the container, the book and the log
//! lines in between.

use crate::ids::{ClientId, OrderId};
use thiserror::Error;

/// Rejection reasons for insert / modify / cancel commands
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderError {
    #[error("duplicate order id {order_id} for client {client_id}")]
    Duplicate {
        client_id: ClientId,
        order_id: OrderId,
    },

    #[error("order {order_id} for client {client_id} not found")]
    NotFound {
        client_id: ClientId,
        order_id: OrderId,
    },

    #[error("quantity must be strictly positive")]
    InvalidQuantity,

    #[error("price must be strictly positive")]
    InvalidPrice,

    #[error("invalid order way code {0}")]
    InvalidWay(i32),

    #[error("invalid trading phase code {0}")]
    InvalidPhase(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_display() {
        let err = OrderError::Duplicate {
            client_id: ClientId::new(1),
            order_id: OrderId::new(5),
        };
        assert_eq!(err.to_string(), "duplicate order id 5 for client 1");
    }

    #[test]
    fn test_invalid_field_display() {
        assert_eq!(
            OrderError::InvalidQuantity.to_string(),
            "quantity must be strictly positive"
        );
        assert_eq!(
            OrderError::InvalidPhase(6843).to_string(),
            "invalid trading phase code 6843"
        );
    }
}
