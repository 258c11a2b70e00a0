//! Order submission.
//!
//! There is no payment processing. [`MockOrderProvider`] accepts every order
//! and assigns it a random `ORD-NNNNNN` reference.

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;
use tracing::instrument;
use wardrobe_core::checkout::OrderNumberError;
use wardrobe_core::{OrderConfirmation, OrderNumber, OrderRequest};

/// Errors that can occur while submitting an order.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order rejected: {0}")]
    Rejected(String),

    #[error("invalid order number: {0}")]
    OrderNumber(#[from] OrderNumberError),
}

/// Accepts validated orders.
#[async_trait]
pub trait OrderProvider: Send + Sync {
    async fn submit(&self, request: OrderRequest) -> Result<OrderConfirmation, OrderError>;
}

/// Order provider that confirms every order immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockOrderProvider;

impl MockOrderProvider {
    /// Random six-digit order number.
    ///
    /// # Errors
    ///
    /// Never in practice; the range matches `OrderNumber`'s bounds.
    pub fn generate_number() -> Result<OrderNumber, OrderNumberError> {
        let digits = rand::rng().random_range(OrderNumber::MIN..=OrderNumber::MAX);
        OrderNumber::new(digits)
    }
}

#[async_trait]
impl OrderProvider for MockOrderProvider {
    #[instrument(
        skip(self, request),
        fields(lines = request.items.len(), total = %request.summary.total)
    )]
    async fn submit(&self, request: OrderRequest) -> Result<OrderConfirmation, OrderError> {
        let order_number = Self::generate_number()?;
        tracing::info!(order_number = %order_number, "Mock order accepted");

        Ok(OrderConfirmation {
            order_number,
            placed_at: chrono::Utc::now(),
            customer_name: request.customer_name,
            email: request.email,
            payment_method: request.payment_method,
            items: request.items,
            summary: request.summary,
        })
    }
}
