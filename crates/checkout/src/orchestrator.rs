//! Checkout orchestrator for placing an order across collaborators.

use std::time::Instant;

use common::{OrderId, UserId};
use domain::{
    Address, CartItem, CreditCardInfo, OrderItem, OrderResult, PlaceOrderRequest, order_total,
};
use futures_util::future::try_join_all;
use money::Money;

use crate::error::{CheckoutError, Collaborator};
use crate::services::{
    CartService, CatalogService, CurrencyService, EmailService, PaymentService, ServiceError,
    ShippingService, redact_address,
};
use crate::state::CheckoutState;
use crate::steps;

/// Places orders by driving the checkout steps in dependency order.
///
/// Pricing and the shipping quote feed the total; the total feeds the
/// charge; shipping only happens after a successful charge. Clearing the
/// cart and sending the confirmation are best-effort. A shipping failure
/// after payment does not refund the charge.
///
/// Collaborators are injected at construction. The orchestrator holds no
/// mutable state, so one instance can serve concurrent orders as long as
/// the collaborators can.
pub struct CheckoutOrchestrator<C, K, X, S, P, E>
where
    C: CartService,
    K: CatalogService,
    X: CurrencyService,
    S: ShippingService,
    P: PaymentService,
    E: EmailService,
{
    cart: C,
    catalog: K,
    currency: X,
    shipping: S,
    payment: P,
    email: E,
}

impl<C, K, X, S, P, E> CheckoutOrchestrator<C, K, X, S, P, E>
where
    C: CartService,
    K: CatalogService,
    X: CurrencyService,
    S: ShippingService,
    P: PaymentService,
    E: EmailService,
{
    /// Creates a new checkout orchestrator.
    pub fn new(cart: C, catalog: K, currency: X, shipping: S, payment: P, email: E) -> Self {
        Self {
            cart,
            catalog,
            currency,
            shipping,
            payment,
            email,
        }
    }

    /// Places an order for the user's current cart.
    ///
    /// Dropping the returned future cancels whichever collaborator call is
    /// in flight, and no later step runs.
    #[tracing::instrument(
        skip(self, request),
        fields(
            flow = steps::CHECKOUT_FLOW,
            user_id = %request.user_id,
            currency = %request.user_currency,
        )
    )]
    pub async fn place_order(
        &self,
        request: PlaceOrderRequest,
    ) -> Result<OrderResult, CheckoutError> {
        let mut state = CheckoutState::Init;
        self.place_order_tracked(&request, &mut state).await
    }

    /// Places the order, leaving `state` at `Done` on success or `Failed`
    /// on an aborted checkout.
    async fn place_order_tracked(
        &self,
        request: &PlaceOrderRequest,
        state: &mut CheckoutState,
    ) -> Result<OrderResult, CheckoutError> {
        metrics::counter!("checkout_orders_total").increment(1);
        let started = Instant::now();

        let outcome = self.run(request, state).await;

        let duration = started.elapsed().as_secs_f64();
        metrics::histogram!("checkout_duration_seconds").record(duration);
        match &outcome {
            Ok(order) => {
                metrics::counter!("checkout_orders_completed").increment(1);
                tracing::info!(
                    order_id = %order.order_id(),
                    tracking_id = order.shipping_tracking_id(),
                    duration,
                    "order placed"
                );
            }
            Err(e) => {
                let reached = state.fail();
                metrics::counter!("checkout_orders_failed", "step" => e.step()).increment(1);
                tracing::warn!(
                    step = e.step(),
                    %reached,
                    state = %state,
                    paid = reached.is_paid(),
                    error = %e,
                    "checkout failed"
                );
            }
        }

        outcome
    }

    async fn run(
        &self,
        request: &PlaceOrderRequest,
        state: &mut CheckoutState,
    ) -> Result<OrderResult, CheckoutError> {
        request
            .validate()
            .map_err(|source| CheckoutError::Validation {
                step: steps::STEP_VALIDATE_REQUEST,
                source,
            })?;
        let currency = request.user_currency.as_str();

        let cart_items = self.fetch_cart(&request.user_id).await?;
        advance(state);

        let order_items = self.price_items(&cart_items, currency).await?;
        advance(state);

        let shipping_cost = self
            .quote_shipping(&request.address, &cart_items, currency)
            .await?;
        advance(state);

        let total = order_total(currency, &shipping_cost, &order_items).map_err(|source| {
            tracing::error!(error = %source, "order total terms disagree");
            CheckoutError::Validation {
                step: steps::STEP_COMPUTE_TOTAL,
                source,
            }
        })?;
        tracing::debug!(%total, "order total computed");
        advance(state);

        self.charge_card(&total, &request.credit_card).await?;
        advance(state);

        let tracking_id = self.ship_order(&request.address, &cart_items).await?;
        advance(state);

        self.empty_cart(&request.user_id).await;
        advance(state);

        let order = OrderResult::new(
            OrderId::new(),
            tracking_id,
            shipping_cost,
            request.address.clone(),
            order_items,
        );

        self.send_confirmation(&request.email, &order).await;
        advance(state);
        advance(state);

        Ok(order)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_cart(&self, user_id: &UserId) -> Result<Vec<CartItem>, CheckoutError> {
        let items =
            self.cart
                .get_cart(user_id)
                .await
                .map_err(|source| CheckoutError::CartFailure {
                    user_id: user_id.clone(),
                    source,
                })?;

        for item in &items {
            item.validate()
                .map_err(|source| CheckoutError::Validation {
                    step: steps::STEP_FETCH_CART,
                    source,
                })?;
        }

        tracing::debug!(items = items.len(), "cart fetched");
        Ok(items)
    }

    /// Prices all items concurrently, keeping cart order. The first failure
    /// wins and drops the remaining lookups.
    async fn price_items(
        &self,
        items: &[CartItem],
        currency: &str,
    ) -> Result<Vec<OrderItem>, CheckoutError> {
        try_join_all(items.iter().map(|item| self.price_item(item, currency))).await
    }

    #[tracing::instrument(skip(self, item), fields(product_id = %item.product_id))]
    async fn price_item(&self, item: &CartItem, currency: &str) -> Result<OrderItem, CheckoutError> {
        let pricing_failure = |collaborator, source| CheckoutError::PricingFailure {
            product_id: item.product_id.clone(),
            collaborator,
            source,
        };

        let product = self
            .catalog
            .get_product(&item.product_id)
            .await
            .map_err(|source| pricing_failure(Collaborator::Catalog, source))?;
        let cost = self
            .currency
            .convert(&product.price_usd, currency)
            .await
            .map_err(|source| pricing_failure(Collaborator::Currency, source))?;

        Ok(OrderItem::new(item.clone(), cost))
    }

    #[tracing::instrument(skip(self, address, items))]
    async fn quote_shipping(
        &self,
        address: &Address,
        items: &[CartItem],
        currency: &str,
    ) -> Result<Money, CheckoutError> {
        let quote_usd = self
            .shipping
            .get_quote(address, items)
            .await
            .map_err(|source| CheckoutError::ShippingQuoteFailure {
                collaborator: Collaborator::Shipping,
                source,
            })?;
        let localized = self
            .currency
            .convert(&quote_usd, currency)
            .await
            .map_err(|source| CheckoutError::ShippingQuoteFailure {
                collaborator: Collaborator::Currency,
                source,
            })?;

        tracing::debug!(%quote_usd, %localized, "shipping quoted");
        Ok(localized)
    }

    #[tracing::instrument(skip(self, total, card), fields(total = %total))]
    async fn charge_card(&self, total: &Money, card: &CreditCardInfo) -> Result<(), CheckoutError> {
        let result = self
            .payment
            .charge(total, card)
            .await
            .map_err(|source| CheckoutError::PaymentFailure { source })?;

        if result.transaction_id.is_empty() {
            return Err(CheckoutError::PaymentFailure {
                source: ServiceError::InvalidData("empty transaction id".to_string()),
            });
        }

        tracing::info!(transaction_id = %result.transaction_id, "payment went through");
        Ok(())
    }

    #[tracing::instrument(skip(self, address, items))]
    async fn ship_order(
        &self,
        address: &Address,
        items: &[CartItem],
    ) -> Result<String, CheckoutError> {
        let result = self
            .shipping
            .ship_order(address, items)
            .await
            .map_err(|source| {
                tracing::error!(error = %source, "shipment failed after payment; charge stands");
                CheckoutError::ShippingFailure { source }
            })?;

        Ok(result.tracking_id)
    }

    #[tracing::instrument(skip(self))]
    async fn empty_cart(&self, user_id: &UserId) {
        if let Err(e) = self.cart.empty_cart(user_id).await {
            metrics::counter!("checkout_cleanup_failures_total", "step" => steps::STEP_EMPTY_CART)
                .increment(1);
            tracing::warn!(error = %e, "failed to empty user cart");
        }
    }

    #[tracing::instrument(
        skip(self, email, order),
        fields(order_id = %order.order_id(), recipient = %redact_address(email))
    )]
    async fn send_confirmation(&self, email: &str, order: &OrderResult) {
        match self.email.send_order_confirmation(email, order).await {
            Ok(()) => tracing::info!("order confirmation sent"),
            Err(e) => {
                metrics::counter!(
                    "checkout_cleanup_failures_total",
                    "step" => steps::STEP_SEND_CONFIRMATION
                )
                .increment(1);
                tracing::warn!(error = %e, "failed to send order confirmation");
            }
        }
    }
}

fn advance(state: &mut CheckoutState) {
    state.advance();
    tracing::debug!(state = %state, "checkout advanced");
}
