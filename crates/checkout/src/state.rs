//! Checkout state machine.

use serde::{Deserialize, Serialize};

/// Progress of a single order placement.
///
/// The happy path is strictly linear:
/// ```text
/// Init ─► CartFetched ─► ItemsPriced ─► ShippingQuoted ─► TotalComputed
///      ─► Charged ─► Shipped ─► CartCleared ─► NotificationAttempted ─► Done
/// ```
/// Any state before `Shipped` may instead move to `Failed`. `CartCleared`
/// and `NotificationAttempted` mean the step was *attempted*; their
/// failures never lead to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    #[default]
    Init,
    CartFetched,
    ItemsPriced,
    ShippingQuoted,
    TotalComputed,
    Charged,
    Shipped,
    CartCleared,
    NotificationAttempted,
    Done,
    Failed,
}

impl CheckoutState {
    /// Returns the successor on the happy path, if any.
    pub fn next(&self) -> Option<CheckoutState> {
        use CheckoutState::*;
        match self {
            Init => Some(CartFetched),
            CartFetched => Some(ItemsPriced),
            ItemsPriced => Some(ShippingQuoted),
            ShippingQuoted => Some(TotalComputed),
            TotalComputed => Some(Charged),
            Charged => Some(Shipped),
            Shipped => Some(CartCleared),
            CartCleared => Some(NotificationAttempted),
            NotificationAttempted => Some(Done),
            Done | Failed => None,
        }
    }

    /// Returns true if the checkout can still abort from this state.
    ///
    /// Once the order has shipped, the remaining steps are best-effort.
    pub fn can_fail(&self) -> bool {
        use CheckoutState::*;
        matches!(
            self,
            Init | CartFetched | ItemsPriced | ShippingQuoted | TotalComputed | Charged
        )
    }

    /// Returns true if the card has been charged in this state.
    pub fn is_paid(&self) -> bool {
        use CheckoutState::*;
        matches!(
            self,
            Charged | Shipped | CartCleared | NotificationAttempted | Done
        )
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutState::Done | CheckoutState::Failed)
    }

    /// Moves to the happy-path successor. Terminal states stay put.
    pub fn advance(&mut self) {
        if let Some(next) = self.next() {
            *self = next;
        }
    }

    /// Moves to `Failed` if the checkout can still abort and returns the
    /// state that had been reached. Past shipping the state is kept.
    pub fn fail(&mut self) -> CheckoutState {
        let reached = *self;
        if self.can_fail() {
            *self = CheckoutState::Failed;
        }
        reached
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Init => "Init",
            CheckoutState::CartFetched => "CartFetched",
            CheckoutState::ItemsPriced => "ItemsPriced",
            CheckoutState::ShippingQuoted => "ShippingQuoted",
            CheckoutState::TotalComputed => "TotalComputed",
            CheckoutState::Charged => "Charged",
            CheckoutState::Shipped => "Shipped",
            CheckoutState::CartCleared => "CartCleared",
            CheckoutState::NotificationAttempted => "NotificationAttempted",
            CheckoutState::Done => "Done",
            CheckoutState::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_init() {
        assert_eq!(CheckoutState::default(), CheckoutState::Init);
    }

    #[test]
    fn test_happy_path_order() {
        let mut state = CheckoutState::Init;
        let mut visited = vec![state];
        while !state.is_terminal() {
            state.advance();
            visited.push(state);
        }

        assert_eq!(
            visited,
            vec![
                CheckoutState::Init,
                CheckoutState::CartFetched,
                CheckoutState::ItemsPriced,
                CheckoutState::ShippingQuoted,
                CheckoutState::TotalComputed,
                CheckoutState::Charged,
                CheckoutState::Shipped,
                CheckoutState::CartCleared,
                CheckoutState::NotificationAttempted,
                CheckoutState::Done,
            ]
        );
    }

    #[test]
    fn test_terminal_states_do_not_advance() {
        let mut done = CheckoutState::Done;
        done.advance();
        assert_eq!(done, CheckoutState::Done);

        let mut failed = CheckoutState::Failed;
        failed.advance();
        assert_eq!(failed, CheckoutState::Failed);
    }

    #[test]
    fn test_can_fail_only_before_shipping() {
        assert!(CheckoutState::Init.can_fail());
        assert!(CheckoutState::Charged.can_fail());
        assert!(!CheckoutState::Shipped.can_fail());
        assert!(!CheckoutState::CartCleared.can_fail());
        assert!(!CheckoutState::NotificationAttempted.can_fail());
        assert!(!CheckoutState::Done.can_fail());
    }

    #[test]
    fn test_fail_before_shipping() {
        let mut state = CheckoutState::Charged;
        let reached = state.fail();
        assert_eq!(reached, CheckoutState::Charged);
        assert!(reached.is_paid());
        assert_eq!(state, CheckoutState::Failed);
        assert!(state.is_terminal());
        assert!(!state.is_paid());
    }

    #[test]
    fn test_fail_after_shipping_keeps_state() {
        let mut state = CheckoutState::CartCleared;
        assert_eq!(state.fail(), CheckoutState::CartCleared);
        assert_eq!(state, CheckoutState::CartCleared);

        let mut failed = CheckoutState::Failed;
        assert_eq!(failed.fail(), CheckoutState::Failed);
        assert_eq!(failed, CheckoutState::Failed);
    }

    #[test]
    fn test_paid_states() {
        assert!(!CheckoutState::TotalComputed.is_paid());
        assert!(CheckoutState::Charged.is_paid());
        assert!(CheckoutState::Done.is_paid());
        assert!(!CheckoutState::Failed.is_paid());
    }

    #[test]
    fn test_display() {
        assert_eq!(CheckoutState::Init.to_string(), "Init");
        assert_eq!(
            CheckoutState::NotificationAttempted.to_string(),
            "NotificationAttempted"
        );
        assert_eq!(CheckoutState::Failed.to_string(), "Failed");
    }

    #[test]
    fn test_serialization() {
        let state = CheckoutState::Charged;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: CheckoutState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
