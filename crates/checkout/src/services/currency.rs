//! Currency conversion trait and table-driven in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use money::{Money, MoneyError, carry};

use super::{ServiceError, read, write};

/// Trait for converting money between currencies.
#[async_trait]
pub trait CurrencyService: Send + Sync {
    /// Converts `from` into `to_currency`. Fails when either code is
    /// unsupported.
    async fn convert(&self, from: &Money, to_currency: &str) -> Result<Money, ServiceError>;
}

/// Immutable exchange-rate table.
///
/// Rates are expressed against a single pivot currency (EUR, rate `1.0`).
/// Conversion goes `from -> pivot -> to`, normalizing each leg with
/// [`carry`] so fractional remainders are kept as nanos.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyTable {
    rates: HashMap<String, f64>,
}

impl CurrencyTable {
    /// Builds a table, rejecting non-positive or non-finite rates.
    pub fn new(rates: HashMap<String, f64>) -> Result<Self, ServiceError> {
        if let Some((code, rate)) = rates
            .iter()
            .find(|(_, rate)| !rate.is_finite() || **rate <= 0.0)
        {
            return Err(ServiceError::InvalidData(format!(
                "rate for {code} must be positive, got {rate}"
            )));
        }
        Ok(Self { rates })
    }

    /// Parses a `{"CODE": "rate"}` document, rates given as decimal strings.
    pub fn from_json(data: &str) -> Result<Self, ServiceError> {
        let raw: HashMap<String, String> = serde_json::from_str(data)
            .map_err(|e| ServiceError::InvalidData(format!("currency table: {e}")))?;

        let rates = raw
            .into_iter()
            .map(|(code, rate)| {
                rate.trim()
                    .parse::<f64>()
                    .map(|rate| (code.clone(), rate))
                    .map_err(|e| ServiceError::InvalidData(format!("rate for {code}: {e}")))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Self::new(rates)
    }

    /// Returns the rate of `code` against the pivot currency.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Returns true if `code` can be converted from and to.
    pub fn supports(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// Returns every supported code, sorted.
    pub fn supported_currencies(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.rates.keys().cloned().collect();
        codes.sort();
        codes
    }

    /// Converts an amount through the pivot currency.
    pub fn convert(&self, from: &Money, to_currency: &str) -> Result<Money, ServiceError> {
        let from_rate = self
            .rate(from.currency_code())
            .ok_or_else(|| ServiceError::UnsupportedCurrency(from.currency_code().to_string()))?;
        let to_rate = self
            .rate(to_currency)
            .ok_or_else(|| ServiceError::UnsupportedCurrency(to_currency.to_string()))?;

        if !from.is_valid() {
            return Err(MoneyError::InvalidValue.into());
        }
        if from.currency_code() == to_currency {
            return Ok(from.clone());
        }

        let (pivot_units, pivot_nanos) = carry(
            from.units() as f64 / from_rate,
            f64::from(from.nanos()) / from_rate,
        );
        let (units, nanos) = carry(
            pivot_units as f64 * to_rate,
            f64::from(pivot_nanos) * to_rate,
        );

        Ok(Money::new(to_currency, units, nanos))
    }
}

#[derive(Debug, Default)]
struct InMemoryCurrencyState {
    conversions: usize,
    fail_on_convert: bool,
}

/// Currency service backed by a [`CurrencyTable`] loaded once at startup.
#[derive(Debug, Clone)]
pub struct InMemoryCurrencyService {
    table: Arc<CurrencyTable>,
    state: Arc<RwLock<InMemoryCurrencyState>>,
}

impl InMemoryCurrencyService {
    /// Creates a service over the given table.
    pub fn new(table: CurrencyTable) -> Self {
        Self {
            table: Arc::new(table),
            state: Arc::default(),
        }
    }

    /// Returns the conversion table.
    pub fn table(&self) -> &CurrencyTable {
        &self.table
    }

    /// Returns every supported code, sorted.
    pub fn supported_currencies(&self) -> Vec<String> {
        self.table.supported_currencies()
    }

    /// Configures the service to fail on convert calls.
    pub fn set_fail_on_convert(&self, fail: bool) {
        write(&self.state).fail_on_convert = fail;
    }

    /// Returns how many conversions were attempted.
    pub fn conversions(&self) -> usize {
        read(&self.state).conversions
    }
}

#[async_trait]
impl CurrencyService for InMemoryCurrencyService {
    async fn convert(&self, from: &Money, to_currency: &str) -> Result<Money, ServiceError> {
        {
            let mut state = write(&self.state);
            state.conversions += 1;
            if state.fail_on_convert {
                return Err(ServiceError::Unavailable(
                    "Currency service unreachable".to_string(),
                ));
            }
        }

        let converted = self.table.convert(from, to_currency)?;
        tracing::debug!(%from, %converted, "converted currency");
        Ok(converted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CurrencyTable {
        CurrencyTable::from_json(
            r#"{"EUR": "1.0", "USD": "1.1305", "JPY": "126.40", "GBP": "0.85970"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_supported_currencies_sorted() {
        assert_eq!(
            table().supported_currencies(),
            vec!["EUR", "GBP", "JPY", "USD"]
        );
    }

    #[test]
    fn test_convert_from_pivot() {
        let t = table();
        assert_eq!(
            t.convert(&Money::from_units("EUR", 1), "USD").unwrap(),
            Money::new("USD", 1, 130_500_000)
        );
        assert_eq!(
            t.convert(&Money::from_units("EUR", 100), "GBP").unwrap(),
            Money::new("GBP", 85, 970_000_000)
        );
    }

    #[test]
    fn test_convert_into_pivot_keeps_fraction() {
        let euros = table()
            .convert(&Money::from_units("USD", 10), "EUR")
            .unwrap();
        assert_eq!(euros, Money::new("EUR", 8, 845_643_521));
        assert!(euros.is_valid());
    }

    #[test]
    fn test_convert_across_two_legs() {
        let yen = table()
            .convert(&Money::from_units("USD", 10), "JPY")
            .unwrap();
        assert_eq!(yen, Money::new("JPY", 1118, 89_341_054));
    }

    #[test]
    fn test_convert_to_same_currency_is_identity() {
        let amount = Money::new("USD", 8, 990_000_000);
        assert_eq!(table().convert(&amount, "USD").unwrap(), amount);
    }

    #[test]
    fn test_unsupported_codes() {
        let t = table();
        assert_eq!(
            t.convert(&Money::from_units("XYZ", 1), "USD"),
            Err(ServiceError::UnsupportedCurrency("XYZ".to_string()))
        );
        assert_eq!(
            t.convert(&Money::from_units("USD", 1), "XYZ"),
            Err(ServiceError::UnsupportedCurrency("XYZ".to_string()))
        );
    }

    #[test]
    fn test_invalid_amount_is_rejected() {
        assert_eq!(
            table().convert(&Money::new("USD", 1, -1), "EUR"),
            Err(ServiceError::Money(MoneyError::InvalidValue))
        );
    }

    #[test]
    fn test_bad_table_documents() {
        assert!(CurrencyTable::from_json("not json").is_err());
        assert!(CurrencyTable::from_json(r#"{"USD": "abc"}"#).is_err());
        assert!(CurrencyTable::from_json(r#"{"USD": "0"}"#).is_err());
    }

    #[tokio::test]
    async fn test_service_convert_and_failure_toggle() {
        let service = InMemoryCurrencyService::new(table());
        let usd = service
            .convert(&Money::from_units("EUR", 1), "USD")
            .await
            .unwrap();
        assert_eq!(usd, Money::new("USD", 1, 130_500_000));

        service.set_fail_on_convert(true);
        assert!(matches!(
            service.convert(&Money::from_units("EUR", 1), "USD").await,
            Err(ServiceError::Unavailable(_))
        ));
        assert_eq!(service.conversions(), 2);
    }
}
