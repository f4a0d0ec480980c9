//! Application controller: the search session state machine.
//!
//! One `SearchSession` drives the whole UI. Exactly one phase is active at
//! a time and the transition methods below are the only mutation path; the
//! view layer renders whatever phase it finds and never writes fields
//! directly.

use crate::types::ProductSummary;

/// Application phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    /// Initial state; search box and scanner entry points are available
    #[default]
    Idle,
    /// Live camera preview, waiting for a manual capture
    Scanning,
    /// A lookup sequence is in flight; no new search may start
    Searching,
    /// A `ProductSummary` is held and rendered
    Results,
    /// A lookup failed; a user-facing message is held
    Error,
}

/// Which step of a lookup failed.
///
/// Both collapse to the same `Error` phase; only the user-facing message
/// (and logging) differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureOrigin {
    Identification,
    PriceLookup,
}

impl FailureOrigin {
    /// User-facing message for this failure, distinct per origin.
    pub fn message(&self) -> &'static str {
        match self {
            FailureOrigin::Identification => {
                "Could not identify the product. Try searching manually."
            }
            FailureOrigin::PriceLookup => {
                "Failed to find price information. Please try again."
            }
        }
    }
}

/// The application controller.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SearchSession {
    phase: Phase,
    status: String,
    summary: Option<ProductSummary>,
    error: Option<String>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Progress text shown while `Searching`.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// The summary held in the `Results` phase.
    pub fn summary(&self) -> Option<&ProductSummary> {
        self.summary.as_ref()
    }

    /// The message held in the `Error` phase.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit a text query: `Idle -> Searching`.
    ///
    /// Blank or whitespace-only queries are rejected silently (the only
    /// validation before the network is invoked), as is any submission
    /// while a lookup is already in flight. Returns whether the transition
    /// happened.
    pub fn submit_query(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() || self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Searching;
        self.status = format!("Searching for \"{}\"...", query);
        true
    }

    /// Open the scanner: `Idle -> Scanning`.
    pub fn open_scanner(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Scanning;
        true
    }

    /// Abandon the scanner without capturing: `Scanning -> Idle`.
    pub fn cancel_scan(&mut self) {
        if self.phase == Phase::Scanning {
            self.phase = Phase::Idle;
        }
    }

    /// A frame was captured: `Scanning -> Searching`, identification step.
    pub fn begin_scan_lookup(&mut self) -> bool {
        if self.phase != Phase::Scanning {
            return false;
        }
        self.phase = Phase::Searching;
        self.status = "Identifying product...".to_string();
        true
    }

    /// Identification finished; the pricing step is starting. The two
    /// steps of the scan flow stay observable through distinct status text.
    pub fn product_identified(&mut self, name: &str) {
        if self.phase == Phase::Searching {
            self.status = format!("Finding prices for {}...", name);
        }
    }

    /// The lookup sequence succeeded: `Searching -> Results`.
    ///
    /// An empty price list is still a valid result, never an error.
    pub fn complete(&mut self, summary: ProductSummary) {
        if self.phase != Phase::Searching {
            return;
        }
        self.summary = Some(summary);
        self.phase = Phase::Results;
    }

    /// A lookup step failed: `Searching -> Error`.
    pub fn fail(&mut self, origin: FailureOrigin) {
        if self.phase != Phase::Searching {
            return;
        }
        self.error = Some(origin.message().to_string());
        self.phase = Phase::Error;
    }

    /// Return to `Idle`, discarding the held summary, error, and status.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{normalize_identified_name, LookupError, ProductLookup};
    use crate::types::{rank_prices, PriceEntry, ProductSummary};
    use async_trait::async_trait;

    fn walmart_amazon_summary() -> ProductSummary {
        let mut summary = ProductSummary {
            name: "iPhone 15".to_string(),
            description: Some("Apple smartphone".to_string()),
            image: None,
            prices: vec![
                PriceEntry {
                    title: "iPhone 15 128GB".to_string(),
                    price: 799.0,
                    currency: Some("USD".to_string()),
                    source: "Amazon".to_string(),
                    url: "https://amazon.example.com/iphone-15".to_string(),
                    is_cheapest: false,
                },
                PriceEntry {
                    title: "iPhone 15".to_string(),
                    price: 749.0,
                    currency: Some("USD".to_string()),
                    source: "Walmart".to_string(),
                    url: "https://walmart.example.com/iphone-15".to_string(),
                    is_cheapest: false,
                },
            ],
        };
        rank_prices(&mut summary);
        summary
    }

    /// Test double for the two model-backed calls.
    struct MockLookup {
        identified: Option<String>,
        found: Option<ProductSummary>,
    }

    #[async_trait]
    impl ProductLookup for MockLookup {
        async fn identify(&self, _image_base64: &str) -> Result<String, LookupError> {
            self.identified
                .clone()
                .map(|raw| normalize_identified_name(&raw))
                .ok_or_else(|| LookupError::Upstream("connection refused".to_string()))
        }

        async fn search(&self, _query: &str) -> Result<ProductSummary, LookupError> {
            self.found
                .clone()
                .ok_or_else(|| LookupError::Upstream("connection refused".to_string()))
        }
    }

    /// Drive the text-search flow the way the UI does.
    async fn run_text_search(
        session: &mut SearchSession,
        lookup: &impl ProductLookup,
        query: &str,
    ) {
        if !session.submit_query(query) {
            return;
        }
        match lookup.search(query.trim()).await {
            Ok(summary) => session.complete(summary),
            Err(_) => session.fail(FailureOrigin::PriceLookup),
        }
    }

    /// Drive the two-step scan flow the way the UI does.
    async fn run_scan(
        session: &mut SearchSession,
        lookup: &impl ProductLookup,
        image_base64: &str,
    ) -> Option<String> {
        if !session.begin_scan_lookup() {
            return None;
        }
        let name = match lookup.identify(image_base64).await {
            Ok(name) => name,
            Err(_) => {
                session.fail(FailureOrigin::Identification);
                return None;
            }
        };
        session.product_identified(&name);
        match lookup.search(&name).await {
            Ok(summary) => session.complete(summary),
            Err(_) => session.fail(FailureOrigin::PriceLookup),
        }
        Some(name)
    }

    #[test]
    fn test_initial_phase_is_idle() {
        assert_eq!(SearchSession::new().phase(), Phase::Idle);
    }

    #[test]
    fn test_blank_query_is_rejected_silently() {
        let mut session = SearchSession::new();
        assert!(!session.submit_query(""));
        assert!(!session.submit_query("   \t  "));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_no_new_search_while_searching() {
        let mut session = SearchSession::new();
        assert!(session.submit_query("iPhone 15"));
        assert_eq!(session.phase(), Phase::Searching);

        assert!(!session.submit_query("another query"));
        assert!(!session.open_scanner());
        assert_eq!(session.status(), "Searching for \"iPhone 15\"...");
    }

    #[test]
    fn test_cancel_scan_returns_to_idle() {
        let mut session = SearchSession::new();
        assert!(session.open_scanner());
        assert_eq!(session.phase(), Phase::Scanning);
        session.cancel_scan();
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = SearchSession::new();
        session.submit_query("widget");
        session.complete(walmart_amazon_summary());
        assert_eq!(session.phase(), Phase::Results);

        session.reset();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.summary().is_none());
        assert!(session.error_message().is_none());
        assert_eq!(session.status(), "");
    }

    #[tokio::test]
    async fn test_text_search_success_reaches_results() {
        let lookup = MockLookup {
            identified: None,
            found: Some(walmart_amazon_summary()),
        };
        let mut session = SearchSession::new();

        run_text_search(&mut session, &lookup, "iPhone 15").await;

        assert_eq!(session.phase(), Phase::Results);
        let summary = session.summary().unwrap();
        assert_eq!(summary.prices[0].source, "Walmart");
        assert!(summary.prices[0].is_cheapest);
        assert_eq!(summary.prices[1].source, "Amazon");
        assert!(!summary.prices[1].is_cheapest);
    }

    #[tokio::test]
    async fn test_text_search_failure_reaches_error() {
        let lookup = MockLookup {
            identified: None,
            found: None,
        };
        let mut session = SearchSession::new();

        run_text_search(&mut session, &lookup, "iPhone 15").await;

        assert_eq!(session.phase(), Phase::Error);
        assert_eq!(
            session.error_message(),
            Some(FailureOrigin::PriceLookup.message())
        );
    }

    #[tokio::test]
    async fn test_empty_prices_is_results_not_error() {
        let lookup = MockLookup {
            identified: None,
            found: Some(ProductSummary {
                name: "Obscure Gadget".to_string(),
                description: None,
                image: None,
                prices: vec![],
            }),
        };
        let mut session = SearchSession::new();

        run_text_search(&mut session, &lookup, "obscure gadget").await;

        assert_eq!(session.phase(), Phase::Results);
        assert!(session.summary().unwrap().prices.is_empty());
    }

    #[tokio::test]
    async fn test_scan_flow_statuses_are_observable() {
        let lookup = MockLookup {
            identified: Some("Sony WH-1000XM5".to_string()),
            found: Some(walmart_amazon_summary()),
        };
        let mut session = SearchSession::new();
        session.open_scanner();

        assert!(session.begin_scan_lookup());
        assert_eq!(session.status(), "Identifying product...");

        let name = lookup.identify("aGVsbG8=").await.unwrap();
        session.product_identified(&name);
        assert_eq!(session.status(), "Finding prices for Sony WH-1000XM5...");

        session.complete(lookup.search(&name).await.unwrap());
        assert_eq!(session.phase(), Phase::Results);
    }

    #[tokio::test]
    async fn test_scan_identify_failure_message() {
        let lookup = MockLookup {
            identified: None,
            found: Some(walmart_amazon_summary()),
        };
        let mut session = SearchSession::new();
        session.open_scanner();

        run_scan(&mut session, &lookup, "aGVsbG8=").await;

        assert_eq!(session.phase(), Phase::Error);
        assert_eq!(
            session.error_message(),
            Some(FailureOrigin::Identification.message())
        );
    }

    #[tokio::test]
    async fn test_scan_price_failure_message_is_distinct() {
        let lookup = MockLookup {
            identified: Some("Sony WH-1000XM5".to_string()),
            found: None,
        };
        let mut session = SearchSession::new();
        session.open_scanner();

        run_scan(&mut session, &lookup, "aGVsbG8=").await;

        assert_eq!(session.phase(), Phase::Error);
        assert_eq!(
            session.error_message(),
            Some(FailureOrigin::PriceLookup.message())
        );
        assert_ne!(
            FailureOrigin::PriceLookup.message(),
            FailureOrigin::Identification.message()
        );
    }

    #[tokio::test]
    async fn test_empty_identification_uses_sentinel_and_proceeds() {
        let lookup = MockLookup {
            identified: Some("   ".to_string()),
            found: Some(walmart_amazon_summary()),
        };
        let mut session = SearchSession::new();
        session.open_scanner();

        let name = run_scan(&mut session, &lookup, "aGVsbG8=").await;

        assert_eq!(name.as_deref(), Some("Unknown Product"));
        assert_eq!(session.phase(), Phase::Results);
    }
}
