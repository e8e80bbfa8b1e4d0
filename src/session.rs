use crate::aggregator::aggregate;
use crate::catalog::CatalogSnapshot;
use crate::error::PathfinderError;
use crate::extraction::{ExtractionRequest, ExtractionResult, IngredientSource};
use crate::model::AggregateReport;
use log::{error, warn};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Requesting,
}

/// Result of one search. Failures never carry partial data.
#[derive(Debug)]
pub struct SearchOutcome {
    pub extracted: ExtractionResult,
    pub report: AggregateReport,
    pub error: Option<PathfinderError>,
}

impl SearchOutcome {
    fn failed(error: PathfinderError) -> Self {
        SearchOutcome {
            extracted: ExtractionResult::empty(),
            report: AggregateReport::default(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Drives one shopper's searches: at most one in flight at a time.
pub struct SearchSession<S> {
    source: S,
    catalog: CatalogSnapshot,
    busy: AtomicBool,
}

/// Resets the busy flag even if the search future is dropped midway
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: IngredientSource> SearchSession<S> {
    pub fn new(source: S, catalog: CatalogSnapshot) -> Self {
        SearchSession {
            source,
            catalog,
            busy: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> SearchState {
        if self.busy.load(Ordering::Acquire) {
            SearchState::Requesting
        } else {
            SearchState::Idle
        }
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    /// Extract, match and aggregate. Errors degrade to an empty outcome.
    ///
    /// A search started while another is in flight is rejected with a
    /// validation error and leaves the running one untouched.
    pub async fn search(&self, request: ExtractionRequest) -> SearchOutcome {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Search rejected: another search is in flight");
            return SearchOutcome::failed(PathfinderError::Validation(
                "A search is already in progress".to_string(),
            ));
        }
        let _guard = BusyGuard(&self.busy);

        match self.source.extract(request).await {
            Ok(extracted) => {
                let report = aggregate(&extracted, &self.catalog);
                SearchOutcome {
                    extracted,
                    report,
                    error: None,
                }
            }
            Err(e) => {
                error!("Error extracting ingredients: {}", e);
                SearchOutcome::failed(e)
            }
        }
    }
}
