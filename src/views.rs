// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local state for list and report views: fetched records, search term,
//! loading/error status, and the teardown scope that drops late results.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rust_decimal::Decimal;
use tracing::debug;

use crate::api::{ApiError, ApiResult, Envelope};
use crate::models::{Client, Quote};
use crate::services::ReportFilter;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Lifetime of a view. Results delivered after teardown are discarded.
#[derive(Debug)]
pub struct Scope {
    alive: Arc<AtomicBool>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            alive: Arc::clone(&self.alive),
        }
    }

    pub fn teardown(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[derive(Debug, Clone)]
pub struct ScopeHandle {
    alive: Arc<AtomicBool>,
}

impl ScopeHandle {
    pub fn is_active(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

/// Fields a search term is matched against.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Client {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.identity.as_str(),
            self.email.as_str(),
        ]
    }
}

impl Searchable for Quote {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.number.as_str(),
            self.client_name.as_str(),
            self.insurance_type.as_str(),
            self.asset_description.as_str(),
        ]
    }
}

/// Case-insensitive substring match over the record's search fields.
/// An empty term matches everything.
pub fn matches<T: Searchable>(record: &T, term: &str) -> bool {
    let term = term.to_lowercase();
    if term.is_empty() {
        return true;
    }
    record
        .search_fields()
        .iter()
        .any(|f| f.to_lowercase().contains(&term))
}

pub fn filter<'a, T: Searchable>(records: &'a [T], term: &str) -> Vec<&'a T> {
    records.iter().filter(|r| matches(*r, term)).collect()
}

#[derive(Debug)]
pub struct ListView<T> {
    label: &'static str,
    records: Vec<T>,
    search: String,
    status: ViewStatus,
    scope: ScopeHandle,
}

impl<T: Searchable> ListView<T> {
    /// `label` names the records in default error messages ("clients").
    pub fn new(scope: &Scope, label: &'static str) -> Self {
        Self {
            label,
            records: Vec::new(),
            search: String::new(),
            status: ViewStatus::Idle,
            scope: scope.handle(),
        }
    }

    pub fn begin_load(&mut self) {
        if self.scope.is_active() {
            self.status = ViewStatus::Loading;
        }
    }

    /// Applies one list response. Returns `false` when the view's scope was
    /// already torn down and the result was dropped.
    pub fn apply(&mut self, result: ApiResult<Envelope<Vec<T>>>) -> bool {
        if !self.scope.is_active() {
            debug!(view = self.label, "scope closed, dropping response");
            return false;
        }
        self.status = match result {
            Ok(Envelope::Success { data, .. }) => {
                self.records = data;
                ViewStatus::Loaded
            }
            Ok(Envelope::Failure { message, .. }) if message.is_empty() => {
                ViewStatus::Failed(format!("Error loading {}", self.label))
            }
            Ok(Envelope::Failure { message, .. }) => ViewStatus::Failed(message),
            Err(err @ ApiError::Decode(_)) => {
                ViewStatus::Failed(format!("Error loading {}: {}", self.label, err))
            }
            Err(err) => ViewStatus::Failed(format!("Error connecting to server: {}", err)),
        };
        true
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn filtered(&self) -> Vec<&T> {
        filter(&self.records, &self.search)
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == ViewStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ViewStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportTotals {
    pub count: usize,
    pub sum_insured: Decimal,
    pub net_premium: Decimal,
}

pub fn report_totals(quotes: &[Quote]) -> ReportTotals {
    quotes.iter().fold(
        ReportTotals {
            count: 0,
            sum_insured: Decimal::ZERO,
            net_premium: Decimal::ZERO,
        },
        |mut acc, q| {
            acc.count += 1;
            acc.sum_insured += q.sum_insured;
            acc.net_premium += q.net_premium;
            acc
        },
    )
}

/// Quote report: the loaded quotes plus the filter that produced them.
#[derive(Debug)]
pub struct ReportView {
    pub list: ListView<Quote>,
    filter: ReportFilter,
}

impl ReportView {
    pub fn new(scope: &Scope) -> Self {
        Self {
            list: ListView::new(scope, "report"),
            filter: ReportFilter::default(),
        }
    }

    pub fn filter(&self) -> &ReportFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: ReportFilter) {
        self.filter = filter;
    }

    pub fn clear_filters(&mut self) {
        self.filter = ReportFilter::default();
    }

    pub fn quotes(&self) -> &[Quote] {
        self.list.records()
    }

    pub fn totals(&self) -> ReportTotals {
        report_totals(self.list.records())
    }
}
