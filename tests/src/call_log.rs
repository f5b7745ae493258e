use crate::ProviderCall;

use std::sync::{Arc, Mutex};

/// A handle on the calls a [`MockProvider`](crate::MockProvider) received.
///
/// Stays valid after the provider has been moved into an advisor.
#[derive(Debug, Clone)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<ProviderCall>>>,
}

impl CallLog {
    pub(crate) fn new(calls: Arc<Mutex<Vec<ProviderCall>>>) -> Self {
        Self { calls }
    }

    /// Get the number of logged calls
    pub fn len(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.calls.lock().unwrap().is_empty()
    }

    /// A copy of every logged call, in order
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Check if any call matches the given predicate
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&ProviderCall) -> bool,
    {
        self.calls.lock().unwrap().iter().any(predicate)
    }

    /// Count calls matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&ProviderCall) -> bool,
    {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| predicate(call))
            .count()
    }

    /// `(table, filter)` of every `estimate_rows` call, in order
    pub fn estimates(&self) -> Vec<(String, Option<String>)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|call| match call {
                ProviderCall::EstimateRows { table, filter } => Some((table.clone(), filter.clone())),
                _ => None,
            })
            .collect()
    }

    /// Predicates that were sampled, in order
    pub fn sampled_predicates(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|call| match call {
                ProviderCall::SampleSelectivity { predicate, .. } => Some(predicate.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn has_list_columns(&self) -> bool {
        self.any(|call| matches!(call, ProviderCall::ListColumns { .. }))
    }

    /// Clear the log
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}
