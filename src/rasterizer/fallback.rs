//! Ordered resource acquisition with graceful degradation
//!
//! A `FallbackChain` tries each attempt in turn and returns the first
//! success. When every attempt fails the caller gets `None` and carries on
//! without the resource.

use log::{debug, warn};

use super::canvas::DrawError;

type Attempt<'a, C, T> = Box<dyn Fn(&mut C) -> Result<T, DrawError> + 'a>;

/// Ordered list of ways to obtain a `T` from a context `C`
pub struct FallbackChain<'a, C: ?Sized, T> {
    resource: &'static str,
    attempts: Vec<(&'static str, Attempt<'a, C, T>)>,
}

impl<'a, C: ?Sized, T> FallbackChain<'a, C, T> {
    /// Start an empty chain for `resource` (used in log messages)
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            attempts: Vec::new(),
        }
    }

    /// Append an attempt
    pub fn then<F>(mut self, label: &'static str, attempt: F) -> Self
    where
        F: Fn(&mut C) -> Result<T, DrawError> + 'a,
    {
        self.attempts.push((label, Box::new(attempt)));
        self
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Run attempts in order until one succeeds
    pub fn acquire(&self, ctx: &mut C) -> Option<T> {
        for (label, attempt) in &self.attempts {
            match attempt(ctx) {
                Ok(value) => return Some(value),
                Err(e) => debug!("{}: {} attempt failed: {}", self.resource, label, e),
            }
        }
        warn!("{}: all {} attempts failed, skipping", self.resource, self.attempts.len());
        None
    }
}
