//! Choosing which fact to serve

use super::models::FactRecord;
use rand::seq::SliceRandom;

/// Picks one record out of the loaded set
pub trait FactSelector: Send + Sync {
    /// `None` only when `records` is empty
    fn select<'a>(&self, records: &'a [FactRecord]) -> Option<&'a FactRecord>;
}

/// Uniform choice from the thread-local RNG; not reproducible
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl FactSelector for RandomSelector {
    fn select<'a>(&self, records: &'a [FactRecord]) -> Option<&'a FactRecord> {
        records.choose(&mut rand::thread_rng())
    }
}

/// Selection driven by a function from record count to index
///
/// The index wraps around, so any returned value is valid.
pub struct FnSelector<F>(F);

impl<F> FnSelector<F>
where
    F: Fn(usize) -> usize + Send + Sync,
{
    pub fn new(pick: F) -> Self {
        Self(pick)
    }
}

impl<F> FactSelector for FnSelector<F>
where
    F: Fn(usize) -> usize + Send + Sync,
{
    fn select<'a>(&self, records: &'a [FactRecord]) -> Option<&'a FactRecord> {
        if records.is_empty() {
            return None;
        }
        records.get((self.0)(records.len()) % records.len())
    }
}
