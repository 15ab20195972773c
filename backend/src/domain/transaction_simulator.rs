//! Simulated mobile-money transaction.
//!
//! Stands in for a payment processor: every attempt takes a fixed
//! [`SIMULATED_LATENCY`] and succeeds with probability [`SUCCESS_RATE`]. The
//! random draw comes from an injected [`RandomSource`] so callers can force
//! either outcome.

use rand::Rng;
#[cfg(test)]
use std::collections::VecDeque;
use std::sync::Arc;
#[cfg(test)]
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

pub const SIMULATED_LATENCY: Duration = Duration::from_millis(2000);
pub const SUCCESS_RATE: f64 = 0.9;

/// Source of uniformly distributed values in `[0, 1)`
pub trait RandomSource: Send + Sync {
    fn next_f64(&self) -> f64;
}

/// Unseeded randomness from the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn next_f64(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Always returns the same value
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedRandomSource(pub f64);

#[cfg(test)]
impl RandomSource for FixedRandomSource {
    fn next_f64(&self) -> f64 {
        self.0
    }
}

/// Replays a script of values, repeating the last one once exhausted
#[cfg(test)]
#[derive(Debug)]
pub struct ScriptedRandomSource {
    values: Mutex<VecDeque<f64>>,
    last: Mutex<f64>,
}

#[cfg(test)]
impl ScriptedRandomSource {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
            last: Mutex::new(0.0),
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandomSource {
    fn next_f64(&self) -> f64 {
        let next = self.values.lock().ok().and_then(|mut values| values.pop_front());
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(value) = next {
            *last = value;
        }
        *last
    }
}

#[derive(Clone)]
pub struct TransactionSimulator {
    random: Arc<dyn RandomSource>,
}

impl TransactionSimulator {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Simulator backed by unseeded thread-local randomness
    pub fn unseeded() -> Self {
        Self::new(Arc::new(ThreadRngSource))
    }

    /// Simulator whose every attempt succeeds
    #[cfg(test)]
    pub fn always_succeeding() -> Self {
        Self::new(Arc::new(FixedRandomSource(0.0)))
    }

    /// Simulator whose every attempt fails
    #[cfg(test)]
    pub fn always_failing() -> Self {
        Self::new(Arc::new(FixedRandomSource(0.99)))
    }

    /// Wait out the simulated network latency, then report the outcome.
    /// Never errors; resolves to `true` on success.
    pub async fn attempt(&self) -> bool {
        tokio::time::sleep(SIMULATED_LATENCY).await;
        let roll = self.random.next_f64();
        let success = roll < SUCCESS_RATE;
        debug!("Simulated transaction settled (roll {:.3}, success: {})", roll, success);
        success
    }
}

impl Default for TransactionSimulator {
    fn default() -> Self {
        Self::unseeded()
    }
}
