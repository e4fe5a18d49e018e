// src/core/pace.rs
use std::{thread, time::Duration};

/// Politeness delays between page loads.
/// Routed through a trait so offline runs don't sleep.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Real sleeps.
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

/// Never sleeps.
pub struct NoPause;

impl Pacer for NoPause {
    fn pause(&mut self, _delay: Duration) {}
}
