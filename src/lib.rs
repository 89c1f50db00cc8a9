#![doc(test(attr(deny(warnings))))]

//! Finance Core derives the state of a personal-finance dashboard from one
//! JSON document: recurring-bill status buckets, marker and category usage
//! flags, budget spending and savings pots, plus a shell to work with them.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
