//! Taproot Search: the grep layer behind every lookup.
//!
//! [`GrepSearcher`] implements [`taproot_core::SearchProvider`] over
//! the real filesystem. Higher layers stay agnostic of walking and
//! decoding details and can be driven by any other provider in tests.

pub mod grep;


pub use grep::GrepSearcher;
