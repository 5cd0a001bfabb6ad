//! Pure computation over domain values. Nothing here performs I/O;
//! raw indexer records come in, typed derived figures come out.

pub mod series;
pub mod transactions;
pub mod valuation;
