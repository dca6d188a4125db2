//! Income-statement and balance-sheet subtotal derivation.
//!
//! Stored records carry only raw ledger fields; every subtotal is derived
//! on demand. Income-statement subtotals form a strict dependency chain
//! from gross profit down to profit after tax, where an unknown upstream
//! value propagates as `None`, never as zero. Balance-sheet totals are
//! unconditional sums with absent constituents counted as zero.

pub mod balance;
pub mod income;
