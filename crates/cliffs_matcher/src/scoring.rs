//! Match scores.
//!
//! Each consumed token adds to the score of the attempt that consumed it.
//! When several candidates (or variant alternatives) match, the highest
//! score wins, so literal matches outweigh free-form parameters and
//! parameters outweigh tails. Optional and variant groups add nothing of
//! their own.

/// Score for a matched literal.
pub const LITERAL_WEIGHT: f64 = 1.0;

/// Score for a bound parameter.
pub const PARAMETER_WEIGHT: f64 = 0.5;

/// Score for a captured tail.
pub const TAIL_WEIGHT: f64 = 0.25;
