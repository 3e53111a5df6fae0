//! Numeric building blocks for column summaries.
//!
//! This crate provides:
//!
//! - **Running statistics**: Welford accumulator for count, extrema, mean and variance
//! - **Descriptive statistics**: two-pass closed form over a materialized dataset
//! - **Histogram generation**: equal-width bins with unit-area normalization
//! - **Normal density**: Gaussian probability density for distribution overlays
//!
//! # Modules
//!
//! - [`running`]: Constant-memory streaming aggregates, mergeable across chunks
//! - [`descriptive`]: Reference statistics computed from all values at once
//! - [`histogram`]: Histogram construction for visualizing data distributions
//! - [`normal`]: Normal distribution density and sampled curves
//!
//! # Examples
//!
//! ## Streaming statistics
//!
//! ```
//! use tabstat_stats::running::RunningStats;
//!
//! let mut stats = RunningStats::new();
//! for value in [1.0, 2.0, 3.0] {
//!     stats.push(value);
//! }
//! assert_eq!(stats.mean(), Some(2.0));
//! assert_eq!(stats.sample_std_dev(), Some(1.0));
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use tabstat_stats::histogram::Histogram;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let histogram = Histogram::new(values, 5);
//! assert_eq!(histogram.total(), 10);
//! ```

pub mod descriptive;
pub mod histogram;
pub mod normal;
pub mod running;
