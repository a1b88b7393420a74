#![allow(unused_imports)]

pub mod generate;

pub use generate::{all_configurations, butterworth, params, steady_gain_db};
