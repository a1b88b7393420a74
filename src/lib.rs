pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod signal_processing;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::{FilterConfig, FilterParams};
pub use error::{FilterError, Result};
pub use signal_processing::{Filter, MultimodeFilter};
pub use wav::{read_wav, save_wav};
