mod measure;
mod noise;
mod signal;

pub use measure::{impulse_response, measure_gain_db, tail_peak};
pub use noise::{add_white_noise, generate_uniform_noise, generate_white_noise, signal_power};
pub use signal::{SignalKind, generate_impulse, generate_sine, generate_sweep};
