pub mod amplifier;
pub mod bank;
pub mod biquad;
pub mod cascade;
pub mod design;
pub mod equalizer;
pub mod filter;
pub mod math;
pub mod multimode;
pub mod poles;
pub mod warp;

pub use amplifier::Amplifier;
pub use bank::{BankOutput, FilterBank};
pub use biquad::Biquad;
pub use cascade::Cascade;
pub use design::{SectionPlan, SectionSpec};
pub use equalizer::Equalizer;
pub use filter::Filter;
pub use math::{amplitude_to_decibels, decibels_to_amplitude, rms};
pub use multimode::{MultimodeFilter, Recompute};
pub use poles::{Pole, PoleSet};
