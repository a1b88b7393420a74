use super::filter::Filter;
use super::math::decibels_to_amplitude;

/// Lowest level in dB; at or below this the amplifier is silent.
pub const MIN_DECIBELS: f32 = -60.0;

/// Top of the nominal level range in dB; higher levels still apply.
pub const MAX_DECIBELS: f32 = 20.0;

/// Width in dB of the linear fade into silence above `MIN_DECIBELS`.
const TAPER_DECIBELS: f32 = 6.0;

/// Gain stage with a level set in decibels
///
/// The last `TAPER_DECIBELS` above `MIN_DECIBELS` fade linearly to zero so
/// turning a level all the way down ends in true silence instead of a
/// -60 dB floor.
#[derive(Debug, Clone, Copy)]
pub struct Amplifier {
    db: f32,
    level: f32,
}

impl Amplifier {
    /// Unity gain
    pub fn new() -> Self {
        Self { db: 0.0, level: 1.0 }
    }

    /// Set the level in dB
    pub fn set_level(&mut self, db: f32) {
        if self.db == db {
            return;
        }
        self.db = db;
        self.level = Self::level_for(db);
    }

    fn level_for(db: f32) -> f32 {
        let taper_top = MIN_DECIBELS + TAPER_DECIBELS;
        if db <= MIN_DECIBELS {
            0.0
        } else if db <= taper_top {
            ((db - MIN_DECIBELS) / TAPER_DECIBELS) * decibels_to_amplitude(taper_top)
        } else {
            decibels_to_amplitude(db)
        }
    }

    pub fn db(&self) -> f32 {
        self.db
    }

    /// Current linear gain
    pub fn level(&self) -> f32 {
        self.level
    }
}

impl Default for Amplifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for Amplifier {
    #[inline]
    fn process(&mut self, sample: f32) -> f32 {
        self.level * sample
    }

    fn reset(&mut self) {}
}
