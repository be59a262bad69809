//! Volume level with a mute switch that preserves the level.

/// Stored volume in `[0.0, 1.0]` plus a mute flag.
///
/// Muting never touches `level`, so unmuting restores it exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    level: f32,
    muted: bool,
}

impl Volume {
    pub fn new(level: f32, muted: bool) -> Self {
        let mut v = Self { level: 0.5, muted };
        v.set_level(level);
        v
    }

    /// Set the level, clamped to `[0.0, 1.0]`. NaN is ignored.
    pub fn set_level(&mut self, level: f32) {
        if level.is_nan() {
            return;
        }
        self.level = level.clamp(0.0, 1.0);
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Gain actually sent to the output: zero while muted.
    pub fn effective(&self) -> f32 {
        if self.muted { 0.0 } else { self.level }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.5, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_level_clamps_to_unit_range() {
        let mut v = Volume::default();
        v.set_level(1.5);
        assert_eq!(v.level(), 1.0);
        v.set_level(-0.2);
        assert_eq!(v.level(), 0.0);
        v.set_level(0.3);
        v.set_level(f32::NAN);
        assert_eq!(v.level(), 0.3);
    }

    #[test]
    fn mute_preserves_level() {
        let mut v = Volume::new(0.7, false);
        v.set_muted(true);
        assert_eq!(v.effective(), 0.0);
        assert_eq!(v.level(), 0.7);
        v.set_muted(false);
        assert_eq!(v.effective(), 0.7);
    }
}
