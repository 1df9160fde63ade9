use std::time::Duration;

pub const PROGRESS_TICK: Duration = Duration::from_millis(45);
pub const PROGRESS_STEP: u32 = 2;
pub const LOADING_DURATION: Duration = Duration::from_millis(3000);
pub const FADE_DURATION: Duration = Duration::from_millis(1000);
pub const HERO_INTERVAL: Duration = Duration::from_millis(5500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingPhase {
    Loading,
    FadingOut,
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadingFrame {
    pub progress: u32,
    pub phase: LoadingPhase,
}

/// Splash screen position as a function of time since it appeared.
pub struct LoadingTimeline;

impl LoadingTimeline {
    pub fn at(elapsed: Duration) -> LoadingFrame {
        let ticks = elapsed.as_millis() / PROGRESS_TICK.as_millis();
        let progress = (ticks * u128::from(PROGRESS_STEP)).min(100) as u32;
        let phase = if elapsed < LOADING_DURATION {
            LoadingPhase::Loading
        } else if elapsed < LOADING_DURATION + FADE_DURATION {
            LoadingPhase::FadingOut
        } else {
            LoadingPhase::Complete
        };
        LoadingFrame { progress, phase }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn advance(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    /// Swaps the slide set (e.g. on a viewport change), keeping the position
    /// when it is still in range.
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        if self.index >= len {
            self.index = 0;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntroStage {
    #[default]
    Loading,
    Hero,
    Opened,
}

impl IntroStage {
    pub fn finish_loading(&mut self) -> bool {
        if *self != IntroStage::Loading {
            return false;
        }
        *self = IntroStage::Hero;
        true
    }

    pub fn open(&mut self) -> bool {
        if *self != IntroStage::Hero {
            return false;
        }
        *self = IntroStage::Opened;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn progress_climbs_in_steps_and_caps() {
        assert_eq!(LoadingTimeline::at(ms(0)).progress, 0);
        assert_eq!(LoadingTimeline::at(ms(44)).progress, 0);
        assert_eq!(LoadingTimeline::at(ms(45)).progress, 2);
        assert_eq!(LoadingTimeline::at(ms(900)).progress, 40);
        assert_eq!(LoadingTimeline::at(ms(2250)).progress, 100);
        assert_eq!(LoadingTimeline::at(ms(2999)).progress, 100);
    }

    #[test]
    fn phases_follow_the_splash_schedule() {
        assert_eq!(LoadingTimeline::at(ms(2999)).phase, LoadingPhase::Loading);
        assert_eq!(LoadingTimeline::at(ms(3000)).phase, LoadingPhase::FadingOut);
        assert_eq!(LoadingTimeline::at(ms(3999)).phase, LoadingPhase::FadingOut);
        assert_eq!(LoadingTimeline::at(ms(4000)).phase, LoadingPhase::Complete);
    }

    #[test]
    fn carousel_wraps_and_survives_resize() {
        let mut c = Carousel::new(3);
        assert_eq!(c.advance(), 1);
        assert_eq!(c.advance(), 2);
        assert_eq!(c.advance(), 0);

        c.advance();
        c.advance();
        c.resize(2);
        assert_eq!(c.index(), 0);

        let mut empty = Carousel::new(0);
        assert_eq!(empty.advance(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn stages_only_move_forward_in_order() {
        let mut stage = IntroStage::default();
        assert!(!stage.open());
        assert!(stage.finish_loading());
        assert!(!stage.finish_loading());
        assert!(stage.open());
        assert_eq!(stage, IntroStage::Opened);
        assert!(!stage.open());
    }
}
