//! Deterministic noisy speed generator.
//!
//! Stands in for the traffic model when driving displays in demos and tests:
//! samples jitter around a base speed, and the base speed can wander to model
//! congestion building up and clearing. Seeded `ChaCha8Rng` keeps every run
//! reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::MAX_SYNTHETIC_SPEED;
use crate::feed::FeedEvent;

#[derive(Debug, Clone)]
pub struct SyntheticSpeedFeed {
    rng: ChaCha8Rng,
    base_speed: f32,
    jitter: f32,
}

impl SyntheticSpeedFeed {
    pub fn new(seed: u64, base_speed: f32, jitter: f32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            base_speed: base_speed.clamp(0.0, MAX_SYNTHETIC_SPEED),
            jitter: jitter.abs(),
        }
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn set_base_speed(&mut self, speed: f32) {
        self.base_speed = speed.clamp(0.0, MAX_SYNTHETIC_SPEED);
    }

    /// Random-walk the base speed by at most `max_step`.
    pub fn wander(&mut self, max_step: f32) {
        let step = max_step.abs();
        let delta = self.rng.gen_range(-step..=step);
        self.set_base_speed(self.base_speed + delta);
    }

    /// Next speed sample, within `jitter` of the base speed and never
    /// outside `0..=MAX_SYNTHETIC_SPEED`.
    pub fn next_sample(&mut self) -> f32 {
        let offset = self.rng.gen_range(-self.jitter..=self.jitter);
        (self.base_speed + offset).clamp(0.0, MAX_SYNTHETIC_SPEED)
    }

    /// A speed event for `cctv_id` with independent samples per direction.
    pub fn speed_event(&mut self, cctv_id: u32) -> FeedEvent {
        FeedEvent::Speed {
            cctv_id,
            speed_ne: self.next_sample(),
            speed_sw: self.next_sample(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_samples() {
        let mut a = SyntheticSpeedFeed::new(7, 45.0, 10.0);
        let mut b = SyntheticSpeedFeed::new(7, 45.0, 10.0);
        let vals_a: Vec<f32> = (0..20).map(|_| a.next_sample()).collect();
        let vals_b: Vec<f32> = (0..20).map(|_| b.next_sample()).collect();
        assert_eq!(vals_a, vals_b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = SyntheticSpeedFeed::new(1, 45.0, 10.0);
        let mut b = SyntheticSpeedFeed::new(2, 45.0, 10.0);
        let vals_a: Vec<f32> = (0..20).map(|_| a.next_sample()).collect();
        let vals_b: Vec<f32> = (0..20).map(|_| b.next_sample()).collect();
        assert_ne!(vals_a, vals_b);
    }

    #[test]
    fn test_samples_stay_within_jitter_and_bounds() {
        let mut feed = SyntheticSpeedFeed::new(99, 5.0, 10.0);
        for _ in 0..1000 {
            let sample = feed.next_sample();
            assert!((0.0..=15.0).contains(&sample), "got {sample}");
        }
    }

    #[test]
    fn test_zero_jitter_is_steady() {
        let mut feed = SyntheticSpeedFeed::new(3, 52.5, 0.0);
        assert!((0..10).all(|_| feed.next_sample() == 52.5));
    }

    #[test]
    fn test_wander_stays_clamped() {
        let mut feed = SyntheticSpeedFeed::new(11, 1.0, 0.0);
        for _ in 0..500 {
            feed.wander(20.0);
            assert!((0.0..=MAX_SYNTHETIC_SPEED).contains(&feed.base_speed()));
        }
    }

    #[test]
    fn test_speed_event_targets_camera() {
        let mut feed = SyntheticSpeedFeed::new(5, 30.0, 2.0);
        match feed.speed_event(12) {
            FeedEvent::Speed {
                cctv_id,
                speed_ne,
                speed_sw,
            } => {
                assert_eq!(cctv_id, 12);
                assert!((28.0..=32.0).contains(&speed_ne));
                assert!((28.0..=32.0).contains(&speed_sw));
            }
            other => panic!("expected Speed, got {other:?}"),
        }
    }
}
