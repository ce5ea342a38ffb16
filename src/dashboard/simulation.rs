use super::types::JobResult;
use crate::config::DashboardConfig;
use rand::Rng;

const CONFIDENCE_FLOOR: f32 = 85.0;
const CONFIDENCE_SPAN: f32 = 15.0;
const VOLUME_CEILING: f32 = 20.0;

/// Fabricated analysis outcome: three independent draws.
pub fn draw_result<R: Rng + ?Sized>(rng: &mut R, config: &DashboardConfig) -> JobResult {
    JobResult {
        tumor_detected: rng.gen::<f64>() > config.detection_threshold,
        confidence: CONFIDENCE_FLOOR + rng.gen::<f32>() * CONFIDENCE_SPAN,
        volume: rng.gen::<f32>() * VOLUME_CEILING,
    }
}

pub fn draw_increment<R: Rng + ?Sized>(rng: &mut R, config: &DashboardConfig) -> f32 {
    rng.gen::<f32>() * config.max_increment
}

/// Seconds left assuming the mean step of `max_increment / 2` per tick.
pub fn estimate_remaining(progress: f32, config: &DashboardConfig) -> u32 {
    let mean_step = config.max_increment / 2.0;
    let ticks_left = ((100.0 - progress).max(0.0) / mean_step).ceil();
    let secs = ticks_left as f64 * config.tick_interval().as_secs_f64();
    secs.round() as u32
}
