//! Playhead position and in/out points.

use serde::{Deserialize, Serialize};

/// The playhead and the optional in/out range.
///
/// All times are seconds. Transport (play/pause) is owned by the host player;
/// the editing engine only moves the cursor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Current playhead position in seconds.
    pub current_time: f64,
    /// Optional in-point.
    pub in_point: Option<f64>,
    /// Optional out-point.
    pub out_point: Option<f64>,
}

impl PlaybackState {
    /// Create a playhead at time 0 with no in/out range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the playhead, clamped to `[0, total_duration]`. Returns the applied time.
    pub fn seek(&mut self, time: f64, total_duration: f64) -> f64 {
        self.current_time = time.clamp(0.0, total_duration.max(0.0));
        tracing::debug!(time = self.current_time, "Seeked");
        self.current_time
    }

    /// Step the playhead by whole frames, clamped like [`seek`](Self::seek).
    pub fn step_frames(&mut self, frames: i32, frame_rate: f64, total_duration: f64) -> f64 {
        let target = self.current_time + f64::from(frames) / frame_rate;
        self.seek(target, total_duration)
    }

    /// Set the in-point at the playhead. An out-point before it is cleared.
    pub fn set_in_point(&mut self) {
        let time = self.current_time;
        self.in_point = Some(time);
        if self.out_point.is_some_and(|out| out < time) {
            self.out_point = None;
        }
        tracing::debug!(in_point = time, "In-point set");
    }

    /// Set the out-point at the playhead. An in-point after it is cleared.
    pub fn set_out_point(&mut self) {
        let time = self.current_time;
        self.out_point = Some(time);
        if self.in_point.is_some_and(|inp| inp > time) {
            self.in_point = None;
        }
        tracing::debug!(out_point = time, "Out-point set");
    }

    /// Clear both in-point and out-point.
    pub fn clear_in_out(&mut self) {
        self.in_point = None;
        self.out_point = None;
        tracing::debug!("In/out points cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_clamps_to_range() {
        let mut pb = PlaybackState::new();
        assert_eq!(pb.seek(5.0, 10.0), 5.0);
        assert_eq!(pb.seek(-1.0, 10.0), 0.0);
        assert_eq!(pb.seek(20.0, 10.0), 10.0);
        assert_eq!(pb.seek(3.0, 0.0), 0.0);
    }

    #[test]
    fn step_frames_uses_frame_rate() {
        let mut pb = PlaybackState::new();
        pb.seek(1.0, 10.0);
        let t = pb.step_frames(3, 30.0, 10.0);
        assert!((t - 1.1).abs() < 1e-9);
        let t = pb.step_frames(-60, 30.0, 10.0);
        assert_eq!(t, 0.0);
    }

    #[test]
    fn in_out_points_stay_ordered() {
        let mut pb = PlaybackState::new();
        pb.seek(4.0, 10.0);
        pb.set_out_point();
        pb.seek(6.0, 10.0);
        pb.set_in_point();
        assert_eq!(pb.in_point, Some(6.0));
        assert_eq!(pb.out_point, None);

        pb.seek(8.0, 10.0);
        pb.set_out_point();
        assert_eq!((pb.in_point, pb.out_point), (Some(6.0), Some(8.0)));

        pb.clear_in_out();
        assert!(pb.in_point.is_none() && pb.out_point.is_none());
    }
}
