use crate::errors::WheelError;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SPIN_DURATION_MS: u64 = 3000;

const DEFAULT_SEGMENT_IDS: [&str; 5] = ["prize1", "prize2", "prize3", "prize4", "default"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSegment {
    pub id: String,
    pub label: String,
    pub probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl WheelSegment {
    pub fn new(id: impl Into<String>, label: impl Into<String>, probability: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            probability,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SpinResult {
    pub segment: WheelSegment,
    pub is_winner: bool,
    pub prize: String,
    pub spin_duration_ms: u64,
}

pub fn default_segments() -> Vec<WheelSegment> {
    vec![
        WheelSegment::new("prize1", "Free Spin", 0.1).with_color("#FF6B6B"),
        WheelSegment::new("prize2", "Bonus Points", 0.2).with_color("#4ECDC4"),
        WheelSegment::new("prize3", "Try Again", 0.3).with_color("#45B7D1"),
        WheelSegment::new("prize4", "Small Prize", 0.4).with_color("#96CEB4"),
    ]
}

pub fn is_default_segment(id: &str) -> bool {
    DEFAULT_SEGMENT_IDS.contains(&id)
}

// draw in [0, 1); rounding past the last boundary lands on the final segment
pub fn select_index(segments: &[WheelSegment], draw: f64) -> Option<usize> {
    if segments.is_empty() {
        return None;
    }

    let mut cumulative = 0.0;
    for (index, segment) in segments.iter().enumerate() {
        cumulative += segment.probability;
        if draw <= cumulative {
            return Some(index);
        }
    }

    Some(segments.len() - 1)
}

#[derive(Debug, Clone)]
pub struct WheelEngine {
    segments: Vec<WheelSegment>,
    spin_duration_ms: u64,
}

impl Default for WheelEngine {
    fn default() -> Self {
        Self::new(default_segments(), DEFAULT_SPIN_DURATION_MS)
    }
}

impl WheelEngine {
    pub fn new(segments: Vec<WheelSegment>, spin_duration_ms: u64) -> Self {
        let spin_duration_ms = if spin_duration_ms == 0 {
            DEFAULT_SPIN_DURATION_MS
        } else {
            spin_duration_ms
        };
        Self {
            segments,
            spin_duration_ms,
        }
    }

    pub fn segments(&self) -> &[WheelSegment] {
        &self.segments
    }

    pub fn spin_duration_ms(&self) -> u64 {
        self.spin_duration_ms
    }

    pub fn update_config(&mut self, segments: Option<Vec<WheelSegment>>, spin_duration_ms: Option<u64>) {
        if let Some(segments) = segments {
            self.segments = segments;
        }
        if let Some(duration) = spin_duration_ms.filter(|duration| *duration > 0) {
            self.spin_duration_ms = duration;
        }
    }

    pub fn spin<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SpinResult, WheelError> {
        let draw = rng.gen_range(0.0..1.0);
        self.spin_with_draw(draw)
    }

    pub fn spin_with_draw(&self, draw: f64) -> Result<SpinResult, WheelError> {
        let index = select_index(&self.segments, draw).ok_or(WheelError::NoSegments)?;
        let segment = self.segments[index].clone();
        Ok(SpinResult {
            is_winner: segment.id == "prize1" || segment.id == "prize2",
            prize: segment.label.clone(),
            spin_duration_ms: self.spin_duration_ms,
            segment,
        })
    }
}
