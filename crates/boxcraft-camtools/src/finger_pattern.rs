//! Finger Pattern Engine
//!
//! Splits a panel edge into alternating tab (male) and gap (female) segments.
//! Three profiles are available:
//!
//! - **Uniform**: equal-width segments, tab count derived from a target
//!   finger width.
//! - **Ratio**: male and female segments with a fixed width ratio.
//! - **Calibrated**: per-segment weights reproducing the hand-tuned reference
//!   box, normalised to the requested length.
//!
//! Every builder clamps its counts and forces an odd segment count, so a
//! pattern that starts with a tab also ends with one and the outer corners
//! of a panel are always supported.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Lower bound on the uniform tab count.
pub const MIN_TAB_COUNT: u32 = 2;
/// Lower bound on the segment count of weighted profiles.
pub const MIN_SEGMENT_COUNT: u32 = 3;
/// Upper bound on every count; keeps point arrays bounded.
pub const MAX_COUNT: u32 = 999;
/// Floor for weight and ratio denominators.
pub const MIN_DENOMINATOR: f64 = 1e-6;

/// Interior segment weight shared by the calibrated profiles.
pub const INTERIOR_WEIGHT: f64 = 1.0;
/// First/last male weight on bottom joints.
pub const BOTTOM_EDGE_MALE_WEIGHT: f64 = 21.0 / 15.0;
/// First/last female weight on bottom joints.
pub const BOTTOM_EDGE_FEMALE_WEIGHT: f64 = 30.0 / 15.0;
/// First/last male weight on vertical side joints.
pub const SIDE_VERTICAL_MALE_WEIGHT: f64 = 3.54 / 4.29;
/// First/last female weight on vertical side joints.
pub const SIDE_VERTICAL_FEMALE_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Tab,
    Gap,
}

impl SegmentKind {
    pub fn inverted(self) -> Self {
        match self {
            SegmentKind::Tab => SegmentKind::Gap,
            SegmentKind::Gap => SegmentKind::Tab,
        }
    }

    pub fn is_tab(self) -> bool {
        self == SegmentKind::Tab
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub width: f64,
}

/// How segment widths along a jointed edge are distributed
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JointProfile {
    /// Equal-width segments
    Uniform,
    /// Female segments are `female_ratio` times as wide as male ones
    Ratio { female_ratio: f64 },
    /// Reference-template weights (see the calibration constants)
    #[default]
    Calibrated,
}

/// Which calibrated weight table an edge uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointRole {
    /// Wall-to-bottom joints
    #[default]
    BottomEdge,
    /// Vertical wall-to-wall joints
    SideVertical,
}

/// Everything needed to build one edge pattern
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FingerPatternOptions {
    /// Edge length (mm)
    pub length: f64,
    /// Target finger width (mm)
    pub finger_width: f64,
    /// Start with a gap instead of a tab
    pub invert: bool,
    pub profile: JointProfile,
    pub role: JointRole,
    /// Manual segment count; clamped and forced odd
    pub segment_count: Option<u32>,
}

impl FingerPatternOptions {
    pub fn new(length: f64, finger_width: f64) -> Self {
        Self {
            length,
            finger_width,
            invert: false,
            profile: JointProfile::default(),
            role: JointRole::default(),
            segment_count: None,
        }
    }
}

/// Ordered tab/gap segments along one edge
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FingerPattern {
    segments: Vec<Segment>,
}

impl FingerPattern {
    /// Build an alternating pattern from explicit widths.
    pub fn from_widths(widths: &[f64], start_with_tab: bool) -> Self {
        let segments = widths
            .iter()
            .enumerate()
            .map(|(i, &width)| Segment {
                kind: if (i % 2 == 0) == start_with_tab {
                    SegmentKind::Tab
                } else {
                    SegmentKind::Gap
                },
                width,
            })
            .collect();
        Self { segments }
    }

    /// Build the pattern described by `options`.
    pub fn from_options(options: &FingerPatternOptions) -> Self {
        let start_with_male = !options.invert;
        match options.profile {
            JointProfile::Uniform => match options.segment_count {
                Some(count) => {
                    let count = clamp_segment_count(count);
                    let width = options.length / count as f64;
                    Self::from_widths(&vec![width; count as usize], start_with_male)
                }
                None => compute_finger_pattern(options.length, options.finger_width, options.invert),
            },
            JointProfile::Ratio { female_ratio } => {
                let count =
                    joint_segment_count(options.length, options.finger_width, options.segment_count);
                finger_joints_ratio(options.length, count, female_ratio, start_with_male)
            }
            JointProfile::Calibrated => {
                let count =
                    joint_segment_count(options.length, options.finger_width, options.segment_count);
                match options.role {
                    JointRole::BottomEdge => {
                        template_bottom_joint_pattern(options.length, count, start_with_male)
                    }
                    JointRole::SideVertical => {
                        template_side_vertical_pattern(options.length, count, start_with_male)
                    }
                }
            }
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when segment `i` is a tab. Out-of-range indices are not tabs.
    pub fn is_tab(&self, i: usize) -> bool {
        self.segments.get(i).is_some_and(|s| s.kind.is_tab())
    }

    pub fn tab_count(&self) -> usize {
        self.segments.iter().filter(|s| s.kind.is_tab()).count()
    }

    pub fn widths(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.width).collect()
    }

    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(|s| s.width).sum()
    }

    pub fn starts_with_tab(&self) -> bool {
        self.is_tab(0)
    }

    /// Both ends are tabs, so the edge never ends mid-gap.
    pub fn has_supported_corners(&self) -> bool {
        !self.segments.is_empty() && self.is_tab(0) && self.is_tab(self.segments.len() - 1)
    }

    /// Same widths with tab and gap swapped; the mating edge of `self`.
    pub fn complementary(&self) -> Self {
        Self {
            segments: self
                .segments
                .iter()
                .map(|s| Segment {
                    kind: s.kind.inverted(),
                    width: s.width,
                })
                .collect(),
        }
    }

    /// Segments in reverse order, for walking the edge the other way.
    pub fn reversed(&self) -> Self {
        Self {
            segments: self.segments.iter().rev().copied().collect(),
        }
    }
}

fn rounded_count(length: f64, finger_width: f64) -> f64 {
    let raw = length / finger_width;
    if raw.is_nan() {
        0.0
    } else if raw.is_infinite() {
        f64::from(MAX_COUNT)
    } else {
        raw.round()
    }
}

fn force_odd(count: u32) -> u32 {
    if count % 2 == 0 {
        count + 1
    } else {
        count
    }
}

/// Clamp a segment count into `[3, 999]` and make it odd.
pub fn clamp_segment_count(count: u32) -> u32 {
    let clamped = count.clamp(MIN_SEGMENT_COUNT, MAX_COUNT);
    if clamped != count {
        debug!(requested = count, clamped, "segment count clamped");
    }
    force_odd(clamped)
}

/// Segment count for the weighted profiles. A manual count wins over the
/// width-derived one.
pub fn joint_segment_count(length: f64, finger_width: f64, manual: Option<u32>) -> u32 {
    match manual {
        Some(count) => clamp_segment_count(count),
        None => {
            let rounded = rounded_count(length, finger_width);
            if rounded >= f64::from(MAX_COUNT) {
                warn!(length, finger_width, "finger width too small, segment count saturated");
            }
            let count = rounded.clamp(f64::from(MIN_SEGMENT_COUNT), f64::from(MAX_COUNT)) as u32;
            force_odd(count)
        }
    }
}

/// Uniform box-joint pattern.
///
/// `tab_count = clamp(round(length / desired_finger_width), 2, 999)`, bumped
/// to odd, and `2 * tab_count - 1` equal segments. `is_tab(i)` is
/// `(i % 2 == 0) XOR invert`.
pub fn compute_finger_pattern(length: f64, desired_finger_width: f64, invert: bool) -> FingerPattern {
    let rounded = rounded_count(length, desired_finger_width);
    if rounded >= f64::from(MAX_COUNT) {
        warn!(
            length,
            desired_finger_width, "finger width too small, tab count saturated"
        );
    }
    let tab_count = force_odd(rounded.clamp(f64::from(MIN_TAB_COUNT), f64::from(MAX_COUNT)) as u32);
    let segment_count = 2 * tab_count - 1;
    let width = length / f64::from(segment_count);

    debug!(length, tab_count, segment_count, width, "uniform finger pattern");

    FingerPattern::from_widths(&vec![width; segment_count as usize], !invert)
}

/// Male/female pattern with `female_width = ratio * male_width`.
///
/// The widths always sum to `length`.
pub fn finger_joints_ratio(
    length: f64,
    segment_count: u32,
    ratio: f64,
    start_with_male: bool,
) -> FingerPattern {
    let count = clamp_segment_count(segment_count);
    let male_count = if start_with_male {
        count.div_ceil(2)
    } else {
        count / 2
    };
    let female_count = count - male_count;
    let ratio = if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    };

    let denominator = (f64::from(male_count) + ratio * f64::from(female_count)).max(MIN_DENOMINATOR);
    let male_width = length / denominator;
    let female_width = ratio * male_width;

    let widths: Vec<f64> = (0..count)
        .map(|i| {
            if (i % 2 == 0) == start_with_male {
                male_width
            } else {
                female_width
            }
        })
        .collect();

    FingerPattern::from_widths(&widths, start_with_male)
}

/// Weighted pattern: interior segments weigh 1.0, the outermost male and
/// female segments at each end get their own weights.
fn weighted_pattern(
    length: f64,
    segment_count: u32,
    start_with_male: bool,
    edge_male_weight: f64,
    edge_female_weight: f64,
) -> FingerPattern {
    let count = clamp_segment_count(segment_count) as usize;
    let (first_male, last_male, first_female, last_female) = if start_with_male {
        (0, count - 1, 1, count - 2)
    } else {
        (1, count - 2, 0, count - 1)
    };

    let weights: Vec<f64> = (0..count)
        .map(|i| {
            let is_male = (i % 2 == 0) == start_with_male;
            if is_male && (i == first_male || i == last_male) {
                edge_male_weight
            } else if !is_male && (i == first_female || i == last_female) {
                edge_female_weight
            } else {
                INTERIOR_WEIGHT
            }
        })
        .collect();

    let scale = length / weights.iter().sum::<f64>().max(MIN_DENOMINATOR);
    let widths: Vec<f64> = weights.iter().map(|w| w * scale).collect();

    FingerPattern::from_widths(&widths, start_with_male)
}

/// Calibrated pattern for wall-to-bottom joints.
pub fn template_bottom_joint_pattern(length: f64, segment_count: u32, start_with_male: bool) -> FingerPattern {
    weighted_pattern(
        length,
        segment_count,
        start_with_male,
        BOTTOM_EDGE_MALE_WEIGHT,
        BOTTOM_EDGE_FEMALE_WEIGHT,
    )
}

/// Calibrated pattern for vertical wall-to-wall joints.
pub fn template_side_vertical_pattern(length: f64, segment_count: u32, start_with_male: bool) -> FingerPattern {
    weighted_pattern(
        length,
        segment_count,
        start_with_male,
        SIDE_VERTICAL_MALE_WEIGHT,
        SIDE_VERTICAL_FEMALE_WEIGHT,
    )
}
