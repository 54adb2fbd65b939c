use crate::ImageSharpenError;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    TryFromPrimitive,
    IntoPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low = 0,
    Medium,
    High,
}

impl Intensity {
    pub fn name(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }

    pub fn kernel(&self) -> &'static Kernel {
        match self {
            Intensity::Low => &Kernel::LOW,
            Intensity::Medium => &Kernel::MEDIUM,
            Intensity::High => &Kernel::HIGH,
        }
    }

    pub fn all() -> &'static [Intensity] {
        &[Intensity::Low, Intensity::Medium, Intensity::High]
    }
}

// Not `#[default]`: num_enum would treat it as the `try_from` fallback.
impl Default for Intensity {
    fn default() -> Self {
        Intensity::Medium
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Intensity {
    type Err = ImageSharpenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Intensity::Low),
            "medium" => Ok(Intensity::Medium),
            "high" => Ok(Intensity::High),
            other => Err(ImageSharpenError::InvalidParameter(format!(
                "unknown intensity: {other}"
            ))),
        }
    }
}

/// A fixed 3x3 convolution matrix, indexed `[row][column]`.
///
/// Weights are used as-is: nothing divides by their sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    weights: [[f32; 3]; 3],
}

impl Kernel {
    pub const LOW: Kernel = Kernel {
        weights: [
            [0.0, -0.5, 0.0],
            [-0.5, 3.0, -0.5],
            [0.0, -0.5, 0.0],
        ],
    };

    pub const MEDIUM: Kernel = Kernel {
        weights: [
            [0.0, -1.0, 0.0],
            [-1.0, 5.0, -1.0],
            [0.0, -1.0, 0.0],
        ],
    };

    pub const HIGH: Kernel = Kernel {
        weights: [
            [-1.0, -1.0, -1.0],
            [-1.0, 9.0, -1.0],
            [-1.0, -1.0, -1.0],
        ],
    };

    pub fn weight(&self, ky: usize, kx: usize) -> f32 {
        self.weights[ky][kx]
    }

    pub fn sum(&self) -> f32 {
        self.weights.iter().flatten().sum()
    }
}
