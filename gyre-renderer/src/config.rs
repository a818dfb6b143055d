use gyre_math::Mat4;
use log::LevelFilter;
use serde::Deserialize;

use crate::{error::Error, js};

/// Runtime settings, read from JSON.
///
/// Every field is optional in the JSON document; missing fields take their
/// [`Default`] value. Unknown fields are rejected.
///
/// ```json
/// { "canvas": "#scene", "rotationAxis": "y", "rotationStep": 0.01, "logLevel": "debug" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RenderConfig {
    /// CSS selector of the target canvas.
    pub canvas: String,
    /// Background color, RGB in `[0.0, 1.0]`.
    pub clear_color: (f32, f32, f32),
    /// Radians added to the rotation angle on every update.
    pub rotation_step: f64,
    pub rotation_axis: RotationAxis,
    pub log_level: LevelFilter,
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::config_parse_failed(e.to_string()))
    }

    /// Reads the JSON text of the page's `#gyre-config` element, falling back
    /// to defaults when there is none.
    pub fn from_page() -> Result<Self, Error> {
        match js::config_json()? {
            Some(json) => Self::from_json(&json),
            None => Ok(Self::default()),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas: "canvas".to_string(),
            clear_color: (0.1, 0.1, 0.12),
            rotation_step: 0.0001,
            rotation_axis: RotationAxis::X,
            log_level: LevelFilter::Info,
        }
    }
}

/// Axis the model spins around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationAxis {
    #[default]
    X,
    Y,
    Z,
}

impl RotationAxis {
    /// Rotation of `theta` radians about this axis.
    pub fn rotation(self, theta: f64) -> Mat4 {
        match self {
            RotationAxis::X => Mat4::rotate_x(theta),
            RotationAxis::Y => Mat4::rotate_y(theta),
            RotationAxis::Z => Mat4::rotate_z(theta),
        }
    }
}
