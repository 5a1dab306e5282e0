use serde::{Deserialize, Serialize};

use crate::components::shape::ShapeKind;

/// Smallest radius any gummy gets, whatever its weight.
pub const MIN_RADIUS: f32 = 6.0;
/// Radius reserved for highlighted (birthday) gummies: 1.5x the largest
/// radius a regular weight-4 gummy reaches.
pub const HIGHLIGHT_RADIUS: f32 = (5.0 + 4.0 * 3.0) * 1.5;

/// One event as the calendar adapter hands it to the engine.
///
/// ```json
/// { "color": "#ff8800", "weight": 2.5, "shape": "book", "isBirthday": false,
///   "title": "Reading group", "date": "2024-05-01" }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GummySpec {
    pub color: String,
    #[serde(default)]
    pub weight: f32,
    #[serde(default, deserialize_with = "lenient_shape")]
    pub shape: ShapeKind,
    /// Drawn larger with a highlight mark. Accepts the adapter's `isBirthday` too.
    #[serde(default, alias = "isBirthday")]
    pub highlighted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

fn lenient_shape<'de, D>(deserializer: D) -> Result<ShapeKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let tag: Option<String> = Option::deserialize(deserializer)?;
    Ok(tag.map(|t| ShapeKind::from_tag(&t)).unwrap_or_default())
}

impl GummySpec {
    pub fn new(color: impl Into<String>, weight: f32) -> Self {
        Self {
            color: color.into(),
            weight,
            ..Default::default()
        }
    }

    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = shape;
        self
    }

    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Parse the JSON array the web layer passes to `addGummies`.
    pub fn list_from_json(json: &str) -> Result<Vec<GummySpec>, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Weight with negatives and non-finite values clamped to zero.
    pub fn clamped_weight(&self) -> f32 {
        clamp_weight(self.weight)
    }

    /// Physics radius for this gummy.
    pub fn radius(&self) -> f32 {
        if self.highlighted {
            HIGHLIGHT_RADIUS
        } else {
            radius_for_weight(self.weight)
        }
    }

    /// Impulse weighting mass.
    pub fn mass(&self) -> f32 {
        mass_for_weight(self.weight)
    }
}

pub fn clamp_weight(weight: f32) -> f32 {
    if weight.is_finite() {
        weight.max(0.0)
    } else {
        0.0
    }
}

/// `max(6, 5 + 3w)`, monotone non-decreasing in `w`.
pub fn radius_for_weight(weight: f32) -> f32 {
    (5.0 + clamp_weight(weight) * 3.0).max(MIN_RADIUS)
}

/// `max(1, w)`.
pub fn mass_for_weight(weight: f32) -> f32 {
    clamp_weight(weight).max(1.0)
}
