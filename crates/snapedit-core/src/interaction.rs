//! Multi-step pointer and typed input collection.
//!
//! Crop and circle parameters are gathered across several events (clicks
//! on the image, text typed into entry fields) before a single commit turns
//! them into an edit. Pending input may be partial or invalid at any time;
//! it only has to be complete and numeric when a commit is requested.
//!
//! # Routing
//!
//! Pointer clicks go to exactly one [`ActiveTarget`], set when an
//! interaction starts. Crop and circle input are tracked independently, so
//! one can stay pending while the other is active.
//!
//! # Crop sequence
//!
//! ```text
//! Idle -> AwaitingFirstCorner -> AwaitingSecondCorner -> CornersSet -> (commit) -> Idle
//! ```
//!
//! Clicks after both corners are set replace the second corner.

use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::transform::CropRect;

/// Which pending interaction receives pointer clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActiveTarget {
    #[default]
    None,
    Crop,
    Circle,
}

impl std::fmt::Display for ActiveTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActiveTarget::None => "none",
            ActiveTarget::Crop => "crop",
            ActiveTarget::Circle => "circle",
        };
        f.write_str(name)
    }
}

/// Contents of a single numeric entry field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldEntry {
    /// Nothing entered.
    #[default]
    Empty,
    /// A valid integer.
    Value(i64),
    /// Text that does not parse as an integer.
    Invalid(String),
}

impl FieldEntry {
    /// Interpret typed text. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return FieldEntry::Empty;
        }
        match trimmed.parse::<i64>() {
            Ok(v) => FieldEntry::Value(v),
            Err(_) => FieldEntry::Invalid(text.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldEntry::Empty)
    }

    /// Text to show in the entry field.
    pub fn text(&self) -> String {
        match self {
            FieldEntry::Empty => String::new(),
            FieldEntry::Value(v) => v.to_string(),
            FieldEntry::Invalid(s) => s.clone(),
        }
    }

    fn require(&self, name: &str) -> Result<i64, EditError> {
        match self {
            FieldEntry::Value(v) => Ok(*v),
            FieldEntry::Empty => Err(EditError::InvalidRange(format!("{name} is missing"))),
            FieldEntry::Invalid(s) => Err(EditError::InvalidRange(format!(
                "{name} must be an integer, got {s:?}"
            ))),
        }
    }
}

/// Entry fields of a pending crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropField {
    X1,
    Y1,
    X2,
    Y2,
}

/// Entry fields of a pending circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircleField {
    X,
    Y,
    Radius,
}

/// Progress of a crop sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropPhase {
    Idle,
    AwaitingFirstCorner,
    AwaitingSecondCorner,
    CornersSet,
}

/// Two corners collected for a crop, in image space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingCrop {
    pub x1: FieldEntry,
    pub y1: FieldEntry,
    pub x2: FieldEntry,
    pub y2: FieldEntry,
}

impl PendingCrop {
    pub fn field(&self, field: CropField) -> &FieldEntry {
        match field {
            CropField::X1 => &self.x1,
            CropField::Y1 => &self.y1,
            CropField::X2 => &self.x2,
            CropField::Y2 => &self.y2,
        }
    }

    fn field_mut(&mut self, field: CropField) -> &mut FieldEntry {
        match field {
            CropField::X1 => &mut self.x1,
            CropField::Y1 => &mut self.y1,
            CropField::X2 => &mut self.x2,
            CropField::Y2 => &mut self.y2,
        }
    }

    fn phase(&self) -> CropPhase {
        if self.x1.is_empty() || self.y1.is_empty() {
            CropPhase::AwaitingFirstCorner
        } else if self.x2.is_empty() || self.y2.is_empty() {
            CropPhase::AwaitingSecondCorner
        } else {
            CropPhase::CornersSet
        }
    }

    /// A click fills the first corner while its x field is blank, and the
    /// second corner otherwise.
    fn record_click(&mut self, x: i64, y: i64) -> CropPhase {
        if self.x1.is_empty() {
            self.x1 = FieldEntry::Value(x);
            self.y1 = FieldEntry::Value(y);
        } else {
            self.x2 = FieldEntry::Value(x);
            self.y2 = FieldEntry::Value(y);
        }
        self.phase()
    }

    /// Validate and normalize the corners.
    pub fn to_rect(&self) -> Result<CropRect, EditError> {
        let x1 = self.x1.require("x1")?;
        let y1 = self.y1.require("y1")?;
        let x2 = self.x2.require("x2")?;
        let y2 = self.y2.require("y2")?;
        Ok(CropRect::new(x1, y1, x2, y2))
    }
}

/// Center and radius collected for a circle, in image space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingCircle {
    pub x: FieldEntry,
    pub y: FieldEntry,
    pub radius: FieldEntry,
}

impl PendingCircle {
    pub fn field(&self, field: CircleField) -> &FieldEntry {
        match field {
            CircleField::X => &self.x,
            CircleField::Y => &self.y,
            CircleField::Radius => &self.radius,
        }
    }

    fn field_mut(&mut self, field: CircleField) -> &mut FieldEntry {
        match field {
            CircleField::X => &mut self.x,
            CircleField::Y => &mut self.y,
            CircleField::Radius => &mut self.radius,
        }
    }

    /// Validate the parameters.
    pub fn to_params(&self) -> Result<CircleParams, EditError> {
        let x = self.x.require("x")?;
        let y = self.y.require("y")?;
        let radius = self.radius.require("radius")?;
        if radius < 0 {
            return Err(EditError::InvalidRange(format!(
                "radius must be non-negative, got {radius}"
            )));
        }
        Ok(CircleParams { x, y, radius })
    }
}

/// Validated circle parameters, in image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleParams {
    pub x: i64,
    pub y: i64,
    pub radius: i64,
}

/// What a pointer click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// No interaction is active.
    Ignored,
    /// A crop corner was recorded; carries the phase after the click.
    CropCorner(CropPhase),
    /// The circle center was set.
    CircleCenter,
}

/// Collects pending crop and circle input and routes clicks.
#[derive(Debug, Clone, Default)]
pub struct InteractionSequencer {
    active: ActiveTarget,
    crop: Option<PendingCrop>,
    circle: Option<PendingCircle>,
}

impl InteractionSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ActiveTarget {
        self.active
    }

    pub fn pending_crop(&self) -> Option<&PendingCrop> {
        self.crop.as_ref()
    }

    pub fn pending_circle(&self) -> Option<&PendingCircle> {
        self.circle.as_ref()
    }

    pub fn crop_phase(&self) -> CropPhase {
        self.crop.as_ref().map_or(CropPhase::Idle, PendingCrop::phase)
    }

    /// Enter crop mode with a fresh sequence, discarding stale corners.
    pub fn begin_crop(&mut self) {
        self.crop = Some(PendingCrop::default());
        self.active = ActiveTarget::Crop;
    }

    /// Enter circle mode with empty fields.
    pub fn begin_circle(&mut self) {
        self.circle = Some(PendingCircle::default());
        self.active = ActiveTarget::Circle;
    }

    /// Route clicks to an interaction that is already pending.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NoPendingInput` if `target` has nothing pending.
    pub fn focus(&mut self, target: ActiveTarget) -> Result<(), EditError> {
        let pending = match target {
            ActiveTarget::None => true,
            ActiveTarget::Crop => self.crop.is_some(),
            ActiveTarget::Circle => self.circle.is_some(),
        };
        if !pending {
            return Err(EditError::NoPendingInput(target));
        }
        self.active = target;
        Ok(())
    }

    /// Discard pending crop input without committing anything.
    pub fn cancel_crop(&mut self) {
        self.crop = None;
        if self.active == ActiveTarget::Crop {
            self.active = ActiveTarget::None;
        }
    }

    /// Discard pending circle input without committing anything.
    pub fn cancel_circle(&mut self) {
        self.circle = None;
        if self.active == ActiveTarget::Circle {
            self.active = ActiveTarget::None;
        }
    }

    /// Feed an image-space click to the active interaction.
    pub fn click(&mut self, x: i64, y: i64) -> ClickOutcome {
        match self.active {
            ActiveTarget::Crop => match self.crop.as_mut() {
                Some(crop) => ClickOutcome::CropCorner(crop.record_click(x, y)),
                None => ClickOutcome::Ignored,
            },
            ActiveTarget::Circle => match self.circle.as_mut() {
                Some(circle) => {
                    circle.x = FieldEntry::Value(x);
                    circle.y = FieldEntry::Value(y);
                    ClickOutcome::CircleCenter
                }
                None => ClickOutcome::Ignored,
            },
            ActiveTarget::None => ClickOutcome::Ignored,
        }
    }

    /// Store typed text in a crop field.
    pub fn set_crop_field(&mut self, field: CropField, text: &str) -> Result<(), EditError> {
        let crop = self
            .crop
            .as_mut()
            .ok_or(EditError::NoPendingInput(ActiveTarget::Crop))?;
        *crop.field_mut(field) = FieldEntry::parse(text);
        Ok(())
    }

    /// Store typed text in a circle field.
    pub fn set_circle_field(&mut self, field: CircleField, text: &str) -> Result<(), EditError> {
        let circle = self
            .circle
            .as_mut()
            .ok_or(EditError::NoPendingInput(ActiveTarget::Circle))?;
        *circle.field_mut(field) = FieldEntry::parse(text);
        Ok(())
    }

    /// The normalized crop rectangle, if the pending input is complete.
    ///
    /// Leaves the pending input untouched either way.
    pub fn crop_request(&self) -> Result<CropRect, EditError> {
        self.crop
            .as_ref()
            .ok_or(EditError::NoPendingInput(ActiveTarget::Crop))?
            .to_rect()
    }

    /// The circle parameters, if the pending input is complete.
    ///
    /// Leaves the pending input untouched either way.
    pub fn circle_request(&self) -> Result<CircleParams, EditError> {
        self.circle
            .as_ref()
            .ok_or(EditError::NoPendingInput(ActiveTarget::Circle))?
            .to_params()
    }

    /// Clear crop input after a successful commit.
    pub fn finish_crop(&mut self) {
        self.cancel_crop();
    }

    /// Clear circle input after a successful commit.
    pub fn finish_circle(&mut self) {
        self.cancel_circle();
    }
}
