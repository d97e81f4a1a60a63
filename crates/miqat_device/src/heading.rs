//! Device heading sources.
//!
//! Two platform families deliver orientation differently:
//! - ambient: events arrive unprompted, as a compass heading or as an
//!   `alpha` rotation (counter-clockwise from north, so heading is
//!   `360 − alpha`); absolute events are preferred when the platform
//!   has them.
//! - gesture-gated: nothing arrives until the user grants access from a
//!   gesture; events then carry a compass heading.

use miqat_solar::normalize_degrees;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::HeadingError;

/// What the platform offers for orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlatformCapabilities {
    /// Orientation access needs an explicit permission request.
    pub requires_permission: bool,
    /// Events referenced to true north are available.
    pub absolute_orientation: bool,
}

/// One orientation sample from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationEvent {
    /// Degrees clockwise from north, when the platform computes it.
    pub compass_heading: Option<f64>,
    /// Degrees counter-clockwise around the vertical axis.
    pub alpha: Option<f64>,
    /// Whether `alpha` is referenced to north.
    pub absolute: bool,
}

impl OrientationEvent {
    pub fn compass(heading: f64) -> Self {
        Self {
            compass_heading: Some(heading),
            ..Default::default()
        }
    }

    pub fn alpha(alpha: f64, absolute: bool) -> Self {
        Self {
            alpha: Some(alpha),
            absolute,
            ..Default::default()
        }
    }

    /// Heading in [0, 360): the compass heading when present, else
    /// `360 − alpha`.
    pub fn heading(&self) -> Option<f64> {
        if let Some(h) = self.compass_heading.filter(|h| h.is_finite()) {
            return Some(normalize_degrees(h));
        }
        self.alpha
            .filter(|a| a.is_finite())
            .map(|a| normalize_degrees(360.0 - a))
    }
}

/// Answer to an orientation permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    Granted,
    Denied,
}

/// Asks the user for orientation access.
pub trait PermissionPrompt {
    /// `Err` carries the platform's failure message.
    fn request_orientation_access(&mut self) -> Result<PermissionDecision, String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    #[default]
    NotRequested,
    Granted,
    Denied,
}

/// Source that receives events without asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmbientSource {
    prefer_absolute: bool,
}

impl AmbientSource {
    pub fn heading_for(&self, event: &OrientationEvent) -> Option<f64> {
        if self.prefer_absolute && event.compass_heading.is_none() && !event.absolute {
            debug!("dropping relative orientation event, absolute stream preferred");
            return None;
        }
        event.heading()
    }
}

/// Source that stays silent until access is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureGatedSource {
    access: AccessState,
}

impl GestureGatedSource {
    pub fn access(&self) -> AccessState {
        self.access
    }

    /// Must be called from a user gesture on the real platforms.
    pub fn request_access<P: PermissionPrompt>(&mut self, prompt: &mut P) -> Result<(), HeadingError> {
        match prompt.request_orientation_access() {
            Ok(PermissionDecision::Granted) => {
                self.access = AccessState::Granted;
                debug!("orientation access granted");
                Ok(())
            }
            Ok(PermissionDecision::Denied) => {
                self.access = AccessState::Denied;
                warn!("orientation access denied");
                Err(HeadingError::PermissionDenied)
            }
            Err(message) => {
                warn!(%message, "orientation permission prompt failed");
                Err(HeadingError::PromptFailed(message))
            }
        }
    }

    pub fn heading_for(&self, event: &OrientationEvent) -> Option<f64> {
        match self.access {
            AccessState::Granted => event.heading(),
            AccessState::NotRequested | AccessState::Denied => None,
        }
    }
}

/// Heading source picked once per platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingSource {
    Ambient(AmbientSource),
    GestureGated(GestureGatedSource),
}

impl HeadingSource {
    pub fn detect(capabilities: PlatformCapabilities) -> Self {
        let source = if capabilities.requires_permission {
            Self::GestureGated(GestureGatedSource::default())
        } else {
            Self::Ambient(AmbientSource {
                prefer_absolute: capabilities.absolute_orientation,
            })
        };
        debug!(?capabilities, ?source, "heading source selected");
        source
    }

    /// Whether a user gesture must call [`Self::request_access`] first.
    pub fn needs_user_gesture(&self) -> bool {
        matches!(
            self,
            Self::GestureGated(g) if g.access() != AccessState::Granted
        )
    }

    /// No-op for ambient sources.
    pub fn request_access<P: PermissionPrompt>(&mut self, prompt: &mut P) -> Result<(), HeadingError> {
        match self {
            Self::Ambient(_) => Ok(()),
            Self::GestureGated(g) => g.request_access(prompt),
        }
    }

    /// Heading carried by `event`, if this source accepts it.
    pub fn heading_for(&self, event: &OrientationEvent) -> Option<f64> {
        match self {
            Self::Ambient(a) => a.heading_for(event),
            Self::GestureGated(g) => g.heading_for(event),
        }
    }
}
