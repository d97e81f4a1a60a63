//! Platform adapters: device heading and geolocation.
//!
//! Both feed the engine optional inputs. A missing heading leaves the
//! Qibla compass showing the static bearing; a failed location request
//! leaves the coordinate absent and the prayer clock neutral.

pub mod error;
pub mod heading;
pub mod location;

pub use error::{HeadingError, LocationError};
pub use heading::{
    AccessState, AmbientSource, GestureGatedSource, HeadingSource, OrientationEvent,
    PermissionDecision, PermissionPrompt, PlatformCapabilities,
};
pub use location::{
    DEFAULT_MAX_AGE, DEFAULT_TIMEOUT, FixedLocationProvider, LocationOptions, LocationProvider,
    LocationService, LocationStatus,
};
