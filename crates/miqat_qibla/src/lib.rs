//! Qibla direction.
//!
//! The Qibla is the initial great-circle bearing from the observer to the
//! Kaaba. A device pointer is that bearing rotated by the negated device
//! heading; "aligned" means the heading is within a tolerance of the
//! bearing, measured around the circle.

pub mod bearing;
pub mod compass;
pub mod pointer;

pub use bearing::{
    DEGENERATE_RADIUS_KM, EARTH_RADIUS_KM, KAABA, bearing_to, distance_to_kaaba_km,
    great_circle_distance_km, qibla_bearing,
};
pub use compass::{QiblaCompass, QiblaReading};
pub use pointer::{
    DEFAULT_ALIGNMENT_TOLERANCE_DEG, circular_distance, is_aligned, relative_pointer_angle,
};
