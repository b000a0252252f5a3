pub mod import;
pub mod interpolate;
pub mod models;
pub mod playback;
pub mod spatial;
pub mod telemetry;
pub mod track;

pub use import::{
    read_track_csv, track_from_manual_points, ImportError, ManualPoint, SAMPLE_CSV,
};
pub use interpolate::position_at_time;
pub use models::{NamedLocation, Position, Waypoint};
pub use playback::{PlaybackPhase, PlaybackState, Simulation, SPEED_MULTIPLIER};
pub use spatial::haversine_distance;
pub use telemetry::{Eta, TelemetrySnapshot};
pub use track::{Bounds, Track, TrackError};
