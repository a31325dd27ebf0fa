pub mod normalize;
pub mod schedule;
pub mod source;

pub use normalize::{dedupe_by_id, normalize_records, Envelope};
pub use schedule::{estimate_wait_minutes, queue_position, DEFAULT_CONSULTATION_MINUTES};
pub use source::AppointmentSource;
