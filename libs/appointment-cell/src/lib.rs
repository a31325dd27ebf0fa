pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::*;
pub use handlers::AppointmentState;
pub use models::*;
pub use router::create_appointment_router;
pub use services::*;
