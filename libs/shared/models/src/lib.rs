pub mod error;
pub mod settings;

pub use error::AppError;
pub use settings::StaffSettings;
