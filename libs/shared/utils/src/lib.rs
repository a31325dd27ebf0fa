pub mod test_utils;
pub mod time;

pub use time::{format_wait_time, parse_clock_time, TimeParseError};
