pub(crate) mod maths_utils;
mod perf;
mod time_utils;
pub(crate) mod vec_utils;

pub use time_utils::{AppInstant, format_duration_ms};

pub use maths_utils::remap;
