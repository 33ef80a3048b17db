pub mod category;
pub mod completions;
pub mod events;
pub mod results;
pub mod status;
