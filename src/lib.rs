pub mod api;
pub mod assistant;
pub mod image;
pub mod settings;
pub mod tasks;
pub mod utils;
