pub mod category;
pub mod idea;
pub mod listing;
pub mod status;
