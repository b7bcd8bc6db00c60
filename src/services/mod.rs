pub mod validation;
pub mod video_store;
