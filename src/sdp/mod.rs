pub mod answer;
pub mod offer;

pub use answer::scan_remote_address;
pub use offer::build_media_offer;
