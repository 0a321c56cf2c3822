#[path = "core/landing.rs"]
pub mod landing;

#[path = "core/data_url.rs"]
pub mod data_url;

#[path = "core/sim.rs"]
pub mod sim;

pub use landing::{Host, LandingController, UploadOutcome};
