//! Business logic services for the Agritech Hub platform

pub mod crop_recommendation;
pub mod forum;
pub mod schemes;
pub mod voice;
pub mod weather;

pub use crop_recommendation::CropRecommendationService;
pub use forum::ForumService;
pub use voice::VoiceService;
pub use weather::WeatherService;
