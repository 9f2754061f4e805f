//! HTTP handlers

pub mod crop;
pub mod disease;
pub mod forum;
pub mod health;
pub mod schemes;
pub mod voice;
pub mod weather;

pub use crop::recommend_crops;
pub use disease::{model_health, predict_disease};
pub use forum::{
    add_comment, create_post, dislike_post, forum_not_found, like_post, list_comments, list_posts,
};
pub use health::health_check;
pub use schemes::list_schemes;
pub use voice::{clear_voice, voice_chat, voice_history};
pub use weather::{current_weather, last_city, save_city};
