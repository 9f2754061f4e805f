//! Domain models for the Agritech Hub platform

mod chat;
mod crop;
mod disease;
mod forum;
mod scheme;
mod soil;
mod weather;

pub use chat::*;
pub use crop::*;
pub use disease::*;
pub use forum::*;
pub use scheme::*;
pub use soil::*;
pub use weather::*;
