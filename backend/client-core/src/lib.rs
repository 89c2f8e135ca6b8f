pub mod env;
pub mod error;
pub mod identity;
pub mod rpc;
pub mod session;
pub mod transport;

mod game;
#[cfg(test)]
mod tests;

pub const IDENTITY_API_HOST: &str = "android.clients.google.com";
pub const GAME_API_HOST: &str = "m-dot-betaspike.appspot.com";
pub const IDENTITY_BASE_URL: &str = const_format::concatcp!("https://", IDENTITY_API_HOST);
pub const GAME_API_BASE_URL: &str = const_format::concatcp!("https://", GAME_API_HOST);
