mod cookies;
mod env;
mod framing;
mod state;
mod tokens;
