mod caller;
pub mod config;
mod http_layers;
mod params;
pub mod server;
pub mod state;

pub use caller::Caller;
pub use config::ServerConfig;
pub use http_layers::*;
pub use params::Params;
pub use server::{make_app, run_server};
