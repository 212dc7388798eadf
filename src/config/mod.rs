mod bootstrap;
mod server;

pub use bootstrap::{ADMIN_INVITE_TOKEN_ENV, BootstrapConfig};
pub use server::ServerConfig;
