pub mod env;
pub mod identity;
pub mod rpc;
pub mod session;
pub mod transport;

pub use identity::IdentityError;
pub use rpc::RpcError;
pub use session::SessionError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Env(#[from] env::EnvError),

    #[error(transparent)]
    Transport(#[from] transport::TransportError),

    #[error(transparent)]
    Identity(#[from] identity::IdentityError),

    #[error(transparent)]
    Session(#[from] session::SessionError),

    #[error(transparent)]
    Rpc(#[from] rpc::RpcError),
}
