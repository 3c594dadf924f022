mod mime;
mod resolve;
mod svr;

pub use svr::{BindError, ServeConfig, StaticServer, startup};
