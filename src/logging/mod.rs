pub mod remote;

pub use remote::RemoteLogger;
