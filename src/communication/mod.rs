pub mod channel;
pub mod messages;
pub mod wire;
