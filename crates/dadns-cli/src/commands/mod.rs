pub mod connection;
pub mod records;
pub mod zones;

pub use connection::ConnectionArgs;
pub use records::RecordCommand;
pub use zones::{ListCommand, ZonesCommand};
