pub mod init;
pub mod play;
pub mod reset;
pub mod stats;
