pub mod diff;
pub mod init;
pub mod ls;
