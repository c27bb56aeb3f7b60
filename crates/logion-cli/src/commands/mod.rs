pub mod init;
pub mod repl;
