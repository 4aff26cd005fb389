pub mod bank_io;
pub mod watcher;
