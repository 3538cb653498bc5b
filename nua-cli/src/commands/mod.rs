pub mod calendar;
pub mod config;
pub mod configure;
pub mod event;
pub mod status;
pub mod watch;
