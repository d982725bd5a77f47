//! bokelai - A small, self-hostable book catalog HTTP API

pub mod cli;
pub mod http_server;
pub mod store;
