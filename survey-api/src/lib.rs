use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub mod config;
pub mod error;
pub mod handlers;
pub mod legacy;
pub mod logging;
pub mod models;
pub mod routes;
pub mod server;
pub mod storage;

pub type DbConnection = Arc<Mutex<Connection>>;
