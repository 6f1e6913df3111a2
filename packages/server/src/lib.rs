// Television Record Service - API Core
//
// CRUD over a single `tv` table exposed as HTTP/JSON.
// Requests flow handler -> validator -> persistence action -> outcome mapping.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
