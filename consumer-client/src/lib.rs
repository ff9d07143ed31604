pub mod db;
pub mod domain;

pub use domain::{AccountImport, AccountRecord, SearchItem};
