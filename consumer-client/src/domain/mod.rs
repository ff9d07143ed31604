pub mod account;
pub mod account_import;
pub mod search_item;

pub use account::AccountRecord;
pub use account_import::AccountImport;
pub use search_item::SearchItem;
