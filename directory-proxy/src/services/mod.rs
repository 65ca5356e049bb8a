pub mod address_book;
pub mod api;
pub mod directory_read;
pub mod directory_write;
pub mod error;
pub mod metrics;
pub mod token;

pub use address_book::AddressBook;
pub use api::DirectoryApi;
pub use directory_read::DirectoryReader;
pub use directory_write::DirectoryWriter;
pub use error::DirectoryError;
pub use token::{AccessToken, TokenExchange, TokenScope};
