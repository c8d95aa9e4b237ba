pub mod dates;
pub mod key_value;

pub use dates::parse_date;
pub use key_value::KeyValueWhoisParser;
