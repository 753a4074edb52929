pub mod raw;
pub mod source;
pub mod sources;

pub use raw::{RawCountry, SourceShape};
pub use source::{CountrySource, SourceError};
pub use sources::{LocalFileSource, RestCountriesSource};
