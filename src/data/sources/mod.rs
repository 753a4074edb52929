pub mod local;
pub mod rest;

pub use local::LocalFileSource;
pub use rest::RestCountriesSource;
