pub mod engine;
pub mod io;
pub mod params;
pub mod parser;
pub mod settings;
