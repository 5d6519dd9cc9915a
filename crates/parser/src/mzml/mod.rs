pub mod parse_mzml;
pub use parse_mzml::parse_mzml;
pub mod structs;

#[cfg(test)]
mod tests;
