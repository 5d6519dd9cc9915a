pub mod decode;
pub use decode::decode;
pub mod encode;
pub use encode::encode;

#[cfg(test)]
mod tests;
