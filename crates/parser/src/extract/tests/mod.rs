mod base_peak;
mod filter;
