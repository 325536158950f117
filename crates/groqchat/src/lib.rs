pub mod cli;
pub mod log;
pub mod svc;

#[cfg(test)]
mod test_utils;
