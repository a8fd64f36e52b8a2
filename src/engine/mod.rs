pub mod assignment;
pub mod dashboard;
pub mod selection;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod testing;
