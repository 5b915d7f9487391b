pub mod auth;
pub mod guard;
pub mod usecase;

#[cfg(test)]
pub mod test_utils;
