pub mod errors;
pub mod db;
pub mod customer;
pub mod invoice;
pub mod revenue;

#[cfg(test)]
mod tests;
