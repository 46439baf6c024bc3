pub mod submitted;
pub mod transfers;
