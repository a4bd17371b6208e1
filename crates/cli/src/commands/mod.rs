//! CLI subcommands.

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod migrate;
pub mod orders;
pub mod seed;
