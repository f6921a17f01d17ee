//! Core math modules.

pub mod kummer;
pub mod stable;
pub mod sum;
