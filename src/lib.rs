pub mod cli;
pub mod mail;
pub mod planetary;
pub mod token;
