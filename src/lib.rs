pub mod bus;
pub mod config;
pub mod cpu;
pub mod frontend;
pub mod machine;
