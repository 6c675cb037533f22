//! Collectors for the Linux `/proc` filesystem.
//!
//! This module provides parsers and collectors for reading CPU and memory
//! counters from the `/proc` virtual filesystem.

pub mod cpu;
pub mod memory;
pub mod parser;

pub use cpu::CpuCollector;
pub use memory::MemoryCollector;
pub use parser::ParseError;
