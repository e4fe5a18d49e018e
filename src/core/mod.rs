// src/core/mod.rs

pub mod net;
pub mod pace;
pub mod sanitize;

pub use net::{HttpSource, MemorySource, Page, PageSource};
pub use pace::{NoPause, Pacer, SleepPacer};
