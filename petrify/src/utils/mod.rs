// SPDX-License-Identifier: MIT

pub mod log;
pub mod progress;

pub use log::*;
pub use progress::*;
