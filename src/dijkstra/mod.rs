// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod error;
mod search;
mod weight;

pub use error::PathError;
pub use search::{shortest_paths, ShortestPaths};
pub use weight::Weight;
