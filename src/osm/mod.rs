// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading of [Maps](crate::Map) from [OpenStreetMap](https://www.openstreetmap.org/) files.
//!
//! Ways tagged with `highway=footway` or `area:highway=footway` become [Footways](crate::Footway),
//! and ways tagged with `building=university` become [Buildings](crate::Building), named
//! after their `name` tag, abbreviated by their `ref` tag, and positioned at the mean
//! position of their nodes.

mod reader;

pub use reader::{
    load_map_from_buffer, load_map_from_file, load_map_from_io, Error, FileFormat, Options,
};
