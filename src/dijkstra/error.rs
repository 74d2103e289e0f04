// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Error conditions which may occur when reconstructing a path
/// with [ShortestPaths::path_to](crate::ShortestPaths::path_to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The destination is not a vertex of the searched graph.
    #[error("destination is not a vertex of the graph")]
    UnknownDestination,

    /// There is no path from the source to the destination.
    #[error("destination unreachable")]
    Unreachable,
}
