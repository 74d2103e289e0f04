// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use map_builder::MapBuilder;

use crate::Map;

mod map_builder;
mod model;
mod xml;

/// Format of the input OSM file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    Unknown,

    /// Force uncompressed [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    Xml,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    XmlGz,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    XmlBz2,
}

impl FileFormat {
    /// Guesses the format of a file from its first few bytes.
    pub fn detect(prefix: &[u8]) -> Self {
        if prefix.starts_with(&[0x1F, 0x8B]) {
            Self::XmlGz
        } else if prefix.starts_with(b"BZh") {
            Self::XmlBz2
        } else {
            Self::Xml
        }
    }
}

/// Additional controls for interpreting OSM data as a [Map].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Format of the input data.
    pub file_format: FileFormat,

    /// Filter nodes by a specific bounding box. In order: left (min lon), bottom (min lat),
    /// right (max lon), top (max lat). Ignored if all values are set to zero, or at least one
    /// of them is not finite.
    pub bbox: [f64; 4],
}

impl Default for Options {
    fn default() -> Self {
        Self {
            file_format: FileFormat::Unknown,
            bbox: [0.0; 4],
        }
    }
}

/// Error conditions which may occur when loading a [Map].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid xml: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Internal trait for objects which can stream [osm features](model::Feature)
/// from an underlying source.
trait FeatureReader {
    type Error;
    fn next_feature(&mut self) -> Result<Option<model::Feature>, Self::Error>;
}

impl<I, E> FeatureReader for I
where
    I: Iterator<Item = Result<model::Feature, E>>,
{
    type Error = E;

    #[inline]
    fn next_feature(&mut self) -> Result<Option<model::Feature>, E> {
        self.next().transpose()
    }
}

/// Parse OSM features from a reader into a [Map] as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader when needed.
pub fn load_map_from_io<R: io::Read>(options: &Options, reader: R) -> Result<Map, Error> {
    let mut b = io::BufReader::new(reader);

    let file_format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(b.fill_buf()?),
        known => known,
    };

    let map = match file_format {
        FileFormat::Unknown | FileFormat::Xml => {
            MapBuilder::new(options).build(xml::Reader::from_io(b))?
        }

        FileFormat::XmlGz => {
            let d = flate2::read::MultiGzDecoder::new(b);
            let r = xml::Reader::from_io(io::BufReader::new(d));
            MapBuilder::new(options).build(r)?
        }

        FileFormat::XmlBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(b);
            let r = xml::Reader::from_io(io::BufReader::new(d));
            MapBuilder::new(options).build(r)?
        }
    };

    Ok(map)
}

/// Parse OSM features from a file at the provided path into a [Map] as per the provided [Options].
pub fn load_map_from_file<P: AsRef<Path>>(options: &Options, path: P) -> Result<Map, Error> {
    let f = File::open(path)?;
    load_map_from_io(options, f)
}

/// Parse OSM features from a static buffer into a [Map] as per the provided [Options].
pub fn load_map_from_buffer(options: &Options, data: &[u8]) -> Result<Map, Error> {
    let file_format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(data),
        known => known,
    };

    if file_format == FileFormat::Xml {
        // Fast path is available for in-memory XML data
        let r = xml::Reader::from_buffer(data);
        Ok(MapBuilder::new(options).build(r)?)
    } else {
        // Wrap the buffer in a cursor and use the IO path
        let options = Options {
            file_format,
            ..*options
        };
        load_map_from_io(&options, io::Cursor::new(data))
    }
}
