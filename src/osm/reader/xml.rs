// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::io;
use std::str::from_utf8;

use super::model;
use crate::Coordinates;

/// Parser is a trait for objects which can parse XML.
///
/// This trait only exists to fix the mismatch of
/// [quick_xml::Reader::read_event] when working on buffered data
/// and [quick_xml::Reader::read_event_into] when working on IO.
pub(super) trait Parser {
    fn read_event<'a>(&'a mut self) -> quick_xml::Result<quick_xml::events::Event<'a>>;
}

/// IoParser implements [Parser] over an [std::io::BufRead].
pub(super) struct IoParser<R: io::BufRead>(quick_xml::Reader<R>, Vec<u8>);

impl<R: io::BufRead> IoParser<R> {
    #[inline]
    fn new(reader: R) -> Self {
        Self(quick_xml::Reader::from_reader(reader), Vec::default())
    }
}

impl<R: io::BufRead> Parser for IoParser<R> {
    #[inline]
    fn read_event<'a>(&'a mut self) -> quick_xml::Result<quick_xml::events::Event<'a>> {
        self.1.clear();
        self.0.read_event_into(&mut self.1)
    }
}

/// BufParser implements [Parser] over a slice of bytes (`&[u8]`).
pub(super) struct BufParser<'a>(quick_xml::Reader<&'a [u8]>);

impl<'a> BufParser<'a> {
    #[inline]
    fn new(data: &'a [u8]) -> Self {
        Self(quick_xml::Reader::from_reader(data))
    }
}

impl<'a> Parser for BufParser<'a> {
    #[inline]
    fn read_event<'b>(&'b mut self) -> quick_xml::Result<quick_xml::events::Event<'b>> {
        self.0.read_event()
    }
}

/// Reader reads osm [Features](model::Feature) from an XML file.
pub(super) struct Reader<P: Parser> {
    parser: P,
    eof: bool,
}

impl<P: Parser> Reader<P> {
    #[inline]
    fn new(parser: P) -> Self {
        Self { parser, eof: false }
    }
}

impl<P: Parser> Iterator for Reader<P> {
    type Item = Result<model::Feature, quick_xml::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut f: Option<model::Feature> = None;

        while !self.eof {
            let event = match self.parser.read_event() {
                Ok(e) => e,
                Err(e) => return Some(Err(e)),
            };

            match event {
                quick_xml::events::Event::Empty(start) => match start.local_name().as_ref() {
                    b"node" => {
                        if let Some(n) = parse_node(&start) {
                            return Some(Ok(model::Feature::Node(n)));
                        }
                    }
                    // "way" can't be self-closing
                    b"tag" => {
                        if let Some(tags) = feature_tags(&mut f) {
                            if let Some((k, v)) = parse_tag(&start) {
                                tags.insert(k, v);
                            }
                        }
                    }
                    b"nd" => {
                        if let Some(nodes) = feature_nodes(&mut f) {
                            if let Some(ref_) = parse_nd(&start) {
                                nodes.push(ref_);
                            }
                        }
                    }
                    _ => {}
                },

                quick_xml::events::Event::Start(start) => match start.local_name().as_ref() {
                    b"node" => f = parse_node(&start).map(model::Feature::Node),
                    b"way" => f = parse_way(&start).map(model::Feature::Way),
                    // "tag" and "nd" must be self-closing,
                    // relations are not needed to build a Map
                    _ => {}
                },

                quick_xml::events::Event::End(end) => match end.local_name().as_ref() {
                    b"node" | b"way" => {
                        if let Some(f) = f.take() {
                            return Some(Ok(f));
                        }
                    }
                    _ => {}
                },

                quick_xml::events::Event::Eof => {
                    self.eof = true;
                }

                _ => {}
            }
        }

        f.map(Ok)
    }
}

impl<'a> Reader<BufParser<'a>> {
    #[inline]
    pub(super) fn from_buffer(data: &'a [u8]) -> Self {
        Self::new(BufParser::new(data))
    }
}

impl<R: io::BufRead> Reader<IoParser<R>> {
    #[inline]
    pub(super) fn from_io(reader: R) -> Self {
        Self::new(IoParser::new(reader))
    }
}

fn parse_node(start: &quick_xml::events::BytesStart<'_>) -> Option<model::Node> {
    let mut id: i64 = 0;
    let mut lat = f64::NAN;
    let mut lon = f64::NAN;

    for attr in start.attributes() {
        let attr = attr.ok()?;
        match attr.key.as_ref() {
            b"id" => id = from_utf8(&attr.value).ok()?.parse().ok()?,
            b"lat" => lat = from_utf8(&attr.value).ok()?.parse().ok()?,
            b"lon" => lon = from_utf8(&attr.value).ok()?.parse().ok()?,
            _ => {}
        }
    }

    if id != 0 && lat.is_finite() && lon.is_finite() {
        Some(model::Node {
            id,
            pos: Coordinates::new(lat, lon),
        })
    } else {
        log::warn!("skipping invalid node {}", id);
        None
    }
}

fn parse_way(start: &quick_xml::events::BytesStart<'_>) -> Option<model::Way> {
    let mut id: i64 = 0;

    for attr in start.attributes() {
        let attr = attr.ok()?;
        if attr.key.as_ref() == b"id" {
            id = from_utf8(&attr.value).ok()?.parse().ok()?;
        }
    }

    if id != 0 {
        Some(model::Way {
            id,
            nodes: Vec::default(),
            tags: HashMap::default(),
        })
    } else {
        None
    }
}

fn parse_tag(start: &quick_xml::events::BytesStart<'_>) -> Option<(String, String)> {
    let mut k = None;
    let mut v = None;

    for attr in start.attributes() {
        let attr = attr.ok()?;
        match attr.key.as_ref() {
            b"k" => k = Some(attr.unescape_value().ok()?.into_owned()),
            b"v" => v = Some(attr.unescape_value().ok()?.into_owned()),
            _ => {}
        }
    }

    k.map(|k| (k, v.unwrap_or_default()))
}

fn parse_nd(start: &quick_xml::events::BytesStart<'_>) -> Option<i64> {
    let mut ref_: i64 = 0;

    for attr in start.attributes() {
        let attr = attr.ok()?;
        if attr.key.as_ref() == b"ref" {
            ref_ = from_utf8(&attr.value).ok()?.parse().ok()?;
        }
    }

    if ref_ != 0 {
        Some(ref_)
    } else {
        None
    }
}

fn feature_tags(f: &mut Option<model::Feature>) -> Option<&mut HashMap<String, String>> {
    match f {
        Some(model::Feature::Way(ref mut w)) => Some(&mut w.tags),
        _ => None,
    }
}

fn feature_nodes(f: &mut Option<model::Feature>) -> Option<&mut Vec<i64>> {
    match f {
        Some(model::Feature::Way(ref mut w)) => Some(&mut w.nodes),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::FeatureReader;
    use super::model::{Feature, Node, Way};
    use super::*;

    macro_rules! tags {
        {} => { HashMap::default() };
        {$( $k:literal : $v:literal ),+} => {
            HashMap::from_iter([ $( ($k.to_string(), $v.to_string()) ),+ ])
        };
    }

    const SMALL_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6">
  <node id="-1" lat="41.87" lon="-87.65"/>
  <node id="-2" lat="41.88" lon="-87.64">
    <tag k="amenity" v="bench"/>
  </node>
  <node id="-3" lat="foo" lon="-87.64"/>
  <node id="0" lat="41.88" lon="-87.64"/>
  <way id="-100">
    <nd ref="-1"/>
    <nd ref="-2"/>
    <tag k="highway" v="footway"/>
    <tag k="name" v="Quad &amp; Walk"/>
  </way>
  <relation id="-200">
    <member type="way" ref="-100" role=""/>
    <tag k="type" v="route"/>
  </relation>
  <way id="-101">
    <nd ref="-2"/>
    <nd ref="-1"/>
    <tag k="building"/>
  </way>
</osm>
"#;

    const CAMPUS_XML: &[u8] = include_bytes!("test_fixtures/campus.osm");

    fn expected_nodes() -> Vec<Node> {
        vec![
            Node {
                id: -1,
                pos: Coordinates::new(41.87, -87.65),
            },
            Node {
                id: -2,
                pos: Coordinates::new(41.88, -87.64),
            },
        ]
    }

    fn expected_ways() -> Vec<Way> {
        vec![
            Way {
                id: -100,
                nodes: vec![-1, -2],
                tags: tags! {"highway": "footway", "name": "Quad & Walk"},
            },
            Way {
                id: -101,
                nodes: vec![-2, -1],
                tags: tags! {"building": ""},
            },
        ]
    }

    fn collect_all<F: FeatureReader>(mut features: F) -> Result<(Vec<Node>, Vec<Way>), F::Error> {
        let mut nodes = Vec::default();
        let mut ways = Vec::default();

        while let Some(f) = features.next_feature()? {
            match f {
                Feature::Node(n) => nodes.push(n),
                Feature::Way(w) => ways.push(w),
            }
        }

        Ok((nodes, ways))
    }

    #[test]
    fn parse_from_buf() -> Result<(), quick_xml::Error> {
        let (nodes, ways) = collect_all(Reader::from_buffer(SMALL_XML))?;
        assert_eq!(nodes, expected_nodes());
        assert_eq!(ways, expected_ways());
        Ok(())
    }

    #[test]
    fn parse_from_io() -> Result<(), quick_xml::Error> {
        let (nodes, ways) = collect_all(Reader::from_io(io::Cursor::new(SMALL_XML)))?;
        assert_eq!(nodes, expected_nodes());
        assert_eq!(ways, expected_ways());
        Ok(())
    }

    #[test]
    fn parse_campus() -> Result<(), quick_xml::Error> {
        let (nodes, ways) = collect_all(Reader::from_buffer(CAMPUS_XML))?;

        // Node 52 has an invalid longitude
        assert_eq!(nodes.len(), 23);
        assert!(nodes.iter().all(|n| n.id != 52));
        assert_eq!(ways.len(), 10);

        let way = ways.iter().find(|w| w.id == 200).unwrap();
        assert_eq!(way.nodes, vec![20, 21, 22, 23, 20]);
        assert!(way.has_tag("building", "university"));
        assert!(way.has_tag("ref", "SEO"));
        assert!(!way.has_tag("highway", "footway"));
        Ok(())
    }

    #[test]
    fn malformed_xml() {
        let data = br#"<osm><way id="1"><nd ref="1"/></node></osm>"#;
        let result = collect_all(Reader::from_buffer(data));
        assert!(result.is_err());
    }
}
