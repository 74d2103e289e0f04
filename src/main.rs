use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use walkroute::{Building, Coordinates, RouteError, Router};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct MapLoadError(PathBuf, #[source] walkroute::osm::Error);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Guess the format from the file content
    Auto,
    Xml,
    XmlGz,
    XmlBz2,
}

impl From<Format> for walkroute::osm::FileFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Auto => Self::Unknown,
            Format::Xml => Self::Xml,
            Format::XmlGz => Self::XmlGz,
            Format::XmlBz2 => Self::XmlBz2,
        }
    }
}

#[derive(Parser)]
struct Cli {
    /// The path to the OSM file
    #[arg(default_value = "map.osm")]
    osm_file: PathBuf,

    /// Format of the OSM file
    #[arg(long, value_enum, default_value_t = Format::Auto)]
    format: Format,

    /// Log loading and routing details
    #[arg(short, long)]
    verbose: bool,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    colog::default_builder()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    println!("** Navigating open street map **");
    println!();

    let router = Router::new(load_map(&cli.osm_file, cli.format)?);
    let map = router.map();
    let graph = router.graph();

    println!("# of nodes: {}", map.nodes.len());
    println!("# of footways: {}", map.footways.len());
    println!("# of buildings: {}", map.buildings.len());
    println!("# of vertices: {}", graph.vertex_count());
    println!("# of edges: {}", graph.edge_count());
    println!();

    let mut lines = io::stdin().lock().lines();

    loop {
        let Some(start) = prompt(&mut lines, "Enter start (partial name or abbreviation), or #> ")?
        else {
            break;
        };
        if start == "#" {
            break;
        }

        let dest = prompt(&mut lines, "Enter destination (partial name or abbreviation)> ")?
            .unwrap_or_default();

        navigate(&router, &start, &dest);
        println!();
    }

    println!("** Done **");
    Ok(())
}

fn load_map<P: AsRef<Path>>(path: P, format: Format) -> Result<walkroute::Map, MapLoadError> {
    let options = walkroute::osm::Options {
        file_format: format.into(),
        bbox: [0.0; 4],
    };
    walkroute::osm::load_map_from_file(&options, path.as_ref())
        .map_err(|e| MapLoadError(PathBuf::from(path.as_ref()), e))
}

fn prompt<B: BufRead>(lines: &mut io::Lines<B>, message: &str) -> io::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    lines.next().transpose()
}

fn navigate(router: &Router, start: &str, dest: &str) {
    let map = router.map();

    let Some(start) = map.find_building(start) else {
        println!("Start building not found");
        return;
    };

    let Some(dest) = map.find_building(dest) else {
        println!("Destination building not found");
        return;
    };

    println!("Starting point:");
    print_building(start);
    println!("Destination point:");
    print_building(dest);
    println!();

    let (start_node, dest_node) = match (
        router.nearest_node(start.coordinates),
        router.nearest_node(dest.coordinates),
    ) {
        (Ok(s), Ok(d)) => (s, d),
        (Err(e), _) | (_, Err(e)) => {
            println!("**Error: {}", e);
            return;
        }
    };

    println!("Nearest start node:");
    print_node(start_node, map.nodes.get(&start_node));
    println!("Nearest destination node:");
    print_node(dest_node, map.nodes.get(&dest_node));
    println!();

    println!("Navigating with Dijkstra...");
    match router.route_between_nodes(start_node, dest_node) {
        Ok(route) => {
            println!("Distance to dest: {}", format_distance(route.distance));
            let path: Vec<String> = route.path.iter().map(|id| id.to_string()).collect();
            println!("Path: {}", path.join("->"));
        }
        Err(RouteError::Unreachable) => println!("Sorry, destination unreachable"),
        Err(e) => println!("**Error: {}", e),
    }
}

fn print_building(b: &Building) {
    println!(" {}", b.full_name);
    println!(" {}", format_position(&b.coordinates));
}

fn print_node(id: i64, pos: Option<&Coordinates>) {
    println!(" {}", id);
    if let Some(pos) = pos {
        println!(" {}", format_position(pos));
    }
}

fn format_position(pos: &Coordinates) -> String {
    format!("({:.8}, {:.8})", pos.lat, pos.lon)
}

fn format_distance(miles: f64) -> String {
    format!("{:.8} miles", miles)
}
