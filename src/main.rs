use clap::{Parser, Subcommand, ValueEnum};
use flate2::{write::GzEncoder, Compression};
use geo_background::{
  BackgroundOptions, BoundingBox, GeoPoint, Line, MultiLine, MultiPolygon, Point,
};
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Parser)]
#[clap(
  name = "geo_background",
  about = "Generate and convert background geometry for map rendering",
  version
)]
struct Cli {
  /// Write the result here instead of stdout
  #[clap(long, short, global = true, value_parser)]
  output: Option<PathBuf>,

  /// Gzip the output
  #[clap(long, global = true)]
  gzip: bool,

  #[clap(subcommand)]
  command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
  #[clap(
    name = "background",
    about = "Cut a bounding box into polygon slices that are safe to project"
  )]
  Background {
    #[clap(long, allow_hyphen_values = true, value_parser)]
    north: f64,
    #[clap(long, allow_hyphen_values = true, value_parser)]
    east: f64,
    #[clap(long, allow_hyphen_values = true, value_parser)]
    south: f64,
    #[clap(long, allow_hyphen_values = true, value_parser)]
    west: f64,

    /// Background options file (JSON)
    #[clap(long, value_parser)]
    config: Option<PathBuf>,

    /// Emit {longitude, latitude} records instead of [x, y] pairs
    #[clap(long)]
    geo: bool,
  },

  #[clap(name = "circle", about = "Approximate a circle on the sphere")]
  Circle {
    #[clap(long, allow_hyphen_values = true, value_parser)]
    longitude: f64,
    #[clap(long, allow_hyphen_values = true, value_parser)]
    latitude: f64,

    /// Radius in degrees
    #[clap(long, value_parser)]
    radius: f64,

    /// Angle between ring points in degrees
    #[clap(long, value_parser, default_value_t = geo_background::circle::CIRCLE_PRECISION)]
    precision: f64,

    /// Emit {longitude, latitude} records instead of [x, y] pairs
    #[clap(long)]
    geo: bool,
  },

  #[clap(name = "to-geo", about = "Convert [x, y] geometry to {longitude, latitude}")]
  ToGeo {
    #[clap(long, value_enum, default_value = "polygons")]
    kind: ShapeKind,

    /// Input JSON file
    #[clap(value_parser)]
    input: PathBuf,
  },

  #[clap(name = "from-geo", about = "Convert {longitude, latitude} geometry to [x, y]")]
  FromGeo {
    #[clap(long, value_enum, default_value = "polygons")]
    kind: ShapeKind,

    /// Input JSON file
    #[clap(value_parser)]
    input: PathBuf,
  },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ShapeKind {
  Points,
  Lines,
  Polygons,
}

#[derive(Debug, Error)]
enum CliError {
  #[error(transparent)]
  Geometry(#[from] geo_background::Error),

  #[error("i/o error: {0}")]
  Io(#[from] io::Error),

  #[error("invalid JSON: {0}")]
  Json(#[from] serde_json::Error),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
  let reader = BufReader::new(File::open(path)?);
  Ok(serde_json::from_reader(reader)?)
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>, gzip: bool) -> Result<(), CliError> {
  let sink: Box<dyn Write> = match output {
    Some(path) => Box::new(BufWriter::new(File::create(path)?)),
    None => Box::new(io::stdout().lock()),
  };
  if gzip {
    let mut gz = GzEncoder::new(sink, Compression::default());
    serde_json::to_writer(&mut gz, value)?;
    gz.finish()?.flush()?;
  } else {
    let mut sink = sink;
    serde_json::to_writer(&mut sink, value)?;
    sink.flush()?;
  }
  Ok(())
}

fn emit_polygons(
  polygons: MultiPolygon<Point>,
  geo: bool,
  output: Option<&Path>,
  gzip: bool,
) -> Result<(), CliError> {
  if geo {
    write_json(&geo_background::multi_polygon_to_geo(&polygons), output, gzip)
  } else {
    write_json(&polygons, output, gzip)
  }
}

fn run(args: Cli) -> Result<(), CliError> {
  let output = args.output.as_deref();
  match args.command {
    Commands::Background {
      north,
      east,
      south,
      west,
      config,
      geo,
    } => {
      let options: BackgroundOptions = match config {
        Some(path) => {
          info!("Reading background options from {}", path.display());
          read_json(&path)?
        }
        None => BackgroundOptions::default(),
      };
      let bbox = BoundingBox::new(north, east, south, west);
      let slices = geo_background::background_with(&bbox, &options)?;
      info!("Generated {} background slices", slices.len());
      emit_polygons(slices, geo, output, args.gzip)
    }
    Commands::Circle {
      longitude,
      latitude,
      radius,
      precision,
      geo,
    } => {
      let circle = geo_background::circle_with_precision(longitude, latitude, radius, precision)?;
      emit_polygons(circle, geo, output, args.gzip)
    }
    Commands::ToGeo { kind, input } => match kind {
      ShapeKind::Points => {
        let points: Line<Point> = read_json(&input)?;
        write_json(&geo_background::multi_point_to_geo(&points), output, args.gzip)
      }
      ShapeKind::Lines => {
        let lines: MultiLine<Point> = read_json(&input)?;
        write_json(&geo_background::multi_line_to_geo(&lines), output, args.gzip)
      }
      ShapeKind::Polygons => {
        let polygons: MultiPolygon<Point> = read_json(&input)?;
        write_json(&geo_background::multi_polygon_to_geo(&polygons), output, args.gzip)
      }
    },
    Commands::FromGeo { kind, input } => match kind {
      ShapeKind::Points => {
        let points: Line<GeoPoint> = read_json(&input)?;
        write_json(&geo_background::multi_geo_to_point(&points), output, args.gzip)
      }
      ShapeKind::Lines => {
        let lines: MultiLine<GeoPoint> = read_json(&input)?;
        write_json(
          &geo_background::multi_geo_line_to_multi_line(&lines),
          output,
          args.gzip,
        )
      }
      ShapeKind::Polygons => {
        let polygons: MultiPolygon<GeoPoint> = read_json(&input)?;
        write_json(
          &geo_background::multi_geo_polygon_to_multi_polygon(&polygons),
          output,
          args.gzip,
        )
      }
    },
  }
}

fn main() {
  env_logger::init();
  let args = Cli::parse();
  if let Err(err) = run(args) {
    error!("{}", err);
    std::process::exit(1);
  }
}
