use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use geocoder::api::XmlElement;
use geocoder::config::FileConfig;
use geocoder::{Format, GeocodeRequest, OutputMode, Response, bounding_box, normalize};

/// Build and send Google Maps Geocoding API requests
///
/// Examples:
///   # Forward geocode an address
///   geocode "1600 Amphitheatre Parkway, Mountain View, CA"
///
///   # Reverse geocode coordinates, flattened to city/state/postal code
///   geocode --lat 40.714224 --lon -73.961452 --normalize
///
///   # Bias results to a 25 mile box around a point
///   geocode "Main Street" --lat 34.2 --lon -118.55 --radius 25 --region us
///
///   # Just print the request URL
///   geocode "Tokyo" --language ja --https --url-only
#[derive(Parser, Debug)]
#[command(name = "geocode")]
#[command(version, about, long_about = None)]
struct Args {
    /// Address to geocode (takes precedence over --lat/--lon)
    address: Option<String>,

    /// Path to config file (optional, auto-searches geocoder.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Latitude for reverse geocoding or as the center for --radius
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude for reverse geocoding or as the center for --radius
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Bounds bias as south,west,north,east
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, conflicts_with = "radius")]
    bounds: Option<Vec<f64>>,

    /// Bias results to a box of this many miles around --lat/--lon
    #[arg(long, requires = "lat")]
    radius: Option<f64>,

    /// Region bias as a two-letter ccTLD code
    #[arg(long)]
    region: Option<String>,

    /// Language of the results
    #[arg(long)]
    language: Option<String>,

    /// Report that the request comes from a device with a location sensor
    #[arg(long)]
    sensor: bool,

    /// Use HTTPS
    #[arg(long)]
    https: bool,

    /// Response format: json or xml
    #[arg(long)]
    format: Option<Format>,

    /// Print the response body as received
    #[arg(long, conflicts_with = "normalize")]
    raw: bool,

    /// Print only city, state, postal code and coordinates of the first result
    #[arg(long)]
    normalize: bool,

    /// Print the request URL without sending it
    #[arg(long)]
    url_only: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let file_config = match args.config {
        Some(ref path) => {
            if !path.exists() {
                bail!("Config file not found: {:?}", path);
            }
            FileConfig::from_path(path)?
        }
        None => FileConfig::load().unwrap_or_default(),
    };

    let format = args.format.unwrap_or(file_config.format);
    if args.normalize && format == Format::Xml {
        bail!("--normalize requires the JSON format");
    }
    if args.address.is_none() && args.lat.is_none() {
        bail!("Must provide either an ADDRESS or --lat and --lon");
    }

    let request = build_request(&args, &file_config, format)?;
    let secure = args.https || file_config.https;
    let url = request.url(secure);

    if args.url_only {
        println!("{}", url);
        return Ok(());
    }
    info!(%url, "sending request");

    let fetcher = file_config
        .fetcher()
        .context("Failed to create HTTP client")?;
    let mode = if args.raw {
        OutputMode::Raw
    } else {
        OutputMode::Parsed
    };

    let spinner = create_spinner("Geocoding...");
    let start = Instant::now();
    let response = request
        .geocode(&fetcher, secure, mode)
        .context("Geocoding request failed")?;
    spinner.finish_with_message(format!(
        "Received response [{:.1}s]",
        start.elapsed().as_secs_f32()
    ));

    match response {
        Response::Raw(body) => println!("{}", body),
        Response::Json(value) if args.normalize => {
            let address = normalize(&value).context("Failed to normalize response")?;
            println!("{}", serde_json::to_string_pretty(&address)?);
        }
        Response::Json(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Response::Xml(root) => print_xml(&root, 0),
    }

    Ok(())
}

fn build_request(args: &Args, file_config: &FileConfig, format: Format) -> Result<GeocodeRequest> {
    let mut request = GeocodeRequest::default()
        .with_format(format)
        .with_sensor(args.sensor || file_config.sensor);

    if let Some(ref address) = args.address {
        request = request.with_address(address.as_str());
    }
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        request = request.with_latitude_longitude(lat, lon);
    }

    if let Some(ref b) = args.bounds {
        let [south, west, north, east] = b[..] else {
            bail!("--bounds takes exactly four values: south,west,north,east");
        };
        request = request
            .with_bounds_southwest(south, west)
            .with_bounds_northeast(north, east);
    } else if let (Some(miles), Some(lat), Some(lon)) = (args.radius, args.lat, args.lon) {
        request = request.with_bounds(bounding_box(lat, lon, miles));
    }

    if let Some(region) = args.region.as_ref().or(file_config.region.as_ref()) {
        request = request.with_region(region.as_str());
    }
    if let Some(language) = args.language.as_ref().or(file_config.language.as_ref()) {
        request = request.with_language(language.as_str());
    }

    Ok(request)
}

fn print_xml(element: &XmlElement, depth: usize) {
    let indent = "  ".repeat(depth);
    if element.text.is_empty() {
        println!("{}{}", indent, element.name);
    } else {
        println!("{}{}: {}", indent, element.name, element.text);
    }
    for child in &element.children {
        print_xml(child, depth + 1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("geocode").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_flags_override_config() {
        let args = parse(&["Madrid", "--region", "es"]);
        let config = FileConfig {
            region: Some("fr".to_string()),
            language: Some("fr".to_string()),
            ..Default::default()
        };
        let request = build_request(&args, &config, Format::Json).unwrap();
        assert_eq!(request.region(), Some("es"));
        assert_eq!(request.language(), Some("fr"));
    }

    #[test]
    fn test_radius_builds_bounds() {
        let args = parse(&["--lat", "34.2", "--lon", "-118.55", "--radius", "25"]);
        let request = build_request(&args, &FileConfig::default(), Format::Json).unwrap();
        assert_eq!(request.bounds(), Some(bounding_box(34.2, -118.55, 25.0)));
        assert!(request.latitude_longitude().is_some());
    }

    #[test]
    fn test_explicit_bounds() {
        let args = parse(&["Winnetka", "--bounds", "34.17,-118.6,34.23,-118.5"]);
        let request = build_request(&args, &FileConfig::default(), Format::Json).unwrap();
        assert_eq!(request.bounds_string().as_deref(), Some("34.17,-118.6|34.23,-118.5"));
    }

    #[test]
    fn test_bounds_needs_four_values() {
        let args = parse(&["Winnetka", "--bounds", "1,2,3"]);
        let err = build_request(&args, &FileConfig::default(), Format::Json).unwrap_err();
        assert!(err.to_string().contains("exactly four values"));
    }

    #[test]
    fn test_format_flag() {
        let args = parse(&["Oslo", "--format", "xml"]);
        assert_eq!(args.format, Some(Format::Xml));
    }
}
