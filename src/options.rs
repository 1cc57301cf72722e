use std::path::PathBuf;

use structopt::StructOpt;
use treepack::SizeMode;

#[derive(Debug, StructOpt)]
#[structopt(about = "Lays out rectangles for spritesheets and texture atlases")]
pub struct Options {
    #[structopt(subcommand)]
    pub command: Subcommand,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Pack the rectangles described by a layout file. Writes the resulting
    /// layout as JSON to stdout, or to the path given by --output.
    Pack(PackOptions),

    /// Print an estimated container size for the rectangles in a layout file,
    /// based on their total area.
    Estimate(EstimateOptions),
}

#[derive(Debug, StructOpt)]
pub struct PackOptions {
    /// The layout file to pack. Files ending in .json are read as JSON, all
    /// other files as TOML.
    pub layout: PathBuf,

    /// Where to write the packed layout. Defaults to stdout.
    #[structopt(long, short)]
    pub output: Option<PathBuf>,

    /// Pack into a container of this size instead of the one from the layout
    /// file, given as WIDTHxHEIGHT.
    #[structopt(long, parse(try_from_str = parse_size))]
    pub container: Option<(u32, u32)>,
}

#[derive(Debug, StructOpt)]
pub struct EstimateOptions {
    /// The layout file to estimate a size for.
    pub layout: PathBuf,

    /// How to round the estimated size.
    ///
    /// Options: power-of-two, multiple-of-two, multiple-of-four, minimum
    #[structopt(long, default_value = "power-of-two")]
    pub mode: SizeMode,
}

pub(crate) fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let invalid = || format!("Invalid size '{}'. Sizes look like 256x128.", value);

    let (width, height) = value.split_once('x').ok_or_else(invalid)?;
    let width = width.trim().parse().map_err(|_| invalid())?;
    let height = height.trim().parse().map_err(|_| invalid())?;

    Ok((width, height))
}
