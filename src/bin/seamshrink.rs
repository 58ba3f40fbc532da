// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use std::process;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use failure::{Error, ResultExt};
use image::{Rgb, RgbImage};
use log::{info, LevelFilter};
use seamshrink::{calculate_energy, energy_to_image, SeamCarver};

fn parse_color(hex: &str) -> Result<Rgb<u8>, String> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected a color as RRGGBB, got '{}'", hex));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| format!("'{}' is not a hexadecimal color", hex))
    };
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

fn cli() -> Command {
    Command::new("seamshrink")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Shrink an image by removing its least noticeable seams")
        .arg(
            Arg::new("input")
                .help("The image to shrink")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Where to write the result; the format follows the extension")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("width")
                .short('w')
                .long("width")
                .help("Target width in pixels [default: half the input width]")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("height")
                .short('H')
                .long("height")
                .help("Target height in pixels [default: half the input height]")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("show-seam")
                .long("show-seam")
                .help("Write the image with its next seam painted on instead of carving it")
                .value_parser(["vertical", "horizontal"])
                .conflicts_with("energy"),
        )
        .arg(
            Arg::new("seam-color")
                .long("seam-color")
                .help("Color of the painted seam, as RRGGBB")
                .default_value("ff0000")
                .value_parser(parse_color),
        )
        .arg(
            Arg::new("thickness")
                .long("thickness")
                .help("Thickness of the painted seam in pixels")
                .default_value("1")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("energy")
                .long("energy")
                .help("Write the energy map of the input instead of carving it")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["width", "height"]),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log more; repeat for more detail")
                .action(ArgAction::Count),
        )
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn target(matches: &ArgMatches, name: &str, current: u32) -> u32 {
    matches
        .get_one::<u32>(name)
        .copied()
        .unwrap_or_else(|| (current / 2).max(1))
}

fn carve(matches: &ArgMatches, image: RgbImage) -> Result<RgbImage, Error> {
    let (width, height) = image.dimensions();
    let mut carver = SeamCarver::new(image)?;

    let show = matches.get_one::<String>("show-seam");
    let explicit_size = matches.contains_id("width") || matches.contains_id("height");
    if show.is_none() || explicit_size {
        let (target_width, target_height) = (
            target(matches, "width", width),
            target(matches, "height", height),
        );
        carver
            .shrink(target_width, target_height)
            .with_context(|_| {
                format!(
                    "cannot shrink {}x{} to {}x{}",
                    width, height, target_width, target_height
                )
            })?;
    }

    let color = matches
        .get_one::<Rgb<u8>>("seam-color")
        .copied()
        .unwrap_or(Rgb([255, 0, 0]));
    let thickness = matches.get_one::<u32>("thickness").copied().unwrap_or(1);
    Ok(match show.map(String::as_str) {
        Some("vertical") => carver.show_vertical(color, thickness),
        Some("horizontal") => carver.show_horizontal(color, thickness),
        _ => carver.into_image(),
    })
}

fn run() -> Result<(), Error> {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let input = matches
        .get_one::<PathBuf>("input")
        .ok_or_else(|| failure::err_msg("no input file given"))?;
    let output = matches
        .get_one::<PathBuf>("output")
        .ok_or_else(|| failure::err_msg("no output file given"))?;

    let image = image::open(input)
        .with_context(|_| format!("could not read {}", input.display()))?
        .to_rgb8();
    info!(
        "read {} ({}x{})",
        input.display(),
        image.width(),
        image.height()
    );

    if matches.get_flag("energy") {
        energy_to_image(&calculate_energy(&image))
            .save(output)
            .with_context(|_| format!("could not write {}", output.display()))?;
    } else {
        let result = carve(&matches, image)?;
        result
            .save(output)
            .with_context(|_| format!("could not write {}", output.display()))?;
        info!(
            "wrote {} ({}x{})",
            output.display(),
            result.width(),
            result.height()
        );
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("seamshrink: {}", err);
        for cause in err.iter_causes() {
            eprintln!("  caused by: {}", cause);
        }
        process::exit(1);
    }
}
