// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate indicatif;
extern crate mandelbrot;
extern crate num;

use clap::{App, Arg, ArgMatches};
use indicatif::{ProgressBar, ProgressStyle};
use mandelbrot::output::write_image;
use mandelbrot::palette;
use mandelbrot::{CancelSignal, RenderConfig};
use num::Complex;
use std::str::FromStr;
use std::time::Instant;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const START: &str = "start";
const END: &str = "end";
const BAILOUT: &str = "bailout";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const QUIET: &str = "quiet";

// Default values, spelled the way they are typed on the command line.
struct Defaults {
    size: String,
    start: String,
    end: String,
    threads: String,
}

impl Defaults {
    fn new(config: &RenderConfig) -> Defaults {
        Defaults {
            size: format!("{}x{}", config.width, config.height),
            start: format!("{},{}", config.start.re, config.start.im),
            end: format!("{},{}", config.end.re, config.end.im),
            threads: config.parallelism.to_string(),
        }
    }
}

fn args(defaults: &Defaults) -> ArgMatches {
    App::new("mandelbrot")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Strip-parallel Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("image.png")
                .help("Output file; .ppm or .pnm for a pixmap, otherwise PNG"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value(&defaults.size)
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(START)
                .long(START)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value(&defaults.start)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse start corner"))
                .help("Point of the complex plane under the first pixel"),
        )
        .arg(
            Arg::with_name(END)
                .long(END)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value(&defaults.end)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse end corner"))
                .help("Point of the complex plane just past the last pixel"),
        )
        .arg(
            Arg::with_name(BAILOUT)
                .long(BAILOUT)
                .short("b")
                .takes_value(true)
                .default_value("2.0")
                .validator(|s| {
                    validate_range(
                        &s,
                        ::std::f64::MIN_POSITIVE,
                        ::std::f64::MAX,
                        "Could not parse bailout radius",
                        "Bailout radius must be positive",
                    )
                })
                .help("Escape radius"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("255")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        255,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 255",
                    )
                })
                .help("Maximum iterations per pixel"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value(&defaults.threads)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        usize::max_value(),
                        "Could not parse thread count",
                        "Thread count must be at least 1",
                    )
                })
                .help("Number of strips to render in parallel"),
        )
        .arg(
            Arg::with_name(QUIET)
                .long(QUIET)
                .short("q")
                .help("Do not show a progress bar"),
        )
        .get_matches()
}

fn config(matches: &ArgMatches, defaults: RenderConfig) -> RenderConfig {
    let (width, height) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair(s, 'x'))
        .unwrap_or((defaults.width, defaults.height));
    RenderConfig {
        width,
        height,
        start: matches
            .value_of(START)
            .and_then(parse_complex)
            .unwrap_or(defaults.start),
        end: matches
            .value_of(END)
            .and_then(parse_complex)
            .unwrap_or(defaults.end),
        bailout: matches
            .value_of(BAILOUT)
            .and_then(|s| f64::from_str(s).ok())
            .unwrap_or(defaults.bailout),
        max_iterations: matches
            .value_of(ITERATIONS)
            .and_then(|s| usize::from_str(s).ok())
            .unwrap_or(defaults.max_iterations),
        parallelism: matches
            .value_of(THREADS)
            .and_then(|s| usize::from_str(s).ok())
            .unwrap_or(defaults.parallelism),
    }
}

fn run() -> Result<(), failure::Error> {
    let defaults = RenderConfig::default();
    let spelled = Defaults::new(&defaults);
    let matches = args(&spelled);
    let config = config(&matches, defaults);
    config.validate()?;

    let total = config.bounds().len() as u64;
    let bar = if matches.is_present(QUIET) {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total)
    };
    bar.set_style(ProgressStyle::default_bar().template("{wide_bar} {pos}/{len} ({eta})"));

    let began = Instant::now();
    let img = config.render(|done| bar.set_position(done as u64), &CancelSignal::never())?;
    bar.finish_and_clear();
    eprintln!(
        "Finished rendering in {:?} on {} threads",
        began.elapsed(),
        config.parallelism
    );

    let colours = palette::generate(config.max_iterations + 1);
    write_image(matches.value_of(OUTPUT).unwrap_or("image.png"), &img, &colours)?;
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
