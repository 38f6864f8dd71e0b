//! Plan file loading.
//!
//! Plan files are plain text, one command per line:
//!
//! ```text
//! Transfer 30 London
//! Transfer 120 Paris
//! Time 90 London Paris
//! Trip London Paris
//! ```
//!
//! `Transfer` declares a city and its transfer time, `Time` connects two
//! declared cities with a road, and `Trip` requires the journey to ride
//! the road between two cities, in that direction. Lines apply in order:
//! a `Trip` snapshots the first matching road declared so far, so it must
//! come after that road's `Time` line. Blank lines are ignored, and lines
//! opening with an unknown word are skipped with a warning.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::{CityName, InvalidCityName, Route};
use crate::network::{NetworkBuilder, NetworkError, TripNetwork};

/// Error from a single plan line, independent of its position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The first word is not a known command.
    #[error("unrecognized command `{0}`")]
    Unrecognized(String),

    /// Wrong number of fields after the command word.
    #[error("`{command}` expects {expected} fields, found {found}")]
    FieldCount {
        command: &'static str,
        expected: usize,
        found: usize,
    },

    /// A minutes field is not a non-negative integer.
    #[error("invalid minutes value `{0}`")]
    InvalidMinutes(String),

    /// A city field is not a usable city name.
    #[error("invalid city `{value}`: {source}")]
    InvalidCity {
        value: String,
        source: InvalidCityName,
    },
}

/// Error from loading a plan file.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Reading the input failed.
    #[error("failed to read plan input: {0}")]
    Io(#[from] std::io::Error),

    /// A line failed to parse.
    #[error("line {line}: {source}")]
    Command { line: usize, source: CommandError },

    /// A line parsed but contradicts the network built so far.
    #[error("line {line}: {source}")]
    Network { line: usize, source: NetworkError },
}

/// One parsed plan command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `Transfer <minutes> <city>`: declare a city and its transfer time.
    DeclareCity {
        transfer_minutes: u32,
        name: CityName,
    },

    /// `Time <minutes> <a> <b>`: connect two cities with a road.
    Connect { minutes: u32, a: CityName, b: CityName },

    /// `Trip <from> <to>`: require the journey to ride this road.
    RequireTrip { from: CityName, to: CityName },
}

impl Command {
    /// Parse one line of a plan file.
    ///
    /// Returns `Ok(None)` for blank lines. An unknown command word is an
    /// error, so the caller can choose whether to skip the line.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, args)) = fields.split_first() else {
            return Ok(None);
        };

        let command = match keyword {
            "Transfer" => match args {
                [minutes, name] => Command::DeclareCity {
                    transfer_minutes: parse_minutes(minutes)?,
                    name: parse_city(name)?,
                },
                _ => return Err(field_count("Transfer", 2, args.len())),
            },
            "Time" => match args {
                [minutes, a, b] => Command::Connect {
                    minutes: parse_minutes(minutes)?,
                    a: parse_city(a)?,
                    b: parse_city(b)?,
                },
                _ => return Err(field_count("Time", 3, args.len())),
            },
            "Trip" => match args {
                [from, to] => Command::RequireTrip {
                    from: parse_city(from)?,
                    to: parse_city(to)?,
                },
                _ => return Err(field_count("Trip", 2, args.len())),
            },
            other => return Err(CommandError::Unrecognized(other.to_owned())),
        };

        Ok(Some(command))
    }
}

fn field_count(command: &'static str, expected: usize, found: usize) -> CommandError {
    CommandError::FieldCount {
        command,
        expected,
        found,
    }
}

fn parse_minutes(value: &str) -> Result<u32, CommandError> {
    value
        .parse()
        .map_err(|_| CommandError::InvalidMinutes(value.to_owned()))
}

fn parse_city(value: &str) -> Result<CityName, CommandError> {
    CityName::parse(value).map_err(|source| CommandError::InvalidCity {
        value: value.to_owned(),
        source,
    })
}

/// A fully loaded plan: the network plus the trips a journey must ride.
#[derive(Debug)]
pub struct TripPlan {
    /// The frozen city network.
    pub network: TripNetwork,

    /// Required trips, in the order the plan declared them.
    pub required_trips: Vec<Route>,

    /// Number of unrecognized lines that were skipped.
    pub skipped_lines: usize,
}

impl TripPlan {
    /// Load a plan from a buffered reader.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors and on any malformed or inapplicable line,
    /// reporting its 1-based line number. Unrecognized command words are
    /// not errors; those lines are counted and skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, InputError> {
        let mut builder = NetworkBuilder::new();
        let mut required_trips = Vec::new();
        let mut skipped_lines = 0;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;

            match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(command)) => {
                    apply_command(command, &mut builder, &mut required_trips)
                        .map_err(|source| InputError::Network {
                            line: line_no,
                            source,
                        })?;
                }
                Err(CommandError::Unrecognized(keyword)) => {
                    warn!(line = line_no, keyword = %keyword, "skipping unrecognized command");
                    skipped_lines += 1;
                }
                Err(source) => {
                    return Err(InputError::Command {
                        line: line_no,
                        source,
                    });
                }
            }
        }

        let network = builder.build();
        debug!(
            cities = network.city_count(),
            routes = network.route_count(),
            trips = required_trips.len(),
            skipped = skipped_lines,
            "trip plan loaded"
        );

        Ok(Self {
            network,
            required_trips,
            skipped_lines,
        })
    }

    /// Load a plan from a file.
    ///
    /// # Errors
    ///
    /// As [`TripPlan::from_reader`], plus failure to open the file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

fn apply_command(
    command: Command,
    builder: &mut NetworkBuilder,
    required_trips: &mut Vec<Route>,
) -> Result<(), NetworkError> {
    match command {
        Command::DeclareCity {
            transfer_minutes,
            name,
        } => builder.add_city(name, transfer_minutes),
        Command::Connect { minutes, a, b } => builder.connect(&a, &b, minutes),
        Command::RequireTrip { from, to } => {
            let trip = builder.required_trip(&from, &to)?;
            required_trips.push(trip);
            Ok(())
        }
    }
}
