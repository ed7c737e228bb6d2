extern crate clap;

use crate::clap::Parser;
use minpq::cli::*;

pub fn main() {
    Cli::parse().run();
}
