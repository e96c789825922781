#![doc = "rules-collector: gathers rule folders and their GitHub contributors into one JSON document."]

//! The pipeline runs strictly in sequence: [`scan`] lists rule directories,
//! [`rule`] loads each one, [`contributors`] asks GitHub who edited the rule
//! file, and [`output`] writes the result. [`collect`] ties the stages
//! together and [`cli`] wraps it for the binary.

pub mod cli;
pub mod collect;
pub mod config;
pub mod contributors;
pub mod error;
pub mod load_config;
pub mod output;
pub mod rule;
pub mod scan;

pub use cli::{run, Cli};
pub use collect::{collect_rules, CollectReport};
pub use config::{CollectConfig, ContributorsField};
pub use error::CollectError;
