//! Library side of the `geolink` command: logging setup and the pipeline
//! stages the subcommands compose.

pub mod logging;
pub mod pipeline;
