mod args;
mod commands;
mod config_cmd;
mod parse;
mod run;
mod slides;
mod util;

pub use args::Cli;
