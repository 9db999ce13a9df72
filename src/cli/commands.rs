use anyhow::Result;

use crate::config::Config;

use super::args::{Cli, Command};
use super::config_cmd;
use super::parse;
use super::run;
use super::slides;

pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Parse(args) => parse::handle_parse(args),
        Command::Config(args) => {
            let mut config = Config::load()?;
            config_cmd::handle_config(args, &mut config)
        }
        Command::Run(args) => {
            let config = Config::load()?;
            config.validate()?;
            run::handle_run(args, &config).await
        }
        Command::Slides(args) => {
            let config = Config::load()?;
            config.validate()?;
            slides::handle_slides(args, &config).await
        }
    }
}
