use anyhow::Result;

use kubetable::{app::App, cmd::Command, config::Config, logging::Logger};

fn main() -> Result<()> {
    let cmd = Command::init();

    let config = Config::load(cmd.config_load_option()?)?;

    if cmd.logging {
        Logger::init(&config.logging)?;
    }

    if let Some(subcommand) = cmd.subcommand.clone() {
        return subcommand.run(&cmd);
    }

    App::run(cmd, config)
}
