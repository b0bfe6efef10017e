use clap::Parser;
use schedule_selection::cli::commands::{cmd_evaluate, cmd_map, cmd_map_url, cmd_replay};
use schedule_selection::cli::config::{
    Cli, Commands, build_bootstrap_config, build_controller_config, load_config,
};
use schedule_selection::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Evaluate {
            page,
            render_policy,
            submit_policy,
            format,
        } => {
            let controller_config = build_controller_config(render_policy, submit_policy, &config);
            cmd_evaluate(&page, controller_config, format)?;
        }
        Commands::Replay {
            script,
            render_policy,
            submit_policy,
            trace,
            format,
        } => {
            let controller_config = build_controller_config(render_policy, submit_policy, &config);
            // Resolve trace path: CLI > config
            let trace_path = trace.as_deref().or(config.trace.path.as_deref());
            cmd_replay(&script, controller_config, trace_path, format)?;
        }
        Commands::MapUrl { api_key, libraries } => {
            let bootstrap = build_bootstrap_config(api_key.as_deref(), &config);
            cmd_map_url(&bootstrap, &libraries)?;
        }
        Commands::Map { api_key } => {
            let bootstrap = build_bootstrap_config(api_key.as_deref(), &config);
            cmd_map(bootstrap, &config.map.options)?;
        }
    }

    Ok(())
}
