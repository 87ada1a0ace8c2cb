use crate::{
    cli::{Cli, Commands, ProjectArgs, RenderArgs},
    config::{Config, ConfigV1},
    constants::STDIN_INDICATOR,
    error::{Error, Result},
    template::{ident, TemplateSet},
};
use log::debug;
use std::io::Read;

/// Loads the configuration under `args.dir` and builds its template set.
fn load(args: &ProjectArgs) -> Result<(ConfigV1, TemplateSet)> {
    let Config::V1(config) = Config::load_config(&args.dir)?;
    config.validate()?;
    let set = config.build_template_set(&args.dir)?;
    Ok((config, set))
}

fn read_context(context: Option<&str>) -> Result<serde_json::Value> {
    match context {
        None => Ok(serde_json::json!({})),
        Some(STDIN_INDICATOR) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(serde_json::from_str(&buf)?)
        }
        Some(json) => Ok(serde_json::from_str(json)?),
    }
}

fn check(args: &ProjectArgs) -> Result<()> {
    let (_, set) = load(args)?;
    println!("built {} templates for {} applications", set.len(), set.apps().count());
    Ok(())
}

fn list(args: &ProjectArgs) -> Result<()> {
    let (_, set) = load(args)?;
    for id in set.idents() {
        println!("{id}");
    }
    Ok(())
}

fn render(args: &RenderArgs) -> Result<()> {
    let (config, set) = load(&args.project)?;
    if !set.contains_app(&args.app) {
        return Err(Error::UnknownApplication(args.app.clone()));
    }
    let layout = args.layout.as_deref().unwrap_or(&config.default_layout);
    let context = read_context(args.context.as_deref())?;
    debug!("Rendering {}", ident(&args.app, layout, &args.name, &args.format));

    let unit = set.get(&args.app, layout, &args.name, &args.format).ok_or_else(|| {
        Error::TemplateNotFound { ident: ident(&args.app, layout, &args.name, &args.format) }
    })?;
    print!("{}", unit.render(&context)?);
    Ok(())
}

/// Main entry point for CLI execution
pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Check(args) => check(args),
        Commands::List(args) => list(args),
        Commands::Render(args) => render(args),
    }
}
