#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::process::ExitCode;

use args::{Args, Command, ConfigureArgs, GenerateArgs};
use clap::Parser;
use easel_config::{
    ApiConfig, AuthConfig, AuthorizationType, Config, ConfigOverride, EndpointConfig, EndpointPaths,
    IMAGE_GENERATOR_API, format_region_name,
};
use easel_imagegen::{GenerationParameters, SIZE_OPTIONS, STYLE_PRESETS, format_image_size};
use easel_studio::{Studio, StudioError};
use indexmap::IndexMap;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        Config::default()
    };

    easel_telemetry::init(config.telemetry.as_ref(), &args.log)?;

    tracing::debug!(config_path = %args.config.display(), "starting easel");

    let mut studio = Studio::from_config(config);
    studio.start().await;

    match run(&mut studio, args.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            let alert = e.alert();
            eprintln!("{}: {}", alert.title, alert.message);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(studio: &mut Studio, command: Command) -> Result<(), StudioError> {
    match command {
        Command::Generate(generate) => run_generate(studio, generate).await,
        Command::Styles => {
            println!("Styles:");
            for preset in &STYLE_PRESETS {
                println!("  {:<14} {} ({})", preset.id, preset.name, preset.description);
            }
            println!("Sizes:");
            for size in &SIZE_OPTIONS {
                println!("  {:<14} {}", format_image_size(size.id), size.name);
            }
            Ok(())
        }
        Command::Gallery => {
            for asset in studio.gallery()? {
                println!("{}  {}  {}", asset.created_at, asset.id, asset.path.display());
            }
            Ok(())
        }
        Command::Configure(configure) => {
            let stored = studio.update_config(config_override(configure)).await?;
            println!(
                "Saved configuration for {} at {}",
                format_region_name(&stored.region),
                stored.timestamp
            );
            if studio.credentials().is_none() && studio.config().has_identity_pool() {
                println!("Credentials could not be obtained; requests will be sent unsigned.");
            }
            Ok(())
        }
        Command::RefreshCredentials => {
            let credentials = studio.refresh_credentials().await?;
            println!(
                "Credentials refreshed for {}",
                credentials.identity_id.as_deref().unwrap_or("unknown identity")
            );
            Ok(())
        }
        Command::ClearSettings => {
            studio.clear_settings()?;
            println!("Settings cleared");
            Ok(())
        }
    }
}

async fn run_generate(studio: &mut Studio, args: GenerateArgs) -> Result<(), StudioError> {
    let mut parameters = GenerationParameters {
        prompt: args.prompt,
        style: args.style,
        cfg_scale: args.cfg_scale,
        steps: args.steps,
        size: args.size,
        ..GenerationParameters::default()
    };
    if let Some(seed) = args.seed {
        parameters.seed = seed;
    }

    let record = studio.generate(&parameters).await?;

    if args.json {
        match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!(error = %e, "failed to encode record"),
        }
    } else {
        println!("Generated image {} for \"{}\"", record.id, record.metadata.prompt);
    }

    if args.save {
        let saved = studio.save_image(&record)?;
        println!("Saved as asset {}", saved.asset_id);
    }

    if args.share {
        studio.share_image(&record)?;
        println!("Shared");
    }

    Ok(())
}

fn config_override(args: ConfigureArgs) -> ConfigOverride {
    let api = args.endpoint.map(|endpoint| {
        let mut api = ApiConfig::default();
        api.endpoints.insert(
            IMAGE_GENERATOR_API.to_string(),
            EndpointConfig {
                endpoint,
                authorization_type: if args.unsigned {
                    AuthorizationType::None
                } else {
                    AuthorizationType::AwsIam
                },
                region: None,
                paths: EndpointPaths {
                    generate_image: args.generate_image_path,
                },
                headers: IndexMap::new(),
            },
        );
        api
    });

    ConfigOverride {
        region: args.region,
        auth: args.identity_pool_id.map(|identity_pool_id| AuthConfig {
            identity_pool_id,
            region: None,
            mandatory_sign_in: false,
        }),
        api,
    }
}
