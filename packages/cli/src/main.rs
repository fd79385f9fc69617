//! wanderwave CLI binary
//! Streams location-aware generative music to the local output device.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

mod cli;
mod console;
use cli::{Cli, Commands, LocationArgs, PlayCommand, PreferenceArgs, PromptsCommand};
use console::{ConsoleCommand, HELP};

use wanderwave_composer::{ComposeInput, compose, session_prompts};
use wanderwave_context::{
    ContextResolver, ContextSnapshot, GooglePlaces, OpenMeteo, ProviderError, SpotifyHistory,
};
use wanderwave_domain::{AudioDevice, DeviceSpec, MusicConnector, Tempo, WeightedPrompt};
use wanderwave_lyria::LyriaConnector;
use wanderwave_session::{
    CpalDevice, DeviceOpener, Preferences, SessionController, SessionStatus, WanderConfig,
    compose_input, default_output_device_name, list_output_devices, logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init(logging::DEFAULT_DIRECTIVE).map_err(anyhow::Error::msg)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(cmd) => {
            let config = WanderConfig::load(cli.config.as_deref()).await?;
            play(config, cmd).await
        }
        Commands::Prompts(cmd) => {
            let config = WanderConfig::load(cli.config.as_deref()).await?;
            print_composed(config, cmd).await
        }
        Commands::Devices => list_devices(),
    }
}

async fn play(config: WanderConfig, cmd: PlayCommand) -> Result<()> {
    let snapshot = resolve_context(&config, &cmd.location).await;
    let tempo = starting_tempo(&config, &cmd.preferences)?;

    let device = cmd.device.or_else(|| config.audio.output_device.clone());
    let ring_buffer_ms = config.audio.ring_buffer_ms;
    let open_device: DeviceOpener = Arc::new(move || {
        CpalDevice::open(device.as_deref(), DeviceSpec::default(), ring_buffer_ms)
            .map(|device| Box::new(device) as Box<dyn AudioDevice>)
    });

    let controller = SessionController::new(
        LyriaConnector::new(config.session.endpoint.clone()),
        config.credentials.generation_key.clone(),
        config.orchestrator(),
        open_device,
        tempo,
    );

    let mut preferences = preferences(&cmd.preferences);
    print_prompts("active prompts", &controller.apply_context(&snapshot, &preferences));
    controller
        .start()
        .context("set GOOGLE_API_KEY or GEMINI_API_KEY to stream")?;
    println!("{HELP}");

    let mut running = controller.state().subscribe_running();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, stopping session");
                break;
            }
            _ = running.wait_for(|running| !*running) => break,
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => {
                    if handle_line(&controller, &snapshot, &mut preferences, &line) {
                        break;
                    }
                }
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!("stdin closed: {e}");
                    stdin_open = false;
                }
            },
        }
    }

    controller.stop();
    let report = controller
        .wait()
        .await
        .context("session ended with an error")?;
    if let Some(report) = report {
        info!(
            frames_received = report.frames_received,
            frames_written = report.playback.frames_written,
            frames_dropped = report.playback.frames_dropped,
            "session ended"
        );
    }
    Ok(())
}

/// Apply one console line. Returns true when the listener asked to stop.
fn handle_line<C: MusicConnector + 'static>(
    controller: &SessionController<C>,
    snapshot: &ContextSnapshot,
    preferences: &mut Preferences,
    line: &str,
) -> bool {
    let command = match ConsoleCommand::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return false,
        Err(e) => {
            println!("{e}; {HELP}");
            return false;
        }
    };

    match command {
        ConsoleCommand::Tempo(bpm) => match controller.set_tempo(bpm) {
            Ok(tempo) => println!("tempo set to {tempo} bpm"),
            Err(e) => println!("{e}"),
        },
        ConsoleCommand::Genre(genre) => {
            preferences.genre = genre;
            print_prompts("active prompts", &controller.apply_context(snapshot, preferences));
        }
        ConsoleCommand::Experience(experience) => {
            preferences.experience = experience;
            print_prompts("active prompts", &controller.apply_context(snapshot, preferences));
        }
        ConsoleCommand::Status => print_status(&controller.status()),
        ConsoleCommand::Help => println!("{HELP}"),
        ConsoleCommand::Stop => return true,
    }
    false
}

async fn print_composed(config: WanderConfig, cmd: PromptsCommand) -> Result<()> {
    let snapshot = resolve_context(&config, &cmd.location).await;
    let tempo = starting_tempo(&config, &cmd.preferences)?;
    let hour = cmd
        .hour
        .unwrap_or_else(|| ComposeInput::at_local_time(tempo).hour);

    let composed = compose(&compose_input(
        hour,
        tempo,
        &snapshot,
        &preferences(&cmd.preferences),
    ));
    print_prompts(&format!("composed for {hour:02}:00"), &composed);
    print_prompts(
        &format!("pushed at {tempo} bpm"),
        &session_prompts(&composed, tempo),
    );
    Ok(())
}

fn list_devices() -> Result<()> {
    let default = default_output_device_name();
    let devices = list_output_devices()?;
    if devices.is_empty() {
        println!("no output devices found");
    }
    for name in devices {
        let marker = if default.as_deref() == Some(name.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{marker} {name}");
    }
    Ok(())
}

/// Look up the listener's surroundings. Lookup failures only ever mean
/// less context; without a location only the time of day and listening
/// history contribute.
async fn resolve_context(config: &WanderConfig, location: &LocationArgs) -> ContextSnapshot {
    let timeout = config.http_timeout();
    let mut resolver = ContextResolver::new();

    match config.credentials.spotify_token.as_deref() {
        Some(token) => match SpotifyHistory::new(token, timeout) {
            Ok(history) => {
                resolver = resolver.with_history(Arc::new(history), config.context.history_limit);
            }
            Err(e) => warn!("listening history disabled: {e}"),
        },
        None => info!("no spotify token configured, skipping listening history"),
    }

    let open_meteo = match OpenMeteo::new(timeout) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!("weather and city lookups disabled: {e}");
            None
        }
    };

    let geocoder = open_meteo.clone();
    let coordinates = coordinates(location, |city| async move {
        match geocoder {
            Some(client) => client.geocode_city(&city).await,
            None => Err(ProviderError::Decode {
                service: "open-meteo geocoding",
                reason: "http client unavailable".to_string(),
            }),
        }
    })
    .await;

    let Some((lat, lon)) = coordinates else {
        return ContextSnapshot {
            history_styles: resolver.history_styles().await,
            ..ContextSnapshot::default()
        };
    };

    if let Some(client) = open_meteo {
        resolver = resolver.with_weather(client);
    }
    match config.credentials.places_key.as_deref() {
        Some(key) => match GooglePlaces::new(key, timeout) {
            Ok(places) => {
                resolver = resolver.with_places(Arc::new(
                    places
                        .with_radius(config.context.nearby_radius_m)
                        .with_max_results(config.context.nearby_max_results),
                ));
            }
            Err(e) => warn!("place lookups disabled: {e}"),
        },
        None => info!("no places key configured, skipping place lookups"),
    }

    resolver.resolve(lat, lon).await
}

/// Coordinates for `location`. A city that cannot be found or looked up is
/// logged and treated as no location.
async fn coordinates<F, Fut, E>(location: &LocationArgs, geocode: F) -> Option<(f64, f64)>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<Option<(f64, f64)>, E>>,
    E: std::fmt::Display,
{
    match (&location.city, location.lat, location.lon) {
        (Some(city), _, _) => match geocode(city.clone()).await {
            Ok(Some(coordinates)) => Some(coordinates),
            Ok(None) => {
                warn!(%city, "no location found, composing without place context");
                None
            }
            Err(e) => {
                warn!(%city, "city lookup failed, composing without place context: {e}");
                None
            }
        },
        (None, Some(lat), Some(lon)) => Some((lat, lon)),
        _ => {
            info!("no location given, composing from the time of day only");
            None
        }
    }
}

fn starting_tempo(config: &WanderConfig, args: &PreferenceArgs) -> Result<Tempo> {
    match args.tempo {
        Some(bpm) => Ok(Tempo::new(bpm)?),
        None => Ok(config.initial_tempo()),
    }
}

fn preferences(args: &PreferenceArgs) -> Preferences {
    Preferences {
        genre: args.genre.clone(),
        experience: args.experience.clone(),
    }
}

fn print_prompts(title: &str, prompts: &[WeightedPrompt]) {
    println!("{title}:");
    for prompt in prompts {
        println!("  {prompt}");
    }
}

fn print_status(status: &SessionStatus) {
    match serde_json::to_string_pretty(status) {
        Ok(json) => println!("{json}"),
        Err(e) => warn!("failed to render status: {e}"),
    }
}
