use booth_checkin::config::{CheckinConfig, ENV_SALT};
use booth_checkin::controller::{CheckinController, CheckinRequest};
use booth_checkin::gateway::HttpVoteGateway;
use booth_checkin::platform::{FixedLocation, HostFingerprint};
use booth_checkin::screen::TerminalScreen;
use booth_checkin::types::{BoothId, DisplayState, VisitorId};
use booth_checkin::{token, VERSION};
use chrono::Utc;
use clap::{value_parser, Arg, Command};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Command::new("booth-checkin")
        .version(VERSION)
        .about("Check-in client for an event-booth voting system")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("submit")
                .about("Run the check-in flow for a scanned QR URL")
                .arg(
                    Arg::new("url")
                        .long("url")
                        .required(true)
                        .help("The scanned QR code's target URL (carries the booth parameter)"),
                )
                .arg(
                    Arg::new("lat")
                        .long("lat")
                        .value_parser(value_parser!(f64))
                        .help("Latitude of the current position"),
                )
                .arg(
                    Arg::new("lng")
                        .long("lng")
                        .value_parser(value_parser!(f64))
                        .help("Longitude of the current position"),
                )
                .arg(
                    Arg::new("honey-pot")
                        .long("honey-pot")
                        .default_value("")
                        .hide(true)
                        .help("Honey-pot value, must stay empty for human traffic"),
                )
                .arg(
                    Arg::new("api-url")
                        .long("api-url")
                        .help("Vote endpoint URL (overrides CHECKIN_API_URL)"),
                )
                .arg(
                    Arg::new("salt")
                        .long("salt")
                        .help("Digest salt (overrides CHECKIN_SALT)"),
                )
                .arg(
                    Arg::new("delay-ms")
                        .long("delay-ms")
                        .value_parser(value_parser!(u64))
                        .help("Pre-submit delay in milliseconds"),
                ),
        )
        .subcommand(
            Command::new("token")
                .about("Derive a check-in token, for verifying parity with the backend")
                .arg(Arg::new("visitor").long("visitor").required(true))
                .arg(Arg::new("booth").long("booth").required(true))
                .arg(
                    Arg::new("timestamp")
                        .long("timestamp")
                        .value_parser(value_parser!(i64))
                        .help("Epoch milliseconds (defaults to now)"),
                )
                .arg(
                    Arg::new("salt")
                        .long("salt")
                        .help("Digest salt (overrides CHECKIN_SALT)"),
                ),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("submit", args)) => {
            let config = match load_config(
                args.get_one::<String>("api-url"),
                args.get_one::<String>("salt"),
                args.get_one::<u64>("delay-ms").copied(),
            ) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("configuration error: {e}");
                    std::process::exit(2);
                }
            };

            let location = match (
                args.get_one::<f64>("lat").copied(),
                args.get_one::<f64>("lng").copied(),
            ) {
                (Some(lat), Some(lng)) => FixedLocation::at(lat, lng),
                _ => FixedLocation::unavailable(),
            };

            let gateway = HttpVoteGateway::new(config.api_url.clone());
            let controller =
                CheckinController::new(config, location, HostFingerprint::new(), gateway);

            let url = args.get_one::<String>("url").cloned().unwrap_or_default();
            let honey_pot = args
                .get_one::<String>("honey-pot")
                .cloned()
                .unwrap_or_default();
            let request = CheckinRequest::new(url).with_honey_pot(honey_pot);

            let mut screen = TerminalScreen::default();
            let state = controller.run(&request, &mut screen).await;

            std::process::exit(if state == DisplayState::Success { 0 } else { 1 });
        }
        Some(("token", args)) => {
            let visitor = VisitorId::new(args.get_one::<String>("visitor").cloned().unwrap_or_default());
            let booth = BoothId::new(args.get_one::<String>("booth").cloned().unwrap_or_default());
            let timestamp = args
                .get_one::<i64>("timestamp")
                .copied()
                .unwrap_or_else(|| Utc::now().timestamp_millis());

            let salt = match args.get_one::<String>("salt").cloned() {
                Some(salt) => salt,
                None => match std::env::var(ENV_SALT) {
                    Ok(salt) => salt,
                    Err(_) => {
                        eprintln!("no salt given: pass --salt or set {ENV_SALT}");
                        std::process::exit(2);
                    }
                },
            };

            println!("{}", token::derive(&visitor, &booth, timestamp, &salt));
        }
        _ => {}
    }
}

fn load_config(
    api_url: Option<&String>,
    salt: Option<&String>,
    delay_ms: Option<u64>,
) -> Result<CheckinConfig, booth_checkin::ConfigError> {
    let mut config = match (api_url, salt) {
        (Some(api_url), Some(salt)) => CheckinConfig::new(api_url, salt),
        _ => {
            let mut config = CheckinConfig::from_env()?;
            if let Some(api_url) = api_url {
                config.api_url = api_url.clone();
            }
            if let Some(salt) = salt {
                config.salt = salt.clone();
            }
            config
        }
    };

    if let Some(delay_ms) = delay_ms {
        config = config.with_submit_delay(Duration::from_millis(delay_ms));
    }

    Ok(config)
}
