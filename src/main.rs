use clap::Parser;
use mobility_map::utils::error::{ErrorSeverity, MapError};
use mobility_map::utils::{logger, validation::Validate};
use mobility_map::{CliConfig, MobilityMap, OutputFormat, TomlConfig};

fn exit_code(e: &MapError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: MapError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e).max(1));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting mobility-map");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    // 驗證配置
    if let Err(e) = args.validate() {
        fail(e);
    }

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let map = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = TomlConfig::from_file(path)
                .and_then(|config| config.validate().map(|_| config))
                .unwrap_or_else(|e| fail(e));
            MobilityMap::from_config(&config, format)
        }
        None => MobilityMap::from_config(&args, format),
    }
    .unwrap_or_else(|e| fail(e));

    let position = args.position().unwrap_or_else(|e| fail(e));
    map.load(position).await;

    if let Some(stop_id) = &args.stop {
        if !map.session().select_stop(stop_id) {
            tracing::warn!("Stop {} is not among the nearby stops", stop_id);
        }
    }

    let mut stdout = std::io::stdout();
    match map.render() {
        Ok(output) => println!("{}", output),
        Err(e) => fail(e),
    }

    if args.interactive {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        if let Err(e) = map.run_interactive(stdin, &mut stdout).await {
            map.shutdown();
            let code = exit_code(&e);
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            if code > 0 {
                std::process::exit(code);
            }
        }
    }

    map.shutdown();
    Ok(())
}
