use clap::Parser;
use nss_scope::core::{report, ReportSink, ScopeSummary};
use nss_scope::utils::logger;
use nss_scope::{
    CliArgs, ConsoleSink, FileConfig, FileSink, HttpDocumentSource, PhabricatorClient,
    ScopeEngine, ScopeError, ScopePipeline, Settings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::debug!("CLI args: {:?}", args);
    print!("{}", report::banner());

    // 載入配置
    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(e) => fail(e),
    };

    // 連線 Phabricator（dry run 時略過）
    let search = if args.dry_run {
        tracing::info!("🔍 Dry run: Phabricator lookups are skipped");
        None
    } else {
        match connect(&settings).await {
            Ok(phab) => Some(phab),
            Err(e) => fail(e),
        }
    };

    let result = match &args.output {
        Some(path) => match FileSink::create(path) {
            Ok(sink) => run_report(settings, search, sink).await,
            Err(e) => Err(e),
        },
        None => run_report(settings, search, ConsoleSink).await,
    };

    match result {
        Ok(summary) => {
            tracing::info!(
                "✅ Scoping of {} completed at {}",
                summary.release,
                summary.generated_at.to_rfc3339()
            );
            if args.log_json {
                match serde_json::to_string(&summary) {
                    Ok(json) => tracing::info!(summary = %json, "scope summary"),
                    Err(e) => tracing::warn!("Could not serialize scope summary: {}", e),
                }
            }
            if let Some(path) = &args.output {
                tracing::info!("📁 Report saved to: {}", path);
            }
        }
        Err(e) => fail(e),
    }

    Ok(())
}

fn load_settings(args: &CliArgs) -> nss_scope::Result<Settings> {
    let path = args.config_path();
    tracing::debug!("📁 Loading configuration from: {}", path);

    let file = FileConfig::load(path, args.config.is_some())?;
    let settings = Settings::resolve(file, args.release.as_deref())?;

    if let Some(output) = &args.output {
        nss_scope::utils::validation::validate_path("output", output)?;
    }

    tracing::debug!("Settings: {:?}", settings.release);
    Ok(settings)
}

async fn connect(settings: &Settings) -> nss_scope::Result<PhabricatorClient> {
    let token = settings.phabricator_token()?;
    PhabricatorClient::connect(&settings.phabricator_host, token).await
}

async fn run_report<O: ReportSink>(
    settings: Settings,
    search: Option<PhabricatorClient>,
    sink: O,
) -> nss_scope::Result<ScopeSummary> {
    let pipeline = ScopePipeline::new(HttpDocumentSource::default(), search, sink, settings);
    ScopeEngine::new(pipeline).run().await
}

fn fail(e: ScopeError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
