use anyhow::Context;
use clap::Parser;
use site_widgets::core::contact::SubmitOutcome;
use site_widgets::core::ConfigProvider;
use site_widgets::utils::error::ErrorSeverity;
use site_widgets::utils::logger::{self, LogFormat};
use site_widgets::utils::validation::Validate;
use site_widgets::{
    CliConfig, Command, ContactSubmitter, EmailRelayClient, GeoApiClient, LookupController,
    OutputFormat, Page, TerminalContactView, TerminalLookupView, TerminalMap, UiEvent,
    WidgetConfig, WidgetError,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

type TerminalLookup = LookupController<GeoApiClient, TerminalLookupView, TerminalMap>;
type TerminalPage =
    Page<GeoApiClient, TerminalLookupView, TerminalMap, EmailRelayClient, TerminalContactView>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(LogFormat::from_json_flag(cli.json_logs), cli.verbose);

    tracing::info!("Starting site-widgets");
    tracing::debug!("CLI config: {:?}", cli);

    let mut config = WidgetConfig::load(cli.config.as_deref()).with_context(|| {
        format!(
            "Failed to load config file '{}'",
            cli.config
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "site-widgets.toml".to_string())
        )
    })?;
    cli.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    match &cli.command {
        Command::Lookup { address, json } => {
            let format = if *json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            let widget = lookup_controller(&config, format).unwrap_or_else(|e| fail(&e));

            if let Err(e) = widget.lookup(address.as_deref()).await {
                exit_for(&e);
            }
        }
        Command::Contact { .. } => {
            let form = cli.command.contact_form().unwrap_or_default();
            let account = config.relay_account().unwrap_or_else(|e| fail(&e));
            let relay =
                EmailRelayClient::new(config.relay_endpoint(), account).unwrap_or_else(|e| fail(&e));
            let submitter = ContactSubmitter::new(relay, TerminalContactView::new(form));

            match submitter.on_submit().await {
                SubmitOutcome::Sent => {}
                SubmitOutcome::Rejected => std::process::exit(1),
                SubmitOutcome::Failed => std::process::exit(2),
            }
        }
        Command::Page => run_page(&config).await?,
    }

    Ok(())
}

fn lookup_controller(
    config: &WidgetConfig,
    format: OutputFormat,
) -> site_widgets::Result<TerminalLookup> {
    let provider = GeoApiClient::from_config(config)?;
    Ok(LookupController::new(
        provider,
        TerminalLookupView::new(format),
        TerminalMap::new(format),
    )
    .with_zoom(config.map_zoom()))
}

async fn run_page(config: &WidgetConfig) -> anyhow::Result<()> {
    let widget = lookup_controller(config, OutputFormat::Text)?;
    let page: Arc<TerminalPage> = Arc::new(Page::new(widget, None));

    let (tx, rx) = mpsc::channel(16);
    let event_loop = tokio::spawn(Arc::clone(&page).run(rx));

    println!("💡 Type an IP address or hostname and press Enter (empty line: your own address, Ctrl-D: quit)");
    tx.send(UiEvent::Ready).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        page.lookup().view().type_text(&line);
        // 輸入值在送出事件時就讀取，下一行輸入不會覆蓋尚未處理的查詢
        let event = if line.trim().is_empty() {
            page.click_event()
        } else {
            page.key_event("Enter")
        };
        tx.send(event).await?;
    }

    drop(tx);
    event_loop.await?;
    Ok(())
}

fn fail(e: &WidgetError) -> ! {
    tracing::error!("❌ {} (Category: {:?}, Severity: {:?})", e, e.category(), e.severity());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

// 錯誤已經顯示在畫面上，這裡只決定退出碼
fn exit_for(e: &WidgetError) {
    eprintln!("💡 {}", e.recovery_suggestion());
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}
