use anyhow::Context;
use clap::Parser;
use doctor_directory::app::command::{Command, HELP};
use doctor_directory::app::export::{self, OutputFormat};
use doctor_directory::app::render;
use doctor_directory::core::ConfigProvider;
use doctor_directory::utils::error::ErrorSeverity;
use doctor_directory::utils::{logger, validation::Validate};
use doctor_directory::{AddressBar, CliConfig, DirectoryPage, HttpPractitionerSource, PageView};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting doctor-directory");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    };

    let navigator =
        AddressBar::new(settings.page_url()).context("page URL was validated but failed to parse")?;
    let mut page = DirectoryPage::new(navigator).with_suggestion_limit(settings.suggestion_limit());

    let source = HttpPractitionerSource::new(settings.api_endpoint());
    tracing::info!("📡 Fetching practitioners from {}", source.endpoint());
    if cli.interactive || cli.format == OutputFormat::Text {
        println!("{}", render::render_results(&page.view()));
    }
    page.load_with(&source).await;

    if cli.interactive {
        println!("{}", render::render_page(&page));
        run_interactive(&mut page).await?;
        return Ok(());
    }

    match cli.format {
        OutputFormat::Text => print!("{}", render::render_page(&page)),
        OutputFormat::Csv => print!("{}", export::to_csv(&current_records(&page))?),
        OutputFormat::Json => println!("{}", export::to_json(&current_records(&page))?),
    }

    Ok(())
}

fn current_records<'a>(
    page: &'a DirectoryPage<AddressBar>,
) -> Vec<&'a doctor_directory::PractitionerRecord> {
    match page.view() {
        PageView::Results(records) => records,
        _ => Vec::new(),
    }
}

async fn run_interactive(page: &mut DirectoryPage<AddressBar>) -> anyhow::Result<()> {
    println!("Type 'help' for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("⚠️ {}", message);
                continue;
            }
        };
        tracing::debug!("Command: {:?}", command);

        if let Some(message) = command.apply(page) {
            println!("⚠️ {}", message);
            continue;
        }

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Url => println!("{}", page.navigator().current_url()),
            Command::Search(_) => {
                for (i, record) in page.suggestions().iter().enumerate() {
                    println!("  {}. {}", i + 1, record.name);
                }
            }
            _ => println!("{}", render::render_page(page)),
        }
    }

    Ok(())
}
