use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use esg_core::api::{EsgApi, HttpEsgApi};
use esg_core::chart::{bar_series, TierDistribution};
use esg_core::dashboard::{AnalyzeOutcome, AnalyzeRejection, Dashboard};
use esg_core::domain::company::CompanyId;
use esg_core::table::CompanyTable;

mod render;

#[derive(Debug, Parser)]
#[command(name = "esg_cli")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show every analyzed company with portfolio stats and the tier distribution.
    List {
        /// Expand the risk breakdown for these company ids.
        #[arg(long = "expand", value_name = "ID")]
        expand: Vec<i64>,

        /// Also print per-company score bars.
        #[arg(long)]
        chart: bool,

        /// Print stats, tier counts and the company list as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run a fresh analysis for a company, then show the refreshed list.
    Analyze {
        /// Company name, e.g. "Tesla".
        name: String,
    },
    /// Show the stored analysis for one company.
    Details {
        id: i64,

        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = esg_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    let api = HttpEsgApi::from_settings(&settings)?;
    tracing::debug!(base_url = %api.base_url(), "using ESG scoring API");

    let result = match args.command {
        Command::List {
            expand,
            chart,
            json,
        } => list(&api, &expand, chart, json).await,
        Command::Analyze { name } => analyze(&api, name).await,
        Command::Details { id, json } => details(&api, CompanyId(id), json).await,
    };

    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
    }
    result
}

async fn list(api: &dyn EsgApi, expand: &[i64], chart: bool, json: bool) -> anyhow::Result<()> {
    if json {
        let companies = api.get_companies().await?;
        println!("{}", render::render_list_json(&companies)?);
        return Ok(());
    }

    let mut dashboard = Dashboard::new();
    dashboard.mount(api).await;

    let mut table = CompanyTable::new();
    for id in expand {
        table.toggle(CompanyId(*id));
    }

    print_dashboard(&dashboard, &table, chart);
    Ok(())
}

async fn analyze(api: &dyn EsgApi, name: String) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new();
    dashboard.mount(api).await;
    dashboard.set_search_term(name);

    match dashboard.submit_analyze(api).await {
        AnalyzeOutcome::Analyzed(analysis) => {
            tracing::info!(
                company = %analysis.company,
                score = analysis.score,
                total_articles = analysis.total_articles,
                "analysis completed"
            );
            print!("{}", render::render_analysis(&analysis));
            println!();
            print_dashboard(&dashboard, &CompanyTable::new(), false);
            Ok(())
        }
        AnalyzeOutcome::Rejected(AnalyzeRejection::EmptyTerm) => {
            anyhow::bail!("{}", dashboard.error())
        }
        AnalyzeOutcome::Rejected(AnalyzeRejection::InFlight) => {
            anyhow::bail!("an analysis is already running")
        }
        AnalyzeOutcome::Failed(err) => {
            Err(anyhow::Error::new(err).context(dashboard.error().to_string()))
        }
    }
}

async fn details(api: &dyn EsgApi, id: CompanyId, json: bool) -> anyhow::Result<()> {
    let analysis = api
        .get_company_details(id)
        .await
        .with_context(|| format!("load details for company {id}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", render::render_analysis(&analysis));
    }
    Ok(())
}

fn print_dashboard(dashboard: &Dashboard, table: &CompanyTable, chart: bool) {
    let companies = dashboard.companies();
    print!("{}", render::render_stats(&dashboard.stats()));
    println!();
    print!("{}", render::render_table(&table.view(companies)));

    if companies.is_empty() {
        return;
    }
    println!();
    print!(
        "{}",
        render::render_distribution(&TierDistribution::from_companies(companies))
    );
    if chart {
        println!();
        print!("{}", render::render_bars(&bar_series(companies)));
    }
}

fn init_sentry(settings: &esg_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
