use anyhow::Result;
use clap::Parser;
use doc_checker::cli::{Cli, Commands};
use doc_checker::models::{load_job, EvaluationJob};
use doc_checker::utils::logging;
use doc_checker::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env().with_api_base_url(cli.server.clone());

    // 初始化日志
    logging::init(cli.verbose || config.verbose_logging);

    let app = App::initialize(config)?;

    match cli.command {
        Commands::Evaluate {
            job,
            submission,
            references,
            use_database,
        } => {
            let job = match job {
                Some(path) => load_job(&path).await?,
                None => EvaluationJob::default(),
            };
            let job = job.merge_cli(submission, references, use_database);
            let outcome = app.evaluate(job).await?;
            if !outcome.rendered.overall.passed {
                std::process::exit(2);
            }
        }
        Commands::Health => {
            if !app.health().await? {
                std::process::exit(1);
            }
        }
        Commands::GenerateMetadata => {
            app.generate_metadata().await?;
        }
    }

    Ok(())
}
