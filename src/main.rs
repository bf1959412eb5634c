use commander::ai_service::AiService;
use commander::app::{show_help, App, Outcome};
use commander::args::ArgumentModel;
use commander::completion::backend_from_config;
use commander::config::Config;
use commander::error::CommanderError;
use commander::file_service::FileService;
use commander::logging::{init_tracing, Logger};
use tracing::info;

#[tokio::main]
async fn main() {
    let args = ArgumentModel::from_env().unwrap_or_else(|err| err.exit());
    init_tracing();

    let logger = Logger::new(args.verbose);

    let result = if args.help_flag {
        show_help(&mut std::io::stdout())
    } else {
        run(&args, &logger).await
    };

    match result {
        Ok(outcome) => info!("Finished: {:?}", outcome),
        Err(err) => {
            logger.log(&err.to_string());
            err.exit();
        }
    }
}

async fn run(args: &ArgumentModel, logger: &Logger) -> Result<Outcome, CommanderError> {
    let config = Config::load()?;
    let backend = backend_from_config(&config)?;

    let app = App::new(
        logger,
        FileService::new(logger),
        AiService::new(logger, backend),
    );
    app.run(args, &mut std::io::stdout()).await
}
