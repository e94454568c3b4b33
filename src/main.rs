use anyhow::Result;
use clap::Parser;

use promq::constants::EXIT_SUCCESS;
use promq::filter::LabelFilter;
use promq::http::{build_http_client, parse_params};
use promq::output::new_printer;
use promq::processor::{finish, query_instant, query_labels, query_range, query_series};
use promq::telemetry;
use promq::types::{Cli, ClientConfig, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init(&cli.log_level);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let client = build_http_client(&ClientConfig::from(&cli))?;
    let mut printer = new_printer(cli.format, !cli.no_color);

    let exit_code = match &cli.command {
        Commands::Instant { server, expr, time } => {
            query_instant(&client, server, expr, time, printer.as_mut()).await
        }
        Commands::Range {
            server,
            expr,
            start,
            end,
            step,
            params,
        } => {
            let params = parse_params(params);
            query_range(
                &client,
                server,
                &params,
                expr,
                start,
                end,
                *step,
                printer.as_mut(),
            )
            .await
        }
        Commands::Series {
            server,
            matches,
            start,
            end,
        } => query_series(&client, server, matches, start, end, printer.as_mut()).await,
        Commands::Labels {
            server,
            name,
            start,
            end,
            filter_string,
            filter_regex,
        } => match LabelFilter::new(filter_string.clone(), filter_regex.as_deref()) {
            Ok(filter) => {
                query_labels(&client, server, name, start, end, &filter, printer.as_mut()).await
            }
            Err(err) => finish(Err(err)),
        },
    };

    if exit_code != EXIT_SUCCESS {
        std::process::exit(exit_code);
    }

    Ok(())
}
