use std::rc::Rc;

use cli::{Cli, SubCommands};
use config::Config;
use tokio::io::{AsyncBufReadExt, BufReader};

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod names;
pub mod page;
pub mod render;
pub mod storage;

pub use app::{App, SearchOutcome};
pub use error::{AppError, ErrorKind};

fn build_app(config: Config) -> eyre::Result<App> {
    let store = storage::FileStore::open(&config.data_path)?;
    let client = reqwest::Client::builder().gzip(true).build()?;
    Ok(App::new(config, Box::new(store), client))
}

pub async fn run(args: Cli) -> eyre::Result<()> {
    let config = Config::from(args.common);
    let output = config.output.clone();
    let app = Rc::new(build_app(config)?);
    app.init().await;

    match args.subcmd {
        SubCommands::Categories => {
            for category in app.categories().iter() {
                println!("{}\t{}", category.id, category.name);
            }
        }
        SubCommands::Search { category } => {
            if !app.page().has_error() {
                app.handle_category_change(&category).await;
                for (name, url) in app.cards().iter() {
                    println!("{name}\t{url}");
                }
            }
        }
        SubCommands::Browse => browse(Rc::clone(&app)).await?,
    }

    let page = app.page().clone();
    page.save(&output).await?;
    println!("page written to {:?}", output);
    if page.has_error() {
        return Err(eyre::eyre!("{}", page.error));
    }
    Ok(())
}

/// Every stdin line is a selection. Searches run as local tasks, so a new
/// selection can start while an older one is still in flight.
async fn browse(app: Rc<App>) -> eyre::Result<()> {
    let local_set = tokio::task::LocalSet::new();
    local_set
        .run_until(async {
            for category in app.categories().iter() {
                println!("{}\t{}", category.id, category.name);
            }
            if app.page().has_error() {
                return Ok(());
            }
            println!("enter a category id (empty clears, q quits)");

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut handles = vec![];
            while let Some(line) = lines.next_line().await? {
                if line.trim() == "q" {
                    break;
                }
                let app = Rc::clone(&app);
                handles.push(tokio::task::spawn_local(async move {
                    let outcome = app.handle_category_change(&line).await;
                    report(&app, outcome).await;
                }));
            }
            for handle in handles {
                handle.await?;
            }
            Ok::<(), eyre::Error>(())
        })
        .await
}

async fn report(app: &App, outcome: SearchOutcome) {
    match outcome {
        SearchOutcome::Stale => return,
        SearchOutcome::Rendered(_) => {
            for (name, url) in app.cards().iter() {
                println!("{name}\t{url}");
            }
        }
        SearchOutcome::Failed => println!("{}", app.page().error),
        SearchOutcome::Cleared => println!("results cleared"),
    }
    let page = app.page().clone();
    if let Err(e) = page.save(&app.config().output).await {
        log::warn!("{e}");
    }
}
