use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use spdlog::{info, warn};

use silentframe::logger::configure_logger;
use silentframe::post_collection::PostCollection;
use silentframe::server::server_run;

use crate::config::open_config;
use crate::new_post::new_post_cmd;

mod config;
mod new_post;

const CFG_FILE_NAME: &str = "silentframe.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Runs the blog server
    Serve(ServeArgs),
    /// Loads every configured post once and prints what was found
    List(ListArgs),
    /// Writes the skeleton of a new post
    New(NewArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Only show posts matching this text
    #[arg(short, long)]
    query: Option<String>,
}

#[derive(Parser, Debug)]
struct NewArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Comma separated tags
    #[arg(long, default_value_t = String::new())]
    tags: String,

    /// Image path or url, e.g. /images/cover.jpg
    #[arg(short, long, default_value_t = String::new())]
    image: String,

    /// Post generation options
    #[arg(short, long, default_value_t = PostOutput::Stdout)]
    output: PostOutput,
}

#[derive(Clone, Debug, ValueEnum)]
enum PostOutput {
    /// Writes the new post to the stdout
    Stdout,
    /// Writes the new post to <slug>.txt in the current directory
    File,
}

impl Display for PostOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PostOutput::Stdout => write!(f, "stdout"),
            PostOutput::File => write!(f, "file"),
        }
    }
}

async fn list_cmd(args: ListArgs) -> Result<()> {
    let config = open_config(args.config_path.map(PathBuf::from)).map_err(anyhow::Error::msg)?;
    let source = config.post_source()?;
    let posts = PostCollection::load(&source, &config.blog.files).await;

    let query = args.query.unwrap_or_default();
    for post in posts.search(&query) {
        println!("{:>3}  {:<12} {} [{}] ({} min)", post.id, post.date, post.title, post.tags.join(", "), post.reading_time());
    }
    println!("{} of {} configured posts loaded", posts.len(), config.blog.files.len());
    Ok(())
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let args = match args {
        Args::Serve(args) => args,
        Args::List(args) => return list_cmd(args).await,
        Args::New(args) => return new_post_cmd(args),
    };

    let config_path = args.config_path.map(PathBuf::from);
    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run silentframe --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(config.log.as_ref()) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Starting The Silent Frame =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
    info!("Listening on {}:{}", config.server.address, config.server.port);

    server_run(config).await?;
    Ok(())
}
