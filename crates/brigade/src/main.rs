//! Command-line front end for the brigade restaurant assistant.

use anyhow::{Context, bail};
use brigade::config::BrigadeConfig;
use brigade::core::{
    AdvisorRelay, Assistant, AssistantRouter, CoreError, HttpAdvisorRelay, ImageInput,
    InsightCache, InsightGenerator, InsightKind,
};
use brigade::protocol::Message;
use brigade::tools::{RestaurantDataset, ToolDispatcher, builtin_tool_registry};
use clap::{Parser, Subcommand};
use log::{debug, info};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Command-line options for the brigade CLI.
#[derive(Parser)]
#[command(name = "brigade", version, about = "Restaurant operations assistant")]
struct Cli {
    /// Optional path to a brigade.json5 config file, applied over the
    /// user and working-directory layers
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Restaurant dataset (JSON)
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask one question, or start an interactive chat when no message is given
    Chat {
        /// Attach a photo (dish, invoice or stock shelf)
        #[arg(long)]
        image: Option<PathBuf>,
        /// Message text
        message: Vec<String>,
    },
    /// Generate structured insights (dashboard, menu, procurement)
    Insight {
        /// Kinds to generate; all three when omitted
        kinds: Vec<String>,
    },
    /// Run one dataset tool directly and print its JSON result
    Tool {
        /// Tool name, for example check_inventory
        name: String,
        /// Arguments as a JSON object
        #[arg(default_value = "{}")]
        args: String,
    },
}

/// Supported slash commands in interactive chat.
#[derive(Debug, PartialEq)]
enum SlashCommand {
    New,
    Quit,
    Image { path: PathBuf, caption: String },
}

/// Entry point for the brigade CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    brigade::init_logging();

    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    let config = brigade::load_config(&cwd, cli.config.as_deref())?;
    let Some(dataset_path) = cli.dataset.as_ref() else {
        bail!("--dataset <path> is required");
    };
    let dataset = Arc::new(
        RestaurantDataset::load(dataset_path)
            .with_context(|| format!("failed to load dataset {}", dataset_path.display()))?,
    );
    info!(
        "dataset loaded (restaurant={}, ingredients={}, dishes={}, suppliers={})",
        dataset.restaurant.name,
        dataset.ingredients.len(),
        dataset.dishes.len(),
        dataset.suppliers.len()
    );

    match cli.command {
        Command::Chat { image, message } => run_chat(&config, dataset, image, message).await,
        Command::Insight { kinds } => run_insights(&config, &dataset, &kinds).await,
        Command::Tool { name, args } => run_tool(&dataset, &name, &args),
    }
}

async fn run_chat(
    config: &BrigadeConfig,
    dataset: Arc<RestaurantDataset>,
    image: Option<PathBuf>,
    message: Vec<String>,
) -> anyhow::Result<()> {
    let assistant =
        Assistant::from_config(config, dataset).context("failed to build assistant")?;
    let relay = HttpAdvisorRelay::from_config(&config.relay, config.provider.request_timeout())
        .context("failed to build advisor relay")?
        .map(|relay| Arc::new(relay) as Arc<dyn AdvisorRelay>);
    let mut router = AssistantRouter::new(assistant.session(), relay, config.relay.reprobe_after());

    let text = message.join(" ");
    if !text.trim().is_empty() || image.is_some() {
        let image = match image {
            Some(path) => Some(load_image(&path).await?),
            None => None,
        };
        let reply = router.submit(&text, image).await?;
        print_message(&reply);
        return Ok(());
    }

    if let Some(greeting) = router.session().transcript().first() {
        print_message(greeting);
    }
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let (text, image) = match parse_slash_command(&line) {
            Ok(Some(SlashCommand::Quit)) => break,
            Ok(Some(SlashCommand::New)) => {
                router.reset();
                debug!("started new chat (session_id={})", router.session().id());
                if let Some(greeting) = router.session().transcript().first() {
                    print_message(greeting);
                }
                continue;
            }
            Ok(Some(SlashCommand::Image { path, caption })) => match load_image(&path).await {
                Ok(image) => (caption, Some(image)),
                Err(err) => {
                    eprintln!("{err:#}");
                    continue;
                }
            },
            Ok(None) => (line, None),
            Err(usage) => {
                eprintln!("{usage}");
                continue;
            }
        };
        match router.submit(&text, image).await {
            Ok(reply) => print_message(&reply),
            Err(CoreError::EmptyInput) => continue,
            Err(err) => eprintln!("{err}"),
        }
    }
    Ok(())
}

async fn run_insights(
    config: &BrigadeConfig,
    dataset: &RestaurantDataset,
    kinds: &[String],
) -> anyhow::Result<()> {
    let kinds = if kinds.is_empty() {
        InsightKind::ALL.to_vec()
    } else {
        kinds
            .iter()
            .map(|kind| kind.parse::<InsightKind>())
            .collect::<Result<Vec<_>, _>>()?
    };
    let generator = InsightGenerator::from_config(config, InsightCache::new())?;
    let mut output = Map::new();
    for kind in kinds {
        let payload = generator.generate(kind, dataset).await?;
        output.insert(kind.as_str().to_string(), payload.to_value());
    }
    println!("{}", serde_json::to_string_pretty(&Value::Object(output))?);
    Ok(())
}

fn run_tool(dataset: &RestaurantDataset, name: &str, args: &str) -> anyhow::Result<()> {
    let arguments: Map<String, Value> =
        serde_json::from_str(args).context("tool arguments must be a JSON object")?;
    let dispatcher = ToolDispatcher::new(builtin_tool_registry()?);
    let result = dispatcher.execute(name, &arguments, dataset);
    println!("{}", serde_json::to_string_pretty(&result.result)?);
    if let Some(message) = result.error_message() {
        bail!("tool {name} failed: {message}");
    }
    Ok(())
}

async fn load_image(path: &Path) -> anyhow::Result<ImageInput> {
    ImageInput::from_path(path)
        .await
        .with_context(|| format!("failed to read image {}", path.display()))
}

fn print_message(message: &Message) {
    println!("{}", message.text);
    if let Some(code) = &message.code_execution {
        if !code.code.is_empty() {
            println!("\n--- code ---\n{}", code.code);
        }
        if !code.output.is_empty() {
            println!("--- output ---\n{}", code.output);
        }
    }
    for (index, source) in message.sources.iter().enumerate() {
        println!("[{}] {} <{}>", index + 1, source.title, source.uri);
    }
    if !message.tools_used.is_empty() {
        println!("(tools: {})", message.tools_used.join(", "));
    }
    println!();
}

fn parse_slash_command(input: &str) -> Result<Option<SlashCommand>, String> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return Ok(None);
    }
    let mut parts = trimmed.trim_start_matches('/').split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(None);
    };
    match command.to_lowercase().as_str() {
        "new" | "reset" => Ok(Some(SlashCommand::New)),
        "quit" | "exit" => Ok(Some(SlashCommand::Quit)),
        "image" => {
            let Some(path) = parts.next() else {
                return Err("usage: /image <path> [caption]".to_string());
            };
            Ok(Some(SlashCommand::Image {
                path: PathBuf::from(path),
                caption: parts.collect::<Vec<_>>().join(" "),
            }))
        }
        other => Err(format!(
            "unknown command: /{other} (try /new, /image or /quit)"
        )),
    }
}
