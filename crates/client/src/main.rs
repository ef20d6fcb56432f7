//! itemsync-client CLI entry point.

use clap::Parser;
use itemsync_client::cli::{Cli, Commands, OutputFormat};
use itemsync_client::client::items::{add_item_invocation, invocation};
use itemsync_client::client::ItemsyncClient;
use itemsync_client::output::{format_output, pretty};
use itemsync_core::item::ItemInput;
use itemsync_core::operation::Operation;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = ItemsyncClient::new(&cli.base_url);

    if cli.explain {
        let target = match cli.command {
            Commands::List => invocation(Operation::ListItems, json!({})),
            Commands::GetByTitle { title } => {
                invocation(Operation::GetItemByTitle, json!({ "title": title }))
            }
            Commands::Get { id } => invocation(Operation::GetItem, json!({ "id": id })),
            Commands::Add { title, id, fields } => {
                add_item_invocation(&item_input(title, id, fields))
            }
            Commands::Livez => return Err("--explain does not apply to livez".into()),
        };
        let document = client.explain(&target).await?;
        println!("{}", format_output(&document, cli.format));
        return Ok(());
    }

    match cli.command {
        Commands::List => {
            let items = client.list_items().await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&items, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_items(&items)),
            }
        }
        Commands::GetByTitle { title } => {
            let items = client.get_item_by_title(&title).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&items, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_items(&items)),
            }
        }
        Commands::Get { id } => {
            let item = client.get_item(&id).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&item, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_maybe_item(item.as_ref())),
            }
        }
        Commands::Add { title, id, fields } => {
            let item = client.add_item(&item_input(title, id, fields)).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&item, cli.format)),
                OutputFormat::Pretty => println!("Created:\n{}", pretty::format_item(&item)),
            }
        }
        Commands::Livez => {
            client.livez().await?;
            println!("OK");
        }
    }

    Ok(())
}

fn item_input(
    title: String,
    id: Option<String>,
    fields: Vec<(String, serde_json::Value)>,
) -> ItemInput {
    let mut input = ItemInput::new(title);
    input.id = id;
    for (name, value) in fields {
        input = input.with_field(name, value);
    }
    input
}
