use clap::Parser;
use product_grid::catalog::InMemoryCatalog;
use product_grid::config::EditorConfig;
use product_grid::editor::GridEditor;
use product_grid::telemetry;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Arrange catalog products into rows and save the grid.
#[derive(Parser, Debug)]
#[command(name = "grid-demo", version)]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated product ids to load instead of the full catalog
    #[arg(long)]
    ids: Option<String>,

    /// Template assigned to every row
    #[arg(long, default_value = "template2")]
    template: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match EditorConfig::from_file(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("{error}");
                return ExitCode::FAILURE;
            }
        },
        None => EditorConfig::default(),
    };
    let config = match &args.ids {
        Some(raw) => config.with_ids_param(raw),
        None => config,
    };
    telemetry::init(&config.log_filter);

    let catalog = Arc::new(InMemoryCatalog::seeded().with_latency(config.catalog_latency()));
    let mut editor = GridEditor::new(catalog, &config);

    if editor.load(&config.product_ids).await.is_err() {
        eprintln!("{}", editor.error().unwrap_or_default());
        return ExitCode::FAILURE;
    }

    // Fill rows of three in catalog order.
    let ids: Vec<String> = editor
        .available_products()
        .iter()
        .map(|p| p.id.clone())
        .collect();
    for chunk in ids.chunks(3) {
        let row = editor.add_row();
        editor.update_row_template(&row, &args.template);
        for id in chunk {
            editor.move_product(None, Some(&row), id, None);
        }
    }

    match editor.save().await {
        Ok(receipt) => {
            println!("saved grid {}", receipt.id);
            match serde_json::to_string_pretty(editor.grid()) {
                Ok(json) => println!("{json}"),
                Err(error) => eprintln!("{error}"),
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", error.user_message());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use product_grid::catalog::parse_ids;

    #[test]
    fn ids_flag_is_parsed() {
        let args = Args::parse_from(["grid-demo", "--ids", "p1,p3"]);
        assert_eq!(parse_ids(args.ids.as_deref().unwrap()), ["p1", "p3"]);
        assert_eq!(args.template, "template2");
    }
}
