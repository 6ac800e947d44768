use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::controller::{LibraryView, ViewController};
use crate::filter::{CategorySet, FilterState};
use crate::source::{JsonFileSource, MockSource, ResourceSource};
use crate::tui::{self, TuiApp};
use anyhow::{Context, Result, bail};
use std::io::{self, Write};
use tracing::info;

fn resource_source(cli_args: &Cli) -> Box<dyn ResourceSource> {
    match &cli_args.resources {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(MockSource),
    }
}

/// Filter state the session starts in, seeded from the command line.
pub fn initial_filter_state(cli_args: &Cli, config: &Config) -> FilterState {
    let categories = if cli_args.types.is_empty() {
        CategorySet::all()
    } else {
        cli_args.types.iter().copied().collect()
    };
    FilterState {
        subset: cli_args.subset,
        search: cli_args.search.clone(),
        categories,
        view: config.view_mode,
    }
}

/// Prints the currently visible resources of `controller`.
pub fn write_library<W: Write>(
    controller: &ViewController,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let resources = match controller.view() {
        LibraryView::Ready { resources, .. } => resources,
        LibraryView::Empty { .. } => Vec::new(),
        LibraryView::Loading { target } => bail!("subset '{}' is still loading", target),
    };

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &resources)?;
            writeln!(out)?;
        }
        OutputFormat::Text if resources.is_empty() => {
            writeln!(out, "No resources found")?;
            writeln!(
                out,
                "Try adjusting your search or filter to find what you're looking for."
            )?;
        }
        OutputFormat::Text => {
            for resource in resources {
                writeln!(
                    out,
                    "{:>4}  {:<8}  {:<32}  {:>8}  {}",
                    resource.id,
                    resource.category,
                    resource.name,
                    resource.size_label,
                    resource.updated_label
                )?;
            }
        }
    }
    Ok(())
}

pub fn run_contenthub(cli_args: Cli, config: Config) -> Result<()> {
    let source = resource_source(&cli_args);
    let collection = source
        .load_collection()
        .with_context(|| format!("loading resources from {}", source.describe()))?;
    info!(
        count = collection.len(),
        from = %source.describe(),
        "resource collection loaded"
    );

    let controller = ViewController::new(collection, config.subset_rules())
        .with_state(initial_filter_state(&cli_args, &config));

    if cli_args.headless {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        return write_library(&controller, cli_args.format, &mut out);
    }

    tui::run_tui(TuiApp::new(controller, source, &config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Subset, SubsetRules};
    use crate::resource::{mock_resources, Category, Collection};
    use clap::Parser;

    fn controller_for(args: &[&str]) -> ViewController {
        let cli = Cli::try_parse_from(args).unwrap();
        let config = Config::default();
        ViewController::new(
            Collection::new(mock_resources()).unwrap(),
            SubsetRules::default(),
        )
        .with_state(initial_filter_state(&cli, &config))
    }

    #[test]
    fn seeds_state_from_arguments() {
        let controller = controller_for(&["contenthub", "--subset", "shared", "--types", "image"]);
        let state = controller.state();
        assert_eq!(state.subset, Subset::Shared);
        assert!(state.categories.contains(Category::Image));
        assert!(!state.categories.contains(Category::Document));
        assert!(!controller.is_loading());
    }

    #[test]
    fn text_output_lists_matches() {
        let controller = controller_for(&["contenthub", "--search", "product"]);
        let mut out = Vec::new();
        write_library(&controller, OutputFormat::Text, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("product-hero-image.jpg"));
        assert!(lines[1].contains("product-tutorial.mp4"));
    }

    #[test]
    fn empty_result_prints_empty_state() {
        let controller = controller_for(&["contenthub", "--search", "nothing-like-this"]);
        let mut out = Vec::new();
        write_library(&controller, OutputFormat::Text, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("No resources found"));

        let mut json = Vec::new();
        write_library(&controller, OutputFormat::Json, &mut json).unwrap();
        assert_eq!(String::from_utf8(json).unwrap().trim(), "[]");
    }

    #[test]
    fn json_output_round_trips_fields() {
        let controller = controller_for(&["contenthub", "--types", "video", "--format", "json"]);
        let mut out = Vec::new();
        write_library(&controller, OutputFormat::Json, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let names: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["company-intro.mp4", "product-tutorial.mp4"]);
        assert_eq!(value[0]["category"], "video");
        assert!(value[0].get("thumbnail").is_none());
    }
}
