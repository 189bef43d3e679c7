use crate::cli::args::CliArgs;
use crate::output::OutputFormat;
use crate::view::SortOrder;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.sort.as_deref() {
        if !raw.trim().is_empty() && SortOrder::parse(raw).is_none() {
            return Err(format!(
                "invalid --sort '{raw}', expected one of: {}",
                sort_order_names()
            ));
        }
    }
    if let Some(raw) = args.format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --format '{raw}', expected text, json, html or page"
            ));
        }
    }
    if let Some(path) = args.output.as_deref() {
        if path.trim().is_empty() {
            return Err("invalid --output, expected a file path".to_string());
        }
    }
    if args.init_config && args.interactive {
        return Err("--init-config cannot be combined with --interactive".to_string());
    }
    Ok(())
}

pub fn sort_order_names() -> String {
    SortOrder::ALL
        .iter()
        .map(SortOrder::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
