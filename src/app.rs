use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::catalog::Catalog;
use crate::cli::args::CliArgs;
use crate::cli::events::{self, Command};
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::controller::{
    ConsoleSink, Control, Controller, ControllerError, DisplaySurface, FileSurface, InputSource,
    Inputs, StdoutSurface, ValueField,
};
use crate::output::{self, OutputFormat};
use crate::palette::TypeColors;
use crate::view::ViewQuery;

fn print_banner() {
    const BANNER: &str = r#"
                 __          __
    ____  ____  / /_____  ____/ /__  _  __
   / __ \/ __ \/ //_/ _ \/ __  / _ \| |/_/
  / /_/ / /_/ / ,< /  __/ /_/ /  __/>  <
 / .___/\____/_/|_|\___/\__,_/\___/_/|_|
/_/
       v0.2.0 - mini Pokédex
    "#;
    eprint!("{}", BANNER);
    eprintln!();
}

fn print_info(message: &str) {
    eprintln!(
        "{}{}{} {}",
        "[".bold().white(),
        "INF".bold().cyan(),
        "]".bold().white(),
        message
    );
}

fn print_error(message: &str) {
    eprintln!(
        "{}{}{} {}",
        "[".bold().white(),
        "ERR".bold().red(),
        "]".bold().white(),
        message
    );
}

fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<10}: {}", label, value);
}

/// Options grouped by heading, then the sort orders and interactive commands.
fn render_help() -> String {
    let cmd = CliArgs::command();
    let mut sections: IndexMap<&str, Vec<String>> = IndexMap::new();
    for arg in cmd.get_arguments().filter(|arg| !arg.is_hide_set()) {
        let mut flags = arg
            .get_short()
            .map(|short| format!("-{short}"))
            .into_iter()
            .chain(arg.get_long().map(|long| format!("--{long}")))
            .join(", ");
        if arg.get_action().takes_values() {
            let value = arg
                .get_value_names()
                .and_then(|names| names.first())
                .map(|name| name.as_str())
                .unwrap_or("VALUE");
            flags.push_str(&format!(" <{value}>"));
        }
        let help = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
        sections
            .entry(arg.get_help_heading().unwrap_or("Options"))
            .or_default()
            .push(format!("  {flags:<26} {}", help.trim()));
    }

    let mut out = format!(
        "{} {}\n",
        cmd.get_name(),
        cmd.get_version().unwrap_or_default()
    );
    if let Some(about) = cmd.get_about() {
        out.push_str(&format!("{about}\n"));
    }
    out.push_str(&format!("\nUsage: {} [OPTIONS]\n", cmd.get_name()));
    for (heading, lines) in sections {
        out.push_str(&format!("\n{heading}:\n"));
        for line in lines {
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    out.push_str(&format!(
        "\nSort orders: {}\n\nInteractive (-i) ",
        validation::sort_order_names()
    ));
    out.push_str(events::help_text());
    out
}

/// Placeholder shown for a blank control value.
fn control_value(control: Control, value: &str) -> &str {
    match (control, value.trim()) {
        (Control::Sort, "") => "catalog order",
        (_, "") => "(any)",
        _ => value,
    }
}

fn format_label(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "text",
        OutputFormat::Json => "json",
        OutputFormat::Html => "html",
        OutputFormat::Page => "page",
    }
}

fn summarize_query(query: &ViewQuery) {
    let values = [
        (Control::Search, &query.search),
        (Control::TypeFilter, &query.type_filter),
        (Control::Sort, &query.sort),
    ];
    for (control, value) in values {
        format_kv_line(control.label(), control_value(control, value));
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    search: String,
    type_filter: String,
    sort: String,
    output: Option<String>,
    format: OutputFormat,
    no_color: bool,
    force_color: bool,
    quiet: bool,
    verbose: u8,
    interactive: bool,
    list_types: bool,
    type_colors: IndexMap<String, String>,
    default_color: Option<String>,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let force_color = args.color;
    let no_color = if force_color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };
    let quiet = args.quiet || cfg.quiet.unwrap_or(false);

    let search = args.search.or(cfg.search).unwrap_or_default();
    let type_filter = args.type_filter.or(cfg.type_filter).unwrap_or_default();
    let sort = args.sort.or(cfg.sort).unwrap_or_default();

    let output = args
        .output
        .or(cfg.output)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .map(|p| config::expand_tilde_string(&p));

    let format = match args.format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output format '{raw}'"))?,
        None => output
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    Ok(RunConfig {
        search,
        type_filter,
        sort,
        output,
        format,
        no_color,
        force_color,
        quiet,
        verbose: args.verbose,
        interactive: args.interactive,
        list_types: args.list_types,
        type_colors: cfg.type_colors.unwrap_or_default(),
        default_color: cfg.default_color,
    })
}

fn list_types(catalog: &Catalog, colors: &TypeColors) {
    let mut labels: Vec<&str> = colors.labels().collect();
    for label in catalog.distinct_types() {
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    for label in labels {
        let count = catalog
            .entries()
            .iter()
            .filter(|p| p.types().contains(&label))
            .count();
        let color = colors.color_for(label);
        let mapped = if colors.is_mapped(label) {
            ""
        } else {
            " (default)"
        };
        println!(
            "{} {:<12} {:<8} {:>2} Pokémon{}",
            output::color_swatch(color),
            label,
            color,
            count,
            mapped
        );
    }
}

type CliController = Controller<ValueField, Box<dyn DisplaySurface>, ConsoleSink>;

fn report_pass(
    run: &RunConfig,
    result: Result<output::DisplayOutput, ControllerError>,
) -> Result<(), String> {
    let rendered = result.map_err(|e| e.to_string())?;
    if run.verbose > 0 {
        let shown = if rendered.is_empty() {
            "no match".to_string()
        } else {
            format!("{} card(s)", rendered.cards().len())
        };
        format_kv_line("Rendered", &shown);
    }
    if let Some(path) = run.output.as_deref() {
        if run.interactive || run.verbose > 0 {
            print_info(&format!("wrote {} view to {path}", format_label(run.format)));
        }
    }
    Ok(())
}

fn run_interactive(
    run: &RunConfig,
    controller: &mut CliController,
    fields: &Inputs<ValueField>,
) -> Result<(), String> {
    print_info("type 'help' for commands, 'quit' to leave");
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        eprint!("{} ", ">".bold().green());
        let _ = std::io::stderr().flush();
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => return Err(format!("failed to read stdin: {e}")),
            None => break,
        };
        let command = match events::parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                print_error(&e);
                continue;
            }
        };
        match command {
            Command::Set { control, value } => {
                fields.get(control).set(&value);
                if run.verbose > 0 {
                    let value = fields.get(control).current_value();
                    format_kv_line(control.label(), control_value(control, &value));
                }
                report_pass(run, controller.on_change(control))?;
            }
            Command::Clear => {
                fields.search.set("");
                fields.type_filter.set("");
                fields.sort.set("");
                report_pass(run, controller.on_change(Control::Search))?;
            }
            // re-render with unchanged inputs
            Command::Show => {
                summarize_query(&controller.query());
                report_pass(run, controller.on_change(Control::Search))?;
            }
            Command::Help => eprint!("{}", events::help_text()),
            Command::Quit => break,
        }
    }
    Ok(())
}

fn run(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    } else if run.force_color {
        colored::control::set_override(true);
    }

    let catalog = Catalog::builtin();
    let colors = TypeColors::with_overrides(&run.type_colors, run.default_color.as_deref());

    if run.list_types {
        list_types(&catalog, &colors);
        return Ok(());
    }

    if run.interactive {
        print_banner();
    }

    let fields = Inputs {
        search: ValueField::new(&run.search),
        type_filter: ValueField::new(&run.type_filter),
        sort: ValueField::new(&run.sort),
    };
    let surface: Box<dyn DisplaySurface> = match run.output.as_deref() {
        Some(path) => Box::new(FileSurface::new(path)),
        None => Box::new(StdoutSurface),
    };
    let mut controller = Controller::new(
        catalog,
        colors,
        fields.clone(),
        surface,
        ConsoleSink::new(run.quiet),
        run.format,
    );

    if run.verbose > 0 {
        summarize_query(&controller.query());
        format_kv_line("Format", format_label(run.format));
        format_kv_line("Output", run.output.as_deref().unwrap_or("stdout"));
    }

    report_pass(&run, controller.start())?;

    if run.interactive {
        run_interactive(&run, &mut controller, &fields)?;
    }
    Ok(())
}

fn init_config(path: Option<PathBuf>) -> Result<(), String> {
    let path = path
        .or_else(config::default_config_path)
        .ok_or_else(|| "could not determine a home directory for the config file".to_string())?;
    if config::ensure_default_config_file(&path)? {
        print_info(&format!("wrote default config to {}", path.display()));
    } else {
        print_info(&format!("config already exists at {}", path.display()));
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{}", render_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    if args.init_config {
        return init_config(user_config_path);
    }

    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run_config = build_run_config(args, cfg)?;
    run(run_config)
}
