use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "pokedex",
    version,
    about = "filterable, sortable mini Pokédex",
    long_about = "Pokedex renders a fixed catalog of Pokémon as cards, filtered by name and type and sorted by name or level.\n\nExamples:\n  pokedex -s pika\n  pokedex -t Poison -S level-desc\n  pokedex -S name-asc -o pokedex.html\n  pokedex --interactive -F html -o cards.html\n\nTip: Use --config to persist the default query and colour overrides."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v prints the active query)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        help_heading = "Output",
        help = "Suppress diagnostics about skipped records."
    )]
    pub quiet: bool,

    #[arg(
        short = 'c',
        long = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        long = "no-color",
        visible_alias = "nc",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered view to FILE instead of stdout (rewritten on every change)."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'F',
        long = "format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format: text, json, html (fragment) or page (inferred from --output)."
    )]
    pub format: Option<String>,

    #[arg(
        short = 's',
        long = "search",
        value_name = "TEXT",
        help_heading = "View",
        help = "Keep Pokémon whose name contains TEXT (case-insensitive)."
    )]
    pub search: Option<String>,

    #[arg(
        short = 't',
        long = "type",
        value_name = "LABEL",
        help_heading = "View",
        help = "Keep Pokémon whose type field contains LABEL (e.g. Poison)."
    )]
    pub type_filter: Option<String>,

    #[arg(
        short = 'S',
        long = "sort",
        value_name = "ORDER",
        help_heading = "View",
        help = "Sort order: name-asc, name-desc, level-asc or level-desc (default: catalog order)."
    )]
    pub sort: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.pokedex/config.yml when present)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a commented default config file if none exists, then exit."
    )]
    pub init_config: bool,

    #[arg(
        long = "list-types",
        help_heading = "Input",
        help = "List the type labels with their colours, then exit."
    )]
    pub list_types: bool,

    #[arg(
        short = 'i',
        long = "interactive",
        help_heading = "Input",
        help = "Read search/type/sort commands from stdin and re-render after each one."
    )]
    pub interactive: bool,
}
