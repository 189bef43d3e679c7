use std::collections::HashSet;

use crate::catalog::{Catalog, Pokemon};
use crate::controller::{
    CollectingSink, Control, Controller, ControllerError, ControllerState, DisplaySurface,
    FileSurface, Inputs, MemorySurface, ValueField,
};
use crate::output::{self, Background, DisplayOutput, OutputFormat};
use crate::palette::{self, TypeColors};
use crate::view::{self, SortOrder, ViewQuery};

fn names(view: &[&Pokemon]) -> Vec<String> {
    view.iter().map(|p| p.name.clone()).collect()
}

fn query(search: &str, type_filter: &str, sort: &str) -> ViewQuery {
    ViewQuery::new(search, type_filter, sort)
}

fn fields(search: &str, type_filter: &str, sort: &str) -> Inputs<ValueField> {
    Inputs {
        search: ValueField::new(search),
        type_filter: ValueField::new(type_filter),
        sort: ValueField::new(sort),
    }
}

fn html_controller(
    inputs: Inputs<ValueField>,
) -> Controller<ValueField, MemorySurface, CollectingSink> {
    Controller::new(
        Catalog::builtin(),
        TypeColors::builtin(),
        inputs,
        MemorySurface::default(),
        CollectingSink::default(),
        OutputFormat::Html,
    )
}

fn card_for(name: &str) -> output::Card {
    let catalog = Catalog::builtin();
    let pokemon = catalog.get(name).unwrap();
    output::Card::from_pokemon(pokemon, &TypeColors::builtin()).unwrap()
}

#[test]
fn search_matches_name_substring_case_insensitively() {
    let catalog = Catalog::builtin();
    let view = view::compute_view(&catalog, &query("chu", "", ""));
    assert_eq!(names(&view), vec!["Pikachu", "Raichu"]);

    let view = view::compute_view(&catalog, &query("PIKA", "", ""));
    assert_eq!(names(&view), vec!["Pikachu"]);
}

#[test]
fn search_has_no_false_positives_or_negatives() {
    let catalog = Catalog::builtin();
    for search in ["", "a", "ON", "ée", "zzz999", "R", "flo"] {
        let view = view::compute_view(&catalog, &query(search, "", ""));
        let expected: Vec<String> = catalog
            .entries()
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&search.to_lowercase()))
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(names(&view), expected, "search {search:?}");
    }
}

#[test]
fn type_filter_is_a_raw_substring_match() {
    let catalog = Catalog::builtin();
    let view = view::compute_view(&catalog, &query("", "Poison", ""));
    assert_eq!(names(&view), vec!["Bulbizarre", "Ectoplasma", "Florizarre"]);

    let view = view::compute_view(&catalog, &query("", "Eau", ""));
    assert_eq!(
        names(&view),
        vec!["Carapuce", "Tortank", "Magicarpe", "Lokhlass"]
    );

    // raw field match: "Plante,Poison" and "Spectre,Poison" contain "e,P"
    let view = view::compute_view(&catalog, &query("", "e,P", ""));
    assert_eq!(names(&view), vec!["Bulbizarre", "Ectoplasma", "Florizarre"]);

    // case-sensitive like the raw field
    let view = view::compute_view(&catalog, &query("", "poison", ""));
    assert!(view.is_empty());
}

#[test]
fn empty_type_filter_is_identity() {
    let catalog = Catalog::builtin();
    let view = view::compute_view(&catalog, &query("", "", ""));
    assert_eq!(view.len(), catalog.len());
    let all: Vec<String> = catalog.entries().iter().map(|p| p.name.clone()).collect();
    assert_eq!(names(&view), all);
}

#[test]
fn name_and_type_filters_combine() {
    let catalog = Catalog::builtin();
    let view = view::compute_view(&catalog, &query("zarre", "Poison", "level-desc"));
    assert_eq!(names(&view), vec!["Florizarre", "Bulbizarre"]);
}

#[test]
fn name_ascending_is_accent_insensitive() {
    let catalog = Catalog::builtin();
    let view = view::compute_view(&catalog, &query("", "", "name-asc"));
    assert_eq!(
        names(&view),
        vec![
            "Bulbizarre",
            "Carapuce",
            "Dracaufeu",
            "Ectoplasma",
            "Évoli",
            "Florizarre",
            "Lokhlass",
            "Magicarpe",
            "Mélofée",
            "Mewtwo",
            "Onix",
            "Pikachu",
            "Raichu",
            "Rondoudou",
            "Ronflex",
            "Salamèche",
            "Tortank",
        ]
    );
}

#[test]
fn name_descending_reverses_ascending() {
    let catalog = Catalog::builtin();
    let asc = names(&view::compute_view(&catalog, &query("", "", "name-asc")));
    let mut desc = names(&view::compute_view(&catalog, &query("", "", "name-desc")));
    desc.reverse();
    assert_eq!(asc, desc);
}

#[test]
fn level_sorts_are_numeric_and_stable() {
    let catalog = Catalog::builtin();
    let asc = names(&view::compute_view(&catalog, &query("", "", "level-asc")));
    assert_eq!(
        asc,
        vec![
            "Magicarpe",
            "Carapuce",
            "Bulbizarre",
            "Mélofée",
            "Salamèche",
            "Évoli",
            "Rondoudou",
            "Onix",
            "Pikachu",
            "Lokhlass",
            "Raichu",
            "Ectoplasma",
            "Ronflex",
            "Dracaufeu",
            "Tortank",
            "Florizarre",
            "Mewtwo",
        ]
    );

    let desc = names(&view::compute_view(&catalog, &query("", "", "level-desc")));
    assert_eq!(desc.first().map(String::as_str), Some("Mewtwo"));
    assert_eq!(desc.last().map(String::as_str), Some("Magicarpe"));
    // ties keep catalog order in both directions
    fn pos(list: &[String], name: &str) -> usize {
        list.iter().position(|n| n == name).unwrap()
    }
    assert!(pos(&desc, "Pikachu") < pos(&desc, "Lokhlass"));
    assert!(pos(&desc, "Ectoplasma") < pos(&desc, "Ronflex"));
}

#[test]
fn every_sort_order_is_a_sorted_permutation_of_the_filtered_set() {
    let catalog = Catalog::builtin();
    for order in SortOrder::ALL {
        for type_filter in ["", "Eau", "Normal"] {
            let unsorted = view::compute_view(&catalog, &query("", type_filter, ""));
            let sorted = view::compute_view(&catalog, &query("", type_filter, order.as_str()));
            assert_eq!(sorted.len(), unsorted.len());
            let a: HashSet<_> = unsorted.iter().map(|p| p.name.as_str()).collect();
            let b: HashSet<_> = sorted.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(a, b);
            for pair in sorted.windows(2) {
                assert_ne!(
                    order.compare(pair[0], pair[1]),
                    std::cmp::Ordering::Greater,
                    "{} before {} under {}",
                    pair[0].name,
                    pair[1].name,
                    order.as_str()
                );
            }
        }
    }
}

#[test]
fn unknown_or_blank_sort_keeps_catalog_order() {
    let catalog = Catalog::builtin();
    let plain = names(&view::compute_view(&catalog, &query("o", "", "")));
    let unknown = names(&view::compute_view(&catalog, &query("o", "", "random")));
    assert_eq!(plain, unknown);

    assert_eq!(query("", "", "random").unrecognized_sort(), Some("random"));
    assert_eq!(query("", "", "  ").unrecognized_sort(), None);
    assert_eq!(query("", "", "level-asc").unrecognized_sort(), None);
}

#[test]
fn sort_order_parse_accepts_aliases() {
    assert_eq!(SortOrder::parse("name-asc"), Some(SortOrder::NameAsc));
    assert_eq!(SortOrder::parse(" NAME_DESC "), Some(SortOrder::NameDesc));
    assert_eq!(SortOrder::parse("niveau-asc"), Some(SortOrder::LevelAsc));
    assert_eq!(SortOrder::parse("level-desc"), Some(SortOrder::LevelDesc));
    assert_eq!(SortOrder::parse("level"), None);
}

#[test]
fn collation_key_folds_accents_and_case() {
    assert_eq!(view::collation_key("Évoli"), "evoli");
    assert_eq!(view::collation_key("Salamèche"), "salameche");
    assert_eq!(view::collation_key("MEWTWO"), "mewtwo");
}

#[test]
fn missing_levels_sort_last_when_ascending() {
    let mut missing = Pokemon::new("Missingno", "Normal", 0, "missingno.png");
    missing.level = None;
    let catalog = Catalog::from_entries(vec![
        missing,
        Pokemon::new("Mewtwo", "Psy", 70, "mewtwo.png"),
        Pokemon::new("Magicarpe", "Eau", 5, "magicarpe.png"),
    ]);
    let asc = names(&view::compute_view(&catalog, &query("", "", "level-asc")));
    assert_eq!(asc, vec!["Magicarpe", "Mewtwo", "Missingno"]);
    let desc = names(&view::compute_view(&catalog, &query("", "", "level-desc")));
    assert_eq!(desc, vec!["Missingno", "Mewtwo", "Magicarpe"]);
}

#[test]
fn no_match_renders_the_fixed_message() {
    let catalog = Catalog::builtin();
    let sink = CollectingSink::default();
    let view = view::compute_view(&catalog, &query("zzz999", "", ""));
    let rendered = output::render(&view, &TypeColors::builtin(), &sink);
    assert_eq!(rendered, DisplayOutput::Empty);
    assert_eq!(
        output::render_fragment(&rendered),
        "<p>Dracaufeu a tout brûlé, aucun Pokémon ne correspond à ta recherche !</p>"
    );
    assert!(sink.messages().is_empty());
}

#[test]
fn two_types_render_a_left_right_split() {
    let card = card_for("Lokhlass");
    assert_eq!(
        card.background,
        Background::Split(vec!["#6890F0".to_string(), "#98D8D8".to_string()])
    );
    assert_eq!(
        card.background.css(),
        "linear-gradient(to right, #6890F0 0% 50%, #98D8D8 50% 100%)"
    );
    let html = card.to_html();
    assert!(html.contains(
        r#"style="background: linear-gradient(to right, #6890F0 0% 50%, #98D8D8 50% 100%);""#
    ));
}

#[test]
fn single_type_renders_a_solid_colour() {
    let card = card_for("Mewtwo");
    assert_eq!(card.background, Background::Solid("#F85888".to_string()));
    assert_eq!(card.background.css(), "#F85888");
}

#[test]
fn unmapped_types_fall_back_to_default_colour() {
    let colors = TypeColors::builtin();
    let lone = Pokemon::new("Lugia", "Oiseau", 70, "lugia.png");
    let card = output::Card::from_pokemon(&lone, &colors).unwrap();
    assert_eq!(card.background, Background::Solid(palette::DEFAULT_COLOR.to_string()));

    let mixed = Pokemon::new("Ho-Oh", "Feu,Oiseau", 70, "hooh.png");
    let card = output::Card::from_pokemon(&mixed, &colors).unwrap();
    assert_eq!(
        card.background,
        Background::Split(vec!["#F08030".to_string(), "#ccc".to_string()])
    );
}

#[test]
fn three_types_split_evenly() {
    let colors = TypeColors::builtin();
    let pokemon = Pokemon::new("Chimère", "Eau,Glace,Psy", 12, "chimere.png");
    let card = output::Card::from_pokemon(&pokemon, &colors).unwrap();
    assert_eq!(
        card.background.css(),
        "linear-gradient(to right, #6890F0 0% 33.33%, #98D8D8 33.33% 66.67%, #F85888 66.67% 100%)"
    );
}

#[test]
fn card_markup_carries_image_name_types_and_level() {
    let html = card_for("Lokhlass").to_html();
    assert!(html.contains(r#"<div class="pokemon-card""#));
    assert!(html.contains(r#"<img src="images/lokhlass.png" alt="Lokhlass">"#));
    assert!(html.contains("<h2>Lokhlass</h2>"));
    assert!(html.contains("<div>Type: Eau / Glace</div>"));
    assert!(html.contains("<div>Niveau: 35</div>"));
}

#[test]
fn card_markup_escapes_text() {
    let colors = TypeColors::builtin();
    let pokemon = Pokemon::new("<b>Bad</b>", "Eau", 1, "bad.png");
    let html = output::Card::from_pokemon(&pokemon, &colors)
        .unwrap()
        .to_html();
    assert!(html.contains("<h2>&lt;b&gt;Bad&lt;/b&gt;</h2>"));
}

#[test]
fn incomplete_records_are_skipped_without_aborting() {
    let mut no_level = Pokemon::new("Missingno", "Normal", 0, "missingno.png");
    no_level.level = None;
    let catalog = Catalog::from_entries(vec![
        Pokemon::new("Pikachu", "Électrique", 35, "pikachu.png"),
        no_level,
        Pokemon::new("Mewtwo", "Psy", 70, "mewtwo.png"),
    ]);
    let sink = CollectingSink::default();
    let view = view::compute_view(&catalog, &query("", "", ""));
    assert_eq!(view.len(), 3);

    let rendered = output::render(&view, &TypeColors::builtin(), &sink);
    let shown: Vec<_> = rendered.cards().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(shown, vec!["Pikachu", "Mewtwo"]);

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Missingno"));
    assert!(messages[0].contains("level"));
}

#[test]
fn completeness_reports_each_missing_field() {
    let mut pokemon = Pokemon::new("", " , ", 1, "");
    pokemon.level = None;
    assert_eq!(pokemon.missing_fields(), vec!["name", "type", "level", "img"]);
    assert_eq!(
        Pokemon::new("Onix", "Roche,Sol", 0, "onix.png").missing_fields(),
        vec!["level"]
    );
    assert!(Pokemon::new("Onix", "Roche,Sol", 1, "onix.png").is_complete());
}

#[test]
fn level_zero_is_skipped_with_one_warning() {
    let catalog = Catalog::from_entries(vec![Pokemon::new("Zero", "Eau", 0, "zero.png")]);
    let sink = CollectingSink::default();
    let view = view::compute_view(&catalog, &query("", "", "level-asc"));
    assert_eq!(view.len(), 1);

    let rendered = output::render(&view, &TypeColors::builtin(), &sink);
    assert_eq!(rendered, DisplayOutput::Cards(Vec::new()));
    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Zero"));
    assert!(messages[0].contains("level"));
}

#[test]
fn trailing_comma_keeps_an_empty_label() {
    let pokemon = Pokemon::new("Tentacool", "Eau,", 12, "tentacool.png");
    assert_eq!(pokemon.types(), vec!["Eau", ""]);
    assert!(pokemon.is_complete());

    let card = output::Card::from_pokemon(&pokemon, &TypeColors::builtin()).unwrap();
    assert_eq!(
        card.background,
        Background::Split(vec!["#6890F0".to_string(), "#ccc".to_string()])
    );
    assert_eq!(card.type_line(), "Eau / ");

    let catalog = Catalog::from_entries(vec![pokemon]);
    assert_eq!(catalog.distinct_types(), vec!["Eau"]);
}

#[test]
fn types_are_split_on_commas_and_trimmed() {
    let pokemon = Pokemon::new("Onix", " Roche , Sol ", 30, "onix.png");
    assert_eq!(pokemon.types(), vec!["Roche", "Sol"]);
    assert_eq!(pokemon.image_path(), "images/onix.png");
}

#[test]
fn distinct_types_follow_first_seen_order() {
    let catalog = Catalog::builtin();
    let types = catalog.distinct_types();
    assert_eq!(types.len(), 14);
    assert_eq!(&types[..4], &["Électrique", "Plante", "Poison", "Feu"]);
    let palette = TypeColors::builtin();
    assert!(types.iter().all(|t| palette.is_mapped(t)));
}

#[test]
fn colour_overrides_merge_over_builtin_table() {
    let mut overrides = indexmap::IndexMap::new();
    overrides.insert("Eau".to_string(), "#000".to_string());
    overrides.insert("Dragon".to_string(), "#7038F8".to_string());
    overrides.insert(" ".to_string(), "#fff".to_string());
    let colors = TypeColors::with_overrides(&overrides, Some("#999"));

    assert_eq!(colors.color_for("Eau"), "#000");
    assert_eq!(colors.color_for("Dragon"), "#7038F8");
    assert_eq!(colors.color_for("Psy"), "#F85888");
    assert_eq!(colors.color_for("Oiseau"), "#999");
    let labels: Vec<_> = colors.labels().collect();
    assert_eq!(labels.len(), 15);
    assert_eq!(labels.last().copied(), Some("Dragon"));
    assert_eq!(labels[4], "Eau");
}

#[test]
fn hex_colours_parse_short_and_long_forms() {
    assert_eq!(palette::parse_hex_color("#ccc"), Some((204, 204, 204)));
    assert_eq!(palette::parse_hex_color("#F85888"), Some((248, 88, 136)));
    assert_eq!(palette::parse_hex_color("red"), None);
    assert_eq!(palette::parse_hex_color("#éé"), None);
}

#[test]
fn pipeline_is_idempotent() {
    let mut controller = html_controller(fields("a", "", "name-desc"));
    let first = controller.start().unwrap();
    let first_markup = controller.surface().content_str();
    let second = controller.on_change(Control::Search).unwrap();
    assert_eq!(first, second);
    assert_eq!(first_markup, controller.surface().content_str());
}

#[test]
fn controller_rerenders_wholesale_on_every_change() {
    let inputs = fields("", "", "");
    let handle = inputs.clone();
    let mut controller = html_controller(inputs);

    let rendered = controller.start().unwrap();
    assert_eq!(rendered.cards().len(), 17);
    assert_eq!(controller.passes(), 1);
    assert_eq!(controller.state(), ControllerState::Idle);

    handle.search.set("zzz999");
    let rendered = controller.on_change(Control::Search).unwrap();
    assert!(rendered.is_empty());
    assert_eq!(
        controller.surface().content_str(),
        format!("<p>{}</p>", output::EMPTY_MESSAGE)
    );

    handle.search.set("");
    handle.type_filter.set("Psy");
    let rendered = controller.on_change(Control::TypeFilter).unwrap();
    assert_eq!(rendered.cards().len(), 1);
    let markup = controller.surface().content_str();
    assert!(markup.contains("<h2>Mewtwo</h2>"));
    assert!(!markup.contains(output::EMPTY_MESSAGE));

    assert_eq!(controller.passes(), 3);
    assert_eq!(controller.surface().replacements(), 3);
}

#[test]
fn controller_warns_on_unknown_sort_and_keeps_catalog_order() {
    let mut controller = html_controller(fields("", "Eau", "shuffle"));
    let rendered = controller.start().unwrap();
    let shown: Vec<_> = rendered.cards().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(shown, vec!["Carapuce", "Tortank", "Magicarpe", "Lokhlass"]);
    let messages = controller.sink().messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("shuffle"));
}

struct BrokenSurface;

impl DisplaySurface for BrokenSurface {
    fn replace(&mut self, _content: &[u8]) -> Result<(), ControllerError> {
        Err(ControllerError::SurfaceWrite {
            target: "broken".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        })
    }
}

#[test]
fn surface_failure_propagates_and_returns_to_idle() {
    let mut controller = Controller::new(
        Catalog::builtin(),
        TypeColors::builtin(),
        fields("", "", ""),
        BrokenSurface,
        CollectingSink::default(),
        OutputFormat::Text,
    );
    let err = controller.start().unwrap_err();
    assert!(err.to_string().contains("broken"));
    assert_eq!(controller.state(), ControllerState::Idle);
    assert_eq!(controller.passes(), 1);
}

#[test]
fn file_surface_truncates_on_each_replace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.html");
    let mut surface = FileSurface::new(&path);
    surface.replace(b"a much longer first render").unwrap();
    surface.replace(b"short").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
}

#[test]
fn json_output_lists_cards_or_nothing() {
    assert_eq!(output::render_json(&DisplayOutput::Empty), b"[]".to_vec());

    let rendered = DisplayOutput::Cards(vec![card_for("Bulbizarre")]);
    let value: serde_json::Value =
        serde_json::from_slice(&output::render_json(&rendered)).unwrap();
    let first = &value[0];
    assert_eq!(first["name"], "Bulbizarre");
    assert_eq!(first["alt"], "Bulbizarre");
    assert_eq!(first["level"], 15);
    assert_eq!(first["image"], "images/bulbizarre.png");
    assert_eq!(
        first["background"],
        "linear-gradient(to right, #78C850 0% 50%, #A040A0 50% 100%)"
    );
}

#[test]
fn text_output_has_one_line_per_card() {
    let rendered = DisplayOutput::Cards(vec![card_for("Lokhlass"), card_for("Onix")]);
    let text = String::from_utf8(output::render_text(&rendered)).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.contains("Lokhlass"));
    assert!(text.contains("Eau / Glace"));
    assert!(text.contains("Niveau  35"));

    let empty = String::from_utf8(output::render_text(&DisplayOutput::Empty)).unwrap();
    assert_eq!(empty.trim_end(), output::EMPTY_MESSAGE);
}

#[test]
fn page_output_wraps_the_fragment() {
    let catalog = Catalog::builtin();
    let sink = CollectingSink::default();
    let view = view::compute_view(&catalog, &query("", "", "name-asc"));
    let rendered = output::render(&view, &TypeColors::builtin(), &sink);
    let page = String::from_utf8(output::encode(&rendered, OutputFormat::Page)).unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains(r#"<div class="pokemon-container">"#));
    assert!(page.contains("17 Pokémon"));
    assert!(page.contains(&output::render_fragment(&rendered)));
}

#[test]
fn output_format_parsing_and_inference() {
    assert_eq!(OutputFormat::parse("TXT"), Some(OutputFormat::Text));
    assert_eq!(OutputFormat::parse("fragment"), Some(OutputFormat::Html));
    assert_eq!(OutputFormat::parse("pdf"), None);
    assert_eq!(
        output::infer_format_from_path("out/Cards.HTML"),
        Some(OutputFormat::Page)
    );
    assert_eq!(
        output::infer_format_from_path("cards.json"),
        Some(OutputFormat::Json)
    );
    assert_eq!(output::infer_format_from_path("cards"), None);
}

#[test]
fn interactive_commands_parse() {
    use crate::cli::events::{parse_command, Command};

    assert_eq!(
        parse_command("search  pika ").unwrap(),
        Some(Command::Set {
            control: Control::Search,
            value: "pika".to_string()
        })
    );
    assert_eq!(
        parse_command("type").unwrap(),
        Some(Command::Set {
            control: Control::TypeFilter,
            value: String::new()
        })
    );
    assert_eq!(
        parse_command("SORT level-desc").unwrap(),
        Some(Command::Set {
            control: Control::Sort,
            value: "level-desc".to_string()
        })
    );
    assert_eq!(parse_command("quit").unwrap(), Some(Command::Quit));
    assert_eq!(parse_command("   ").unwrap(), None);
    assert_eq!(parse_command("# note").unwrap(), None);
    assert!(parse_command("dance").is_err());
}
