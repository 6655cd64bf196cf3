use make_model_index::core::matcher::{resolve_title, TitleResolver};
use make_model_index::core::parser::build_index;
use make_model_index::core::serializer::{load_index, to_json_pretty};

const MAKES_DATA: &str = "civic, honda
accord, honda
cr-v, honda
model 3, tesla
model y, tesla
f-150, ford
mustang, ford
camry, toyota
corolla, toyota";

fn generated_index() -> make_model_index::MakeModelIndex {
    let built = build_index(MAKES_DATA.lines()).unwrap();
    // go through the JSON document the way consumers do
    load_index(&to_json_pretty(&built).unwrap()).unwrap()
}

#[test]
fn test_resolves_full_listing() {
    let index = generated_index();
    let found = resolve_title(&index, "2019 Ford F-150 XLT SuperCrew", 2026);

    assert_eq!(found.year, Some(2019));
    assert_eq!(found.make.as_deref(), Some("ford"));
    assert_eq!(found.model.as_deref(), Some("f-150"));
    assert_eq!(found.title, "2019 Ford F-150 XLT SuperCrew");
}

#[test]
fn test_two_word_model() {
    let index = generated_index();
    let found = resolve_title(&index, "2021 tesla model 3 long range", 2026);

    assert_eq!(found.make.as_deref(), Some("tesla"));
    assert_eq!(found.model.as_deref(), Some("model 3"));
}

#[test]
fn test_misspelled_make() {
    let index = generated_index();
    let found = resolve_title(&index, "2012 hond accord", 2026);

    assert_eq!(found.make.as_deref(), Some("honda"));
    assert_eq!(found.model.as_deref(), Some("accord"));
}

#[test]
fn test_incomplete_without_year() {
    let index = generated_index();
    let found = resolve_title(&index, "honda civic low miles", 2026);

    assert_eq!(found.make.as_deref(), Some("honda"));
    assert_eq!(found.year, None);
    assert_eq!(found.model, None);
    assert!(!found.is_complete());
}

#[test]
fn test_strict_threshold_disables_fuzzy_make() {
    let index = generated_index();
    let found = TitleResolver::new(&index, 2026)
        .with_threshold(0.95)
        .resolve("2012 hond accord");

    assert_eq!(found.make, None);
}

#[test]
fn test_year_upper_bound_is_next_year() {
    let index = generated_index();

    assert_eq!(resolve_title(&index, "2027 toyota camry", 2026).year, Some(2027));
    assert_eq!(resolve_title(&index, "2028 toyota camry", 2026).year, None);
    assert_eq!(resolve_title(&index, "1899 toyota camry", 2026).year, None);
}
