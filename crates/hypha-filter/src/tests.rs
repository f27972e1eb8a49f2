//! Tests for the filter engine, active-filter chips and presets.

use std::sync::Arc;

use hypha_core::{
  entity::{Entity, UiCategory},
  source::{Source, SourceKind},
  text::LocalizedText,
};
use uuid::Uuid;

use crate::{
  ActiveFilter, FilterConfig, FilterDrawer, FilterEngine, FilterKind,
  FilterOption, FilterState, FilterValue, active_filters, compute_filtered,
  presets,
};

// ─── Fixtures ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
struct Item {
  id:   u32,
  kind: &'static str,
  year: i32,
}

fn items() -> Vec<Item> {
  vec![
    Item { id: 1, kind: "A", year: 2020 },
    Item { id: 2, kind: "B", year: 2021 },
    Item { id: 3, kind: "A", year: 2022 },
  ]
}

fn configs() -> Vec<FilterConfig<Item>> {
  vec![
    FilterConfig::checkbox(
      "type",
      "Type",
      vec![FilterOption::new("A", "Type A"), FilterOption::new("B", "Type B")],
      |i: &Item| Some(i.kind.to_owned()),
    ),
    FilterConfig::year_range("year", "Year", 2020, 2022, |i: &Item| Some(i.year)),
    FilterConfig::search("q", "Search", |i: &Item| vec![format!("item {}", i.id)]),
  ]
}

fn ids(items: &[Item]) -> Vec<u32> { items.iter().map(|i| i.id).collect() }

fn checkbox(values: &[&str]) -> FilterValue {
  FilterValue::Checkbox(values.iter().map(|v| v.to_string()).collect())
}

// ─── compute_filtered ────────────────────────────────────────────────────────

#[test]
fn checkbox_filter_keeps_selected_type() {
  let filters = FilterState::new().with("type", checkbox(&["A"]));
  let r = compute_filtered(&items(), &filters, &configs());
  assert_eq!(ids(&r.filtered_items), vec![1, 3]);
  assert_eq!(r.total_count, 3);
  assert_eq!(r.filtered_count, 2);
  assert_eq!(r.hidden_count, 1);
}

#[test]
fn two_filters_combine_with_and() {
  let filters = FilterState::new()
    .with("type", checkbox(&["A"]))
    .with("year", FilterValue::Range(2020.0, 2021.0));
  let r = compute_filtered(&items(), &filters, &configs());
  assert_eq!(ids(&r.filtered_items), vec![1]);
}

#[test]
fn combined_result_is_subset_of_each_filter_alone() {
  let a = FilterState::new().with("type", checkbox(&["A", "B"]));
  let b = FilterState::new().with("year", FilterValue::Range(2021.0, 2022.0));
  let both = a.clone().with("year", FilterValue::Range(2021.0, 2022.0));

  let only_a = ids(&compute_filtered(&items(), &a, &configs()).filtered_items);
  let only_b = ids(&compute_filtered(&items(), &b, &configs()).filtered_items);
  let combined = ids(&compute_filtered(&items(), &both, &configs()).filtered_items);

  assert_eq!(combined, vec![2, 3]);
  assert!(combined.iter().all(|id| only_a.contains(id) && only_b.contains(id)));
}

#[test]
fn inactive_values_impose_no_constraint() {
  let filters = FilterState::new()
    .with("type", FilterValue::Checkbox(vec![]))
    .with("q", FilterValue::Search(String::new()));
  let r = compute_filtered(&items(), &filters, &configs());
  assert_eq!(r.filtered_items, items());
  assert_eq!(r.hidden_count, 0);
}

#[test]
fn empty_items_give_zero_counts() {
  let filters = FilterState::new().with("type", checkbox(&["A"]));
  let r = compute_filtered(&[], &filters, &configs());
  assert!(r.filtered_items.is_empty());
  assert_eq!((r.total_count, r.filtered_count, r.hidden_count), (0, 0, 0));
}

#[test]
fn state_entry_without_config_is_ignored() {
  let filters = FilterState::new().with("unknown", checkbox(&["x"]));
  let r = compute_filtered(&items(), &filters, &configs());
  assert_eq!(r.filtered_count, 3);
}

#[test]
fn search_is_case_insensitive_and_trimmed() {
  let filters = FilterState::new().with("q", FilterValue::Search("  ITEM 2 ".into()));
  let r = compute_filtered(&items(), &filters, &configs());
  assert_eq!(ids(&r.filtered_items), vec![2]);
}

#[test]
fn counts_always_add_up() {
  let states = [
    FilterState::new(),
    FilterState::new().with("type", checkbox(&["B"])),
    FilterState::new().with("year", FilterValue::Range(2030.0, 2040.0)),
    FilterState::new().with("q", FilterValue::Search("nothing".into())),
  ];
  for filters in &states {
    let r = compute_filtered(&items(), filters, &configs());
    assert_eq!(r.total_count, r.filtered_count + r.hidden_count);
    assert_eq!(r.filtered_count, r.filtered_items.len());
  }
}

#[test]
fn raw_predicate_config_is_applied_as_is() {
  let odd = FilterConfig::new("odd", FilterKind::Checkbox, "Odd", |i: &Item, _| {
    i.id % 2 == 1
  });
  let filters = FilterState::new().with("odd", checkbox(&["yes"]));
  let r = compute_filtered(&items(), &filters, &[odd]);
  assert_eq!(ids(&r.filtered_items), vec![1, 3]);
}

// ─── Range semantics ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
struct Scored(Option<f64>);

#[test]
fn missing_value_kept_only_under_full_range() {
  let cfg = vec![FilterConfig::range("s", "Score", 0.0, 1.0, |x: &Scored| x.0)];
  let data = vec![Scored(Some(0.2)), Scored(None), Scored(Some(0.9))];

  let full = FilterState::new().with("s", cfg[0].full_range().unwrap());
  assert_eq!(compute_filtered(&data, &full, &cfg).filtered_count, 3);

  let narrow = FilterState::new().with("s", FilterValue::Range(0.5, 1.0));
  let r = compute_filtered(&data, &narrow, &cfg);
  assert_eq!(r.filtered_items, vec![Scored(Some(0.9))]);
}

// ─── FilterEngine memoization ────────────────────────────────────────────────

#[test]
fn engine_returns_same_result_for_equal_inputs() {
  let mut engine = FilterEngine::new();
  let cfg = configs();
  let filters = FilterState::new().with("type", checkbox(&["A"]));

  let first = engine.compute(&items(), &filters, &cfg);
  // Fresh but value-equal arguments.
  let second = engine.compute(&items(), &filters.clone(), &cfg.clone());
  assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn engine_recomputes_when_any_input_changes() {
  let mut engine = FilterEngine::new();
  let cfg = configs();
  let filters = FilterState::new().with("type", checkbox(&["A"]));
  let first = engine.compute(&items(), &filters, &cfg);

  let other_filters = FilterState::new().with("type", checkbox(&["B"]));
  let second = engine.compute(&items(), &other_filters, &cfg);
  assert!(!Arc::ptr_eq(&first, &second));
  assert_eq!(ids(&second.filtered_items), vec![2]);

  let mut more = items();
  more.push(Item { id: 4, kind: "B", year: 2022 });
  let third = engine.compute(&more, &other_filters, &cfg);
  assert!(!Arc::ptr_eq(&second, &third));
  assert_eq!(third.filtered_count, 2);

  // Same descriptors, new predicate closures: not equal.
  let fourth = engine.compute(&more, &other_filters, &configs());
  assert!(!Arc::ptr_eq(&third, &fourth));
}

// ─── Active filters ──────────────────────────────────────────────────────────

#[test]
fn single_selection_shows_the_value() {
  let filters = FilterState::new().with("type", checkbox(&["A"]));
  assert_eq!(active_filters(&filters, &configs()), vec![ActiveFilter {
    key:     "type".into(),
    label:   "Type".into(),
    display: "A".into(),
  }]);
}

#[test]
fn multiple_selections_show_count() {
  let filters = FilterState::new().with("type", checkbox(&["A", "B"]));
  let chips = active_filters(&filters, &configs());
  assert_eq!(chips[0].display, "2 selected");
}

#[test]
fn range_is_rendered_as_list_count() {
  let filters = FilterState::new().with("year", FilterValue::Range(2020.0, 2021.0));
  let chips = active_filters(&filters, &configs());
  assert_eq!(chips[0].label, "Year");
  assert_eq!(chips[0].display, "2 selected");
}

#[test]
fn range_formatter_does_not_override_list_rendering() {
  let cfg = presets::source_filters(&[]);
  let filters =
    FilterState::new().with(presets::TRUST_LEVEL, FilterValue::Range(0.5, 1.0));
  assert_eq!(active_filters(&filters, &cfg)[0].display, "2 selected");
}

#[test]
fn search_uses_formatter_when_present() {
  let cfg = vec![
    FilterConfig::search("q", "Search", |i: &Item| vec![i.kind.to_owned()])
      .with_formatter(|v| format!("“{}”", v.as_search().unwrap_or_default())),
  ];
  let filters = FilterState::new().with("q", FilterValue::Search("aspirin".into()));
  assert_eq!(active_filters(&filters, &cfg)[0].display, "“aspirin”");

  let chips = active_filters(&filters, &configs());
  assert_eq!(chips[0].display, "aspirin");
}

#[test]
fn inactive_entries_produce_no_chips_and_unknown_keys_use_key_as_label() {
  let filters = FilterState::new()
    .with("type", FilterValue::Checkbox(vec![]))
    .with("q", FilterValue::Search(String::new()))
    .with("extra", checkbox(&["x"]));
  let chips = active_filters(&filters, &configs());
  assert_eq!(chips.len(), 1);
  assert_eq!(chips[0].key, "extra");
  assert_eq!(chips[0].label, "extra");
}

// ─── State & drawer ──────────────────────────────────────────────────────────

#[test]
fn active_count_ignores_inactive_entries() {
  let mut filters = FilterState::new()
    .with("type", checkbox(&["A"]))
    .with("q", FilterValue::Search(String::new()))
    .with("year", FilterValue::Range(2020.0, 2022.0));
  assert_eq!(filters.active_count(), 2);
  assert!(!filters.is_active("q"));

  filters.clear("type");
  assert_eq!(filters.active_count(), 1);
}

#[test]
fn drawer_toggles_and_clears() {
  let mut drawer = FilterDrawer::new();
  assert!(!drawer.is_open());
  drawer.toggle();
  assert!(drawer.is_open());

  let mut filters = FilterState::new().with("type", checkbox(&["A"]));
  assert_eq!(drawer.active_count(&filters), 1);
  drawer.clear_all(&mut filters);
  assert_eq!(drawer.active_count(&filters), 0);
  assert!(drawer.is_open());

  drawer.close();
  assert!(!drawer.is_open());
}

#[test]
fn filter_state_serialises_as_tagged_map() {
  let filters = FilterState::new().with("year", FilterValue::Range(2020.0, 2021.0));
  let json = serde_json::to_value(&filters).unwrap();
  assert_eq!(
    json,
    serde_json::json!({ "year": { "kind": "range", "value": [2020.0, 2021.0] } })
  );
}

// ─── Presets ─────────────────────────────────────────────────────────────────

fn source(kind: SourceKind, title: &str, year: Option<i32>) -> Source {
  Source {
    id: Uuid::new_v4(),
    kind,
    title: title.into(),
    authors: vec!["Vane JR".into()],
    year,
    origin: Some("Nature".into()),
    url: None,
    trust_level: Some(0.7),
    summary: None,
    created_at: None,
  }
}

#[test]
fn source_presets_filter_by_kind_year_and_search() {
  let sources = vec![
    source(SourceKind::Study, "Aspirin inhibits prostaglandin", Some(1971)),
    source(SourceKind::Review, "NSAIDs overview", Some(2005)),
    source(SourceKind::Study, "Ibuprofen trial", None),
  ];
  let cfg = presets::source_filters(&sources);
  assert_eq!(cfg[1].min, Some(1971.0));
  assert_eq!(cfg[1].max, Some(2005.0));
  assert!(cfg[0].options.iter().any(|o| o.value == "meta_analysis"
    && o.label == "Meta analysis"));

  let filters = FilterState::new()
    .with(presets::KIND, checkbox(&["study"]))
    .with(presets::YEAR, FilterValue::Range(1960.0, 1980.0));
  let r = compute_filtered(&sources, &filters, &cfg);
  assert_eq!(r.filtered_count, 1);
  assert_eq!(r.filtered_items[0].year, Some(1971));

  let filters = FilterState::new().with(presets::SEARCH, FilterValue::Search("vane".into()));
  assert_eq!(compute_filtered(&sources, &filters, &cfg).filtered_count, 3);
}

#[test]
fn trust_formatter_renders_percentages() {
  let cfg = presets::source_filters(&[]);
  let trust = cfg.iter().find(|c| c.id == presets::TRUST_LEVEL).unwrap();
  let format = trust.format_value.as_ref().unwrap();
  assert_eq!(format(&FilterValue::Range(0.5, 1.0)), "50% – 100%");
}

#[test]
fn entity_presets_use_localized_category_labels() {
  let analgesics = UiCategory {
    id:     Uuid::new_v4(),
    slug:   "analgesics".into(),
    labels: LocalizedText::new().with("en", "Analgesics").with("fr", "Antalgiques"),
    order:  2,
  };
  let diseases = UiCategory {
    id:     Uuid::new_v4(),
    slug:   "diseases".into(),
    labels: LocalizedText::new(),
    order:  1,
  };
  let cfg = presets::entity_filters(&[analgesics.clone(), diseases.clone()], "fr");
  let labels: Vec<_> = cfg[0].options.iter().map(|o| o.label.as_str()).collect();
  assert_eq!(labels, vec!["diseases", "Antalgiques"]);

  let entities = vec![
    Entity {
      id:             Uuid::new_v4(),
      slug:           "aspirin".into(),
      ui_category_id: Some(analgesics.id),
      label:          Some("Aspirin".into()),
      names:          LocalizedText::new().with("fr", "Aspirine"),
      summary:        LocalizedText::new().with("fr", "Anti-inflammatoire"),
      created_at:     None,
    },
    Entity {
      id:             Uuid::new_v4(),
      slug:           "migraine".into(),
      ui_category_id: Some(diseases.id),
      label:          None,
      names:          LocalizedText::new(),
      summary:        LocalizedText::new(),
      created_at:     None,
    },
  ];
  let analgesics_id = analgesics.id.to_string();
  let filters = FilterState::new()
    .with(presets::UI_CATEGORY, checkbox(&[analgesics_id.as_str()]));
  let r = compute_filtered(&entities, &filters, &cfg);
  assert_eq!(r.filtered_items[0].slug, "aspirin");

  let filters =
    FilterState::new().with(presets::SEARCH, FilterValue::Search("inflam".into()));
  assert_eq!(compute_filtered(&entities, &filters, &cfg).filtered_count, 1);

  // Localized names are searchable in every language, not only the UI one.
  let filters =
    FilterState::new().with(presets::SEARCH, FilterValue::Search("aspirine".into()));
  let r = compute_filtered(&entities, &filters, &cfg);
  assert_eq!(r.filtered_count, 1);
  assert_eq!(r.filtered_items[0].slug, "aspirin");
}
