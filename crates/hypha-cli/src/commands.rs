//! Subcommand implementations.

use std::io::{self, BufRead, Write};

use anyhow::{Context as _, Result, bail};
use hypha_client::{
  ApiClient, ApiConfig,
  auth::{AuthContext, RouteDecision, guard},
  terms::TermEditor,
};
use hypha_core::{api::GraphApi, entity::UiCategory, term::EntityTermWrite};
use hypha_filter::{
  FilterEngine, FilterResult, FilterState, FilterValue, active_filters, presets,
};
use tracing::info;
use uuid::Uuid;

use crate::{Command, EntityArgs, SourceArgs, TermCommand, settings::Settings};

pub async fn run(command: Command, settings: &Settings) -> Result<()> {
  let client = ApiClient::new(ApiConfig {
    base_url: settings.base_url.clone(),
    token:    settings.token.clone(),
  })
  .context("failed to build HTTP client")?;

  match command {
    Command::Login { email, password } => {
      let password = match password {
        Some(p) => p,
        None => read_password()?,
      };
      let token = client.login(&email, &password).await.context("login failed")?;
      info!(email, "logged in");
      println!("{token}");
      Ok(())
    }
    Command::Whoami => {
      let ctx = require_session(&client).await?;
      if let Some(user) = ctx.user {
        println!("{} <{}>", user.display_name(), user.email);
      }
      Ok(())
    }
    Command::Sources(args) => sources(&client, args).await,
    Command::Source { id } => source_detail(&client, id).await,
    Command::Entities(args) => entities(&client, args, &settings.language).await,
    Command::Entity { id } => entity_detail(&client, id, &settings.language).await,
    Command::Terms(cmd) => {
      require_session(&client).await?;
      terms(&client, cmd).await
    }
  }
}

/// Fail unless the configured token belongs to a live session.
async fn require_session(client: &ApiClient) -> Result<AuthContext> {
  let ctx = AuthContext::resolve(client).await.context("checking session")?;
  match guard(&ctx) {
    RouteDecision::Allow => Ok(ctx),
    RouteDecision::Pending | RouteDecision::RedirectToLogin => {
      bail!("not logged in; run `hypha login` and pass --token")
    }
  }
}

// ─── Lists ────────────────────────────────────────────────────────────────────

/// Build the filter state the list flags describe.
pub fn source_state(args: &SourceArgs) -> FilterState {
  let mut state = FilterState::new();
  if !args.kind.is_empty() {
    state.set(presets::KIND, FilterValue::Checkbox(args.kind.clone()));
  }
  if let Some((lo, hi)) = args.year {
    state.set(presets::YEAR, FilterValue::Range(lo, hi));
  }
  if let Some((lo, hi)) = args.trust {
    state.set(presets::TRUST_LEVEL, FilterValue::Range(lo, hi));
  }
  if let Some(q) = &args.search {
    state.set(presets::SEARCH, FilterValue::Search(q.clone()));
  }
  state
}

async fn sources(client: &ApiClient, args: SourceArgs) -> Result<()> {
  let items = client.list_sources().await.context("fetching sources")?;
  let configs = presets::source_filters(&items);
  let state = source_state(&args);

  let result = FilterEngine::new().compute(&items, &state, &configs);
  for s in &result.filtered_items {
    let year = s.year.map(|y| y.to_string()).unwrap_or_else(|| "—".into());
    let trust = s
      .trust_level
      .map(|t| format!("{:.0}%", t * 100.0))
      .unwrap_or_else(|| "—".into());
    println!("{}  {:<13} {:>4}  {:>4}  {}", s.id, s.kind, year, trust, s.title);
  }
  print_summary(&result, &state, &configs);
  Ok(())
}

/// Map `--category` arguments, given as slugs or ids, to category ids.
/// Unknown values pass through unchanged so they simply match nothing.
pub fn category_ids(args: &[String], categories: &[UiCategory]) -> Vec<String> {
  args
    .iter()
    .map(|arg| {
      categories
        .iter()
        .find(|c| c.slug == *arg)
        .map_or_else(|| arg.clone(), |c| c.id.to_string())
    })
    .collect()
}

async fn entities(client: &ApiClient, args: EntityArgs, language: &str) -> Result<()> {
  let items = client.list_entities().await.context("fetching entities")?;
  let categories = client
    .list_ui_categories()
    .await
    .context("fetching categories")?;
  let configs = presets::entity_filters(&categories, language);

  let mut state = FilterState::new();
  if !args.category.is_empty() {
    state.set(
      presets::UI_CATEGORY,
      FilterValue::Checkbox(category_ids(&args.category, &categories)),
    );
  }
  if let Some(q) = args.search {
    state.set(presets::SEARCH, FilterValue::Search(q));
  }

  let result = FilterEngine::new().compute(&items, &state, &configs);
  for e in &result.filtered_items {
    let category = e
      .ui_category_id
      .and_then(|id| categories.iter().find(|c| c.id == id))
      .map(|c| c.labels.resolve(language).unwrap_or(&c.slug))
      .unwrap_or("-");
    let summary = e.summary.resolve(language).unwrap_or("");
    println!(
      "{}  {:<24} {:<16} {}",
      e.id,
      e.display_name(language),
      category,
      summary
    );
  }
  print_summary(&result, &state, &configs);
  Ok(())
}

async fn source_detail(client: &ApiClient, id: Uuid) -> Result<()> {
  let Some(source) = client.get_source(id).await.context("fetching source")? else {
    bail!("source {id} not found");
  };
  println!("{} ({}, {})", source.title, source.kind, source.year.unwrap_or_default());
  if !source.authors.is_empty() {
    println!("  {}", source.authors.join(", "));
  }
  if let Some(url) = &source.url {
    println!("  {url}");
  }

  let relations = client
    .relations_by_source(id)
    .await
    .context("fetching relations")?;
  println!("\n{} claims", relations.len());
  for r in &relations {
    let confidence = r
      .confidence
      .map(|c| format!(" ({:.0}%)", c * 100.0))
      .unwrap_or_default();
    println!("  {} {}{}", r.kind, r.direction, confidence);
    for role in &r.roles {
      println!("    {:<12} {}", role.role_type, role.entity_id);
    }
  }
  Ok(())
}

async fn entity_detail(client: &ApiClient, id: Uuid, language: &str) -> Result<()> {
  let Some(entity) = client.get_entity(id).await.context("fetching entity")? else {
    bail!("entity {id} not found");
  };
  println!("{} ({})", entity.display_name(language), entity.slug);
  if let Some(summary) = entity.summary.resolve(language) {
    println!("  {summary}");
  }
  let names: Vec<_> = entity
    .names
    .iter()
    .map(|(lang, name)| format!("{name} [{lang}]"))
    .collect();
  if !names.is_empty() {
    println!("  names: {}", names.join(", "));
  }

  match aliases(client, id).await {
    Ok(terms) if !terms.is_empty() => {
      println!("  also known as: {}", terms.join(", "));
    }
    Ok(_) => {}
    Err(message) => eprintln!("aliases: {message}"),
  }

  let inferences = client
    .inferences_for_entity(id)
    .await
    .context("fetching inferences")?;
  for inf in &inferences {
    let uncertainty = inf
      .uncertainty
      .map(|u| format!(" ±{u:.2}"))
      .unwrap_or_default();
    println!("  inference {}{}: {}", inf.computed_at, uncertainty, inf.result);
  }
  Ok(())
}

/// Alternative terms of an entity in display order, or the editor's
/// user-facing message when they could not be loaded.
async fn aliases(
  client: &ApiClient,
  id: Uuid,
) -> std::result::Result<Vec<String>, String> {
  let mut editor = TermEditor::new(id);
  if !editor.load(client).await {
    return Err(editor.error().unwrap_or_default().to_owned());
  }
  Ok(editor.terms().iter().map(|t| t.term.clone()).collect())
}

fn print_summary<T>(
  result: &FilterResult<T>,
  state: &FilterState,
  configs: &[hypha_filter::FilterConfig<T>],
) {
  println!(
    "\nShowing {} of {} ({} hidden)",
    result.filtered_count, result.total_count, result.hidden_count
  );
  for chip in active_filters(state, configs) {
    println!("  {}: {}", chip.label, chip.display);
  }
}

// ─── Terms ────────────────────────────────────────────────────────────────────

async fn terms(client: &ApiClient, cmd: TermCommand) -> Result<()> {
  match cmd {
    TermCommand::List { entity } => {
      let mut editor = TermEditor::new(entity);
      if !editor.load(client).await {
        bail!("{}", editor.error().unwrap_or_default());
      }
      for t in editor.terms() {
        println!("{}  {:<4} {}", t.id, t.language.as_deref().unwrap_or("-"), t.term);
      }
      Ok(())
    }
    TermCommand::Add { entity, term, language, order } => {
      let mut editor = TermEditor::new(entity);
      editor.set_term(term);
      editor.set_language(language);
      editor.set_display_order(order);
      if !editor.can_save() {
        bail!("term must not be empty");
      }
      if !editor.save(client).await {
        bail!("{}", editor.error().unwrap_or_default());
      }
      if let Some(saved) = editor.terms().first() {
        println!("{}", saved.id);
      }
      Ok(())
    }
    TermCommand::Rm { entity, term } => {
      client
        .delete_term(entity, term)
        .await
        .context("deleting term")?;
      Ok(())
    }
    TermCommand::Replace { entity, terms } => {
      let writes = terms
        .iter()
        .enumerate()
        .map(|(i, raw)| {
          let (term, language) = match raw.rsplit_once('@') {
            Some((t, l)) => (t, Some(l)),
            None => (raw.as_str(), None),
          };
          EntityTermWrite {
            display_order: i32::try_from(i).ok(),
            ..EntityTermWrite::new(term, language)
          }
        })
        .collect();
      let stored = client
        .bulk_replace_terms(entity, writes)
        .await
        .context("replacing terms")?;
      println!("{} terms stored", stored.len());
      Ok(())
    }
  }
}

/// Read a password from stdin.
fn read_password() -> Result<String> {
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\n', '\r']).to_owned())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn source_state_only_holds_given_flags() {
    let state = source_state(&SourceArgs {
      kind: vec!["study".into()],
      year: Some((2000.0, 2010.0)),
      ..Default::default()
    });
    assert_eq!(state.active_count(), 2);
    assert_eq!(
      state.get(presets::KIND),
      Some(&FilterValue::Checkbox(vec!["study".into()]))
    );
    assert!(!state.is_active(presets::SEARCH));
  }

  #[test]
  fn category_slugs_resolve_to_ids() {
    let drugs = UiCategory {
      id:     Uuid::new_v4(),
      slug:   "drugs".into(),
      labels: Default::default(),
      order:  0,
    };
    let raw = Uuid::new_v4().to_string();
    let ids = category_ids(&["drugs".into(), raw.clone()], &[drugs.clone()]);
    assert_eq!(ids, vec![drugs.id.to_string(), raw]);
  }

  #[tokio::test]
  async fn unreachable_server_reports_alias_failure() {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://127.0.0.1:1".into(),
      token:    None,
    })
    .unwrap();
    assert_eq!(
      aliases(&client, Uuid::new_v4()).await,
      Err(hypha_client::terms::LOAD_FAILED_MESSAGE.to_owned())
    );
  }

  #[test]
  fn no_flags_means_no_filters() {
    assert_eq!(source_state(&SourceArgs::default()).active_count(), 0);
  }
}
