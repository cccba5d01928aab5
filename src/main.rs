//! CLI front end over the atlas dataset.
//!
//! Usage:
//!   atlas-explorer list --goal work-faster --sort difficulty
//!   atlas-explorer assess --goal work-at-scale --timeline balanced --org-size small
//!   atlas-explorer show klarna-support-assistant
//!   atlas-explorer save klarna-support-assistant

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use prettytable::{Table, row};
use tracing::info;

use atlas_explorer::config::Config;
use atlas_explorer::dataset::{Dataset, Sector, UseCase};
use atlas_explorer::derive::{difficulty_level, investment_level, roi_timeline, timeline_estimate};
use atlas_explorer::filters::{
    Goal, SortKey, Timeline, filter_by_sectors, filter_opportunities, related_cases, search_cases,
    sort_opportunities,
};
use atlas_explorer::formatters::{emphasize_metrics, format_date, truncate_text};
use atlas_explorer::matcher::FrameworkMatcher;
use atlas_explorer::score::{Answers, OrgSize, recommend};
use atlas_explorer::state::{Action, AppState, SearchQuery, StateStore, ViewMode};

#[derive(Parser)]
#[command(name = "atlas-explorer")]
#[command(about = "Browse, filter, and score GenAI adoption case studies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explore cases with filters, search, and sorting
    List {
        #[arg(long)]
        goal: Option<Goal>,
        #[arg(long)]
        timeline: Option<Timeline>,
        #[arg(long)]
        industry: Option<String>,
        /// Restrict to one or more sectors
        #[arg(long)]
        sector: Vec<Sector>,
        /// Substring search over organization, category, and application
        #[arg(long)]
        search: Option<String>,
        /// Sort order; falls back to the persisted preference
        #[arg(long)]
        sort: Option<SortKey>,
        /// grid (cards) or list (table); falls back to the persisted preference
        #[arg(long)]
        view: Option<ViewMode>,
        /// Only show saved opportunities
        #[arg(long)]
        saved: bool,
    },
    /// Show one case in full, with derived attributes and related cases
    Show { id: String },
    /// List cases sharing an industry or category with the given case
    Related {
        id: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Score the dataset against your answers and print the best fits
    Assess {
        #[arg(long)]
        goal: Option<Goal>,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        org_size: Option<OrgSize>,
        #[arg(long)]
        timeline: Option<Timeline>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Save an opportunity for later
    Save { id: String },
    /// Remove a saved opportunity
    Unsave { id: String },
    /// List saved opportunities
    Saved,
    /// List recent assessment searches
    Recent,
    /// List all industries in the dataset
    Industries,
    /// List all sectors in the dataset
    Sectors,
}

fn main() -> Result<()> {
    atlas_explorer::load_env();
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("ATLAS_LOG").unwrap_or_else(|_| "atlas_explorer=warn".to_string()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let dataset = Dataset::load(&config)?;
    let matcher = FrameworkMatcher::new(dataset.frameworks());
    let mut store = StateStore::open(&config.state_path);

    match cli.command {
        Commands::List {
            goal,
            timeline,
            industry,
            sector,
            search,
            sort,
            view,
            saved,
        } => {
            let mut cases = filter_opportunities(
                dataset.use_cases(),
                goal,
                timeline,
                industry.as_deref(),
                &matcher,
            );
            cases = filter_by_sectors(cases, &sector);
            if let Some(term) = &search {
                cases = search_cases(cases, term);
            }
            if saved {
                cases.retain(|uc| store.state().is_saved(&uc.id));
            }
            let effective_sort = sort.unwrap_or_else(|| {
                store
                    .state()
                    .preferences
                    .sort
                    .parse()
                    .unwrap_or(SortKey::Unsorted)
            });
            let cases = sort_opportunities(cases, effective_sort, &matcher);
            info!(count = cases.len(), "listing cases");
            match view.unwrap_or(store.state().preferences.view) {
                ViewMode::Grid => print_cards(&cases, &matcher, store.state()),
                ViewMode::List => print_table(&cases, &matcher),
            }
            // Remember explicit view/sort choices for next time.
            if view.is_some() || sort.is_some() {
                store.dispatch(Action::SetPreferences {
                    view,
                    sort: sort.map(|s| sort_name(s).to_string()),
                });
            }
        }
        Commands::Show { id } => match dataset.use_case_by_id(&id) {
            Some(uc) => print_detail(uc, &dataset, &matcher, config.related_limit),
            None => println!("No case with id \"{id}\""),
        },
        Commands::Related { id, limit } => match dataset.use_case_by_id(&id) {
            Some(uc) => {
                let related =
                    related_cases(uc, dataset.use_cases(), limit.unwrap_or(config.related_limit));
                if related.is_empty() {
                    println!("No related cases for \"{id}\"");
                } else {
                    print_table(&related, &matcher);
                }
            }
            None => println!("No case with id \"{id}\""),
        },
        Commands::Assess {
            goal,
            industry,
            org_size,
            timeline,
            limit,
        } => {
            let answers = Answers {
                goal,
                industry,
                org_size,
                timeline,
            };
            let recs = recommend(
                dataset.use_cases(),
                &answers,
                &matcher,
                limit.unwrap_or(config.recommend_limit),
            );
            if recs.is_empty() {
                println!("No matches for those answers. Try loosening a criterion.");
            }
            for rec in &recs {
                let uc = rec.use_case;
                println!(
                    "{} - {} ({})\n  Fit score {}/28 | {} difficulty | {}",
                    uc.organization,
                    uc.use_case_category,
                    uc.industry,
                    rec.score,
                    difficulty_level(uc, &matcher),
                    timeline_estimate(uc, &matcher),
                );
                if let Some(first) = uc.results.first() {
                    println!("  {}", emphasize_metrics(first));
                }
                println!("  id: {}\n", uc.id);
            }
            if let (Some(goal), Some(timeline)) = (answers.goal, answers.timeline) {
                store.dispatch(Action::AddRecentSearch(SearchQuery {
                    goal: goal.as_str().to_string(),
                    timeline: timeline.as_str().to_string(),
                    industry: answers.industry.clone(),
                    timestamp: Utc::now().timestamp_millis(),
                }));
            }
        }
        Commands::Save { id } => {
            if dataset.use_case_by_id(&id).is_none() {
                println!("No case with id \"{id}\"");
            } else {
                store.dispatch(Action::SaveOpportunity(id.clone()));
                println!("Saved \"{id}\"");
            }
        }
        Commands::Unsave { id } => {
            store.dispatch(Action::RemoveOpportunity(id.clone()));
            println!("Removed \"{id}\"");
        }
        Commands::Saved => {
            // Ids that no longer resolve are skipped, not errors.
            let saved: Vec<&UseCase> = store
                .state()
                .saved_opportunities
                .iter()
                .filter_map(|id| dataset.use_case_by_id(id))
                .collect();
            if saved.is_empty() {
                println!("No saved opportunities yet.");
            } else {
                print_table(&saved, &matcher);
            }
        }
        Commands::Recent => {
            let searches = &store.state().recent_searches;
            if searches.is_empty() {
                println!("No recent searches.");
            }
            for search in searches {
                let industry = search.industry.as_deref().unwrap_or("any industry");
                println!("{} / {} / {}", search.goal, search.timeline, industry);
            }
        }
        Commands::Industries => {
            for industry in dataset.industries() {
                println!("{industry}");
            }
        }
        Commands::Sectors => {
            for sector in dataset.sectors() {
                println!("{sector}");
            }
        }
    }

    Ok(())
}

fn sort_name(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Difficulty => "difficulty",
        SortKey::Industry => "industry",
        SortKey::Organization => "organization",
        SortKey::Recent => "recent",
        SortKey::Unsorted => "unsorted",
    }
}

fn print_table(cases: &[&UseCase], matcher: &FrameworkMatcher<'_>) {
    let mut table = Table::new();
    table.add_row(row![
        "ID",
        "Organization",
        "Industry",
        "Category",
        "Difficulty",
        "Timeline"
    ]);
    for uc in cases {
        table.add_row(row![
            uc.id,
            uc.organization,
            uc.industry,
            uc.use_case_category,
            difficulty_level(uc, matcher),
            timeline_estimate(uc, matcher)
        ]);
    }
    table.printstd();
}

fn print_cards(cases: &[&UseCase], matcher: &FrameworkMatcher<'_>, state: &AppState) {
    for uc in cases {
        let saved = if state.is_saved(&uc.id) { " [saved]" } else { "" };
        println!("{} - {}{}", uc.organization, uc.use_case_category, saved);
        println!("  {} | {} sector", uc.industry, uc.sector);
        println!(
            "  {} difficulty | {} | invest: {}",
            difficulty_level(uc, matcher),
            timeline_estimate(uc, matcher),
            investment_level(uc, matcher),
        );
        for result in uc.results.iter().take(3) {
            println!("  * {}", emphasize_metrics(result));
        }
        println!("  {}", truncate_text(&uc.challenge, 100));
        println!("  id: {}\n", uc.id);
    }
}

fn print_detail(
    uc: &UseCase,
    dataset: &Dataset,
    matcher: &FrameworkMatcher<'_>,
    related_limit: usize,
) {
    println!("{} - {}", uc.organization, uc.specific_application);
    println!("{} | {} sector | {}", uc.industry, uc.sector, uc.use_case_category);
    println!(
        "Difficulty: {} | Timeline: {} | Investment: {} | ROI: {}",
        difficulty_level(uc, matcher),
        timeline_estimate(uc, matcher),
        investment_level(uc, matcher),
        roi_timeline(uc, matcher),
    );
    println!("\nChallenge: {}", uc.challenge);
    println!("Solution:  {}", uc.solution);
    println!("\nResults:");
    for result in &uc.results {
        println!("  * {}", emphasize_metrics(result));
    }
    println!("\nKey insight: {}", uc.key_insight);
    if let Some(primary) = uc.sources.first() {
        println!("\nPrimary source: {} ({})", primary.publisher, primary.url);
    }
    for source in uc.sources.iter().skip(1) {
        println!("Also: {} ({})", source.publisher, source.url);
    }
    if !uc.tags.is_empty() {
        println!("Tags: {}", uc.tags.join(", "));
    }
    println!("Last reviewed: {}", format_date(uc.last_reviewed));

    let related = related_cases(uc, dataset.use_cases(), related_limit);
    if !related.is_empty() {
        println!("\nRelated cases:");
        for other in related {
            println!("  {} - {} ({})", other.id, other.organization, other.use_case_category);
        }
    }
}
