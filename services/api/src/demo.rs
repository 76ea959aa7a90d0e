use crate::infra::{parse_contract_type, parse_experience_level, seed_postings};
use chrono::Local;
use clap::Args;
use remote_jobs::applications::{ApplicationForm, ResumeFile, ResumeSource, SubmitError};
use remote_jobs::board::JobBoard;
use remote_jobs::catalog::{
    CatalogStore, ContractType, ExperienceLevel, FilterCriteria, Posting, PostingDraft,
    SyncedCatalog,
};
use remote_jobs::delivery::{InMemoryDelivery, ScriptedFailure};
use remote_jobs::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogListArgs {
    /// Contract types to keep (comma separated, e.g. "Full-time,Contract")
    #[arg(long, value_delimiter = ',', value_parser = parse_contract_type)]
    pub(crate) types: Vec<ContractType>,
    /// Experience levels to keep (comma separated, e.g. "Junior,Mid-Level")
    #[arg(long, value_delimiter = ',', value_parser = parse_experience_level)]
    pub(crate) levels: Vec<ExperienceLevel>,
    /// Case-insensitive text searched in title, company, and description
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// CSV file to read postings from instead of the sample catalog
    #[arg(long)]
    pub(crate) seed_csv: Option<PathBuf>,
    /// Print matching postings as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// CSV file to seed the demo catalog with
    #[arg(long)]
    pub(crate) seed_csv: Option<PathBuf>,
    /// Skip the application portion of the demo.
    #[arg(long)]
    pub(crate) skip_application: bool,
}

pub(crate) fn run_catalog_list(args: CatalogListArgs) -> Result<(), AppError> {
    let CatalogListArgs {
        types,
        levels,
        search,
        seed_csv,
        json,
    } = args;

    let store = CatalogStore::with_postings(seed_postings(seed_csv.as_deref())?);
    let criteria = FilterCriteria {
        types: types.into_iter().collect(),
        levels: levels.into_iter().collect(),
        search: search.unwrap_or_default(),
    };
    let matching = store.filter(&criteria);

    if json {
        match serde_json::to_string_pretty(&matching) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => println!("Catalog unavailable as JSON: {err}"),
        }
        return Ok(());
    }

    println!("{} of {} postings match", matching.len(), store.len());
    for posting in matching {
        render_posting(posting);
    }
    Ok(())
}

fn render_posting(posting: &Posting) {
    println!(
        "- [{}] {} at {} ({}, {} / {}) {}",
        posting.id,
        posting.title,
        posting.company,
        posting.location,
        posting.contract_type,
        posting.level,
        posting.salary
    );
}

fn demo_draft() -> PostingDraft {
    let mut draft = PostingDraft::new(Local::now().date_naive());
    draft.title = "Rust Backend Engineer".to_string();
    draft.company = "Ferrous Systems Collective".to_string();
    draft.location = "Remote - Worldwide".to_string();
    draft.salary = "80-100k €".to_string();
    draft.contract_type = ContractType::Contract;
    draft.level = ExperienceLevel::Senior;
    draft.description = "Build the async services behind our delivery platform.".to_string();
    draft.update_requirement(0, "Production Rust experience");
    draft.add_requirement();
    draft.update_requirement(1, "Comfortable with tokio and axum");
    draft.company_logo = "https://ferrous.example/logo.png".to_string();
    draft.contact_email = "jobs@ferrous.example".to_string();
    draft
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        seed_csv,
        skip_application,
    } = args;

    println!("Remote job board demo");
    let delivery = Arc::new(InMemoryDelivery::with_postings(seed_postings(
        seed_csv.as_deref(),
    )?));
    let catalog = SyncedCatalog::new(CatalogStore::new(), delivery.clone());
    let board = JobBoard::new(catalog, delivery.clone());
    let loaded = board.load().await?;
    println!("- Loaded {loaded} postings from the delivery boundary");

    let posting = board.create(demo_draft()).await?;
    println!("- Published posting {} ({})", posting.id, posting.title);

    let mut incomplete = demo_draft();
    incomplete.contact_email = "jobs at ferrous".to_string();
    incomplete.add_requirement();
    if let Err(err) = board.create(incomplete).await {
        println!("- Incomplete draft refused: {err}");
    }

    delivery.set_failure(Some(ScriptedFailure::Unavailable));
    if let Err(err) = board.create(demo_draft()).await {
        println!("- Publishing during an outage rolled back: {err}");
    }
    delivery.set_failure(None);

    let criteria = FilterCriteria::default()
        .with_level(ExperienceLevel::Senior)
        .with_search("remote");
    let seniors = board.list(&criteria).await;
    println!("\nSenior postings mentioning \"remote\": {}", seniors.len());
    let all = board.list(&FilterCriteria::default()).await;
    println!("Full catalog ({} postings):", all.len());
    for entry in &all {
        render_posting(entry);
    }

    if skip_application {
        return Ok(());
    }

    println!("\nApplying to {}", posting.title);
    let form = ApplicationForm::new(&posting);
    form.edit(|fields| {
        fields.full_name = "Ada Lovelace".to_string();
        fields.email = "ada@example.com".to_string();
        fields.phone = "+44 20 7946 0000".to_string();
        fields.cover_letter = "I enjoy making engines do surprising things.".to_string();
    });

    let photo = ResumeFile::new("portrait.png", "image/png", vec![0u8; 512]);
    if let Err(rejection) = form.select_resume(photo, ResumeSource::Drop) {
        println!("- Dropped file refused: {rejection}");
    }
    let resume = ResumeFile::new("ada-lovelace.pdf", "application/pdf", b"%PDF-1.7".to_vec());
    if form.select_resume(resume, ResumeSource::Browse).is_ok() {
        println!("- Résumé attached");
    }

    delivery.set_failure(Some(ScriptedFailure::Unavailable));
    match form.submit(delivery.as_ref()).await {
        Err(err @ SubmitError::Failed { .. }) => println!("- {}", err.user_notice()),
        Err(err) => println!("- Submission refused: {err}"),
        Ok(_) => println!("- Unexpectedly delivered during an outage"),
    }
    println!(
        "  Form kept for retry: name={} résumé={}",
        form.fields().full_name,
        form.resume().map(|file| file.file_name).unwrap_or_default()
    );

    delivery.set_failure(None);
    match form.submit(delivery.as_ref()).await {
        Ok(application) => println!(
            "- Application from {} delivered ({} byte résumé)",
            application.full_name,
            application.resume.size()
        ),
        Err(err) => println!("- Submission failed: {}", err.user_notice()),
    }
    let states: Vec<_> = form
        .transitions()
        .into_iter()
        .map(|state| state.label())
        .collect();
    println!("  Submission states: {}", states.join(" -> "));
    println!("  Applications received: {}", delivery.payloads().len());

    Ok(())
}
