use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use crate::db::PollStore;
use crate::models::poll_models::{Choice, Poll};
use crate::utils::error::{AppError, AppResult};

/// One entry of a seed file. Choices are stored in the order they are listed.
#[derive(Debug, Deserialize)]
pub struct SeedPoll {
    pub question: String,
    #[serde(default)]
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub choices: Vec<String>,
}

pub fn parse_seed(raw: &str) -> AppResult<Vec<SeedPoll>> {
    let seeds: Vec<SeedPoll> = serde_json::from_str(raw)?;

    if let Some(blank) = seeds.iter().find(|s| s.question.trim().is_empty()) {
        return Err(AppError::ValidationError(format!(
            "Seed poll has an empty question (choices: {:?})",
            blank.choices
        )));
    }

    Ok(seeds)
}

pub fn load_seed_file(path: &Path) -> AppResult<Vec<SeedPoll>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::ConfigError(format!("Failed to read seed file {}: {}", path.display(), e))
    })?;
    parse_seed(&raw)
}

pub async fn create_poll(
    store: &dyn PollStore,
    question: &str,
    pub_date: DateTime<Utc>,
    choice_texts: &[String],
) -> AppResult<(Poll, Vec<Choice>)> {
    let poll = Poll::new(question.trim(), pub_date);
    store.insert_poll(&poll).await?;

    let mut choices = Vec::with_capacity(choice_texts.len());
    for text in choice_texts {
        let choice = Choice::new(poll.id, text.trim());
        store.insert_choice(&choice).await?;
        choices.push(choice);
    }

    Ok((poll, choices))
}

/// Inserts every seed poll whose question is not stored yet, so running it on
/// each startup against a persistent store adds nothing the second time.
/// Returns the number of polls inserted.
pub async fn apply_seed(store: &dyn PollStore, seeds: &[SeedPoll]) -> AppResult<usize> {
    let mut inserted = 0;
    for seed in seeds {
        if store.find_poll_by_question(seed.question.trim()).await?.is_some() {
            debug!(question = %seed.question, "Seed poll already present, skipping");
            continue;
        }

        let pub_date = seed.pub_date.unwrap_or_else(Utc::now);
        create_poll(store, &seed.question, pub_date, &seed.choices).await?;
        inserted += 1;
    }

    info!(inserted, skipped = seeds.len() - inserted, "Seed data applied");
    Ok(inserted)
}
