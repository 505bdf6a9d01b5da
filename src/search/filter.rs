use chrono::{DateTime, Utc};

use crate::models::job::Job;
use crate::search::criteria::FilterCriteria;

const MS_PER_DAY: i64 = 86_400_000;

/// Applies the conjunction of all active criteria to `jobs`, preserving
/// input order. Pure: evaluation time is the explicit `now` argument.
pub fn filter_jobs(jobs: &[Job], criteria: &FilterCriteria, now: DateTime<Utc>) -> Vec<Job> {
    jobs.iter()
        .filter(|job| matches(job, criteria, now))
        .cloned()
        .collect()
}

fn matches(job: &Job, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
    if !criteria.search.is_empty() {
        let query = criteria.search.to_lowercase();
        let in_title = job.title.to_lowercase().contains(&query);
        let in_company = job.company_name.to_lowercase().contains(&query);
        let in_tags = job.tags.iter().any(|tag| tag.to_lowercase().contains(&query));
        if !in_title && !in_company && !in_tags {
            return false;
        }
    }

    if !criteria.location.is_empty() {
        let query = criteria.location.to_lowercase();
        if !job.location.to_lowercase().contains(&query) {
            return false;
        }
    }

    if !criteria.job_types.is_empty()
        && !criteria.job_types.iter().any(|t| t == job.job_type.as_str())
    {
        return false;
    }

    // Listings whose salary text yields no parsable bounds pass every
    // bucket: malformed-but-real listings must not be hidden.
    let salary_text = job.salary_range.as_deref().unwrap_or("");
    if let Some((job_min, job_max)) = parse_salary_bounds(salary_text) {
        if !criteria.salary.admits(job_min, job_max) {
            return false;
        }
    }

    if let Some(max_age) = criteria.posted.max_age_days() {
        if age_in_days(job.created_at, now) > max_age {
            return false;
        }
    }

    true
}

/// Extracts up to two numbers from a salary string, each being a run of
/// ASCII digits immediately followed by `L` (`"₹5L - ₹8L"` → `(5, 8)`,
/// `"12L"` → `(12, 12)`). Returns `None` when the text carries no such
/// pattern. A single bound is treated as both min and max; an inverted
/// pair is kept as written.
pub fn parse_salary_bounds(text: &str) -> Option<(u64, u64)> {
    let bytes = text.as_bytes();
    let mut numbers: Vec<u64> = Vec::new();
    let mut i = 0;
    while i < bytes.len() && numbers.len() < 2 {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if bytes.get(i) == Some(&b'L') {
                if let Ok(value) = text[start..i].parse::<u64>() {
                    numbers.push(value);
                }
            }
        } else {
            i += 1;
        }
    }

    let min = *numbers.first()?;
    let max = numbers.get(1).copied().unwrap_or(min);
    Some((min, max))
}

/// Rolling-window age: ceiling of the absolute elapsed time in days.
/// An instant exactly `n` days old counts as `n`, anything past it as
/// `n + 1`.
fn age_in_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed_ms = (now - created_at).num_milliseconds().abs();
    (elapsed_ms + MS_PER_DAY - 1) / MS_PER_DAY
}
