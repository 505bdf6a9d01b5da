use chrono::{DateTime, Utc};

use crate::models::job::Job;
use crate::search::criteria::{DatePosted, FilterCriteria, SalaryBucket};
use crate::search::filter::filter_jobs;
use crate::search::pager::{paginate, Page, PAGE_SIZE};

/// One search session's UI state: the active criteria plus the current
/// page. Any criteria change snaps the page back to 1 so narrowing the
/// results can never leave the session on a page that no longer exists.
#[derive(Debug, Clone)]
pub struct SearchSession {
    criteria: FilterCriteria,
    current_page: usize,
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            current_page: 1,
        }
    }

    /// Seeds the text criteria from deep-link query parameters (`q`,
    /// `loc`). One-way, at session start only.
    pub fn seeded(search: Option<&str>, location: Option<&str>) -> Self {
        let mut session = Self::new();
        if let Some(q) = search {
            session.criteria.search = q.to_string();
        }
        if let Some(loc) = location {
            session.criteria.location = loc.to_string();
        }
        session
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn set_search(&mut self, query: &str) {
        if self.criteria.search != query {
            self.criteria.search = query.to_string();
            self.current_page = 1;
        }
    }

    pub fn set_location(&mut self, query: &str) {
        if self.criteria.location != query {
            self.criteria.location = query.to_string();
            self.current_page = 1;
        }
    }

    /// Checkbox semantics: adds the type if absent, removes it if
    /// present. Toggling always changes the set, so it always resets
    /// the page.
    pub fn toggle_job_type(&mut self, job_type: &str) {
        if let Some(index) = self.criteria.job_types.iter().position(|t| t == job_type) {
            self.criteria.job_types.remove(index);
        } else {
            self.criteria.job_types.push(job_type.to_string());
        }
        self.current_page = 1;
    }

    pub fn set_salary(&mut self, bucket: SalaryBucket) {
        if self.criteria.salary != bucket {
            self.criteria.salary = bucket;
            self.current_page = 1;
        }
    }

    pub fn set_posted(&mut self, posted: DatePosted) {
        if self.criteria.posted != posted {
            self.criteria.posted = posted;
            self.current_page = 1;
        }
    }

    pub fn clear_filters(&mut self) {
        if self.criteria != FilterCriteria::default() {
            self.criteria = FilterCriteria::default();
            self.current_page = 1;
        }
    }

    /// Page navigation clamps into `[1, total_pages]`; the pager itself
    /// stays clamp-free.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    /// Filters `jobs` with the session's criteria and slices out the
    /// session's page.
    pub fn page_of(&self, jobs: &[Job], now: DateTime<Utc>) -> Page<Job> {
        let filtered = filter_jobs(jobs, &self.criteria, now);
        paginate(&filtered, PAGE_SIZE, self.current_page)
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}
