use serde::{Deserialize, Serialize};

/// The full set of user-selected constraints for one search session.
/// `Default` is the neutral value: every criterion is a no-op.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search: String,
    pub location: String,
    pub job_types: Vec<String>,
    pub salary: SalaryBucket,
    pub posted: DatePosted,
}

/// Coarse salary bands over the `"<N>L - <M>L"` listing convention.
/// Compact wire forms are what the API accepts; the aliases keep the
/// original filter-panel labels working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalaryBucket {
    #[serde(rename = "Any", alias = "any")]
    Any,
    #[serde(rename = "3-6L", alias = "₹3L - ₹6L")]
    Band3To6,
    #[serde(rename = "6-10L", alias = "₹6L - ₹10L")]
    Band6To10,
    #[serde(rename = "10-20L", alias = "₹10L - ₹20L")]
    Band10To20,
    #[serde(rename = "20L+", alias = "₹20L+")]
    Band20Plus,
}

impl Default for SalaryBucket {
    fn default() -> Self {
        SalaryBucket::Any
    }
}

impl SalaryBucket {
    /// Inclusive band bounds in lakhs; `None` means the bucket is
    /// neutral, an open upper bound is `(lo, None)`.
    fn bounds(&self) -> Option<(u64, Option<u64>)> {
        match self {
            SalaryBucket::Any => None,
            SalaryBucket::Band3To6 => Some((3, Some(6))),
            SalaryBucket::Band6To10 => Some((6, Some(10))),
            SalaryBucket::Band10To20 => Some((10, Some(20))),
            SalaryBucket::Band20Plus => Some((20, None)),
        }
    }

    /// Overlap test between a job's parsed salary bounds and this band.
    pub fn admits(&self, job_min: u64, job_max: u64) -> bool {
        match self.bounds() {
            None => true,
            Some((lo, hi)) => job_max >= lo && hi.map_or(true, |hi| job_min <= hi),
        }
    }
}

/// Posting-recency windows, rolling relative to evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePosted {
    #[serde(rename = "any", alias = "Any time")]
    AnyTime,
    #[serde(rename = "24h", alias = "Past 24 hours")]
    Past24h,
    #[serde(rename = "week", alias = "Past week")]
    PastWeek,
    #[serde(rename = "month", alias = "Past month")]
    PastMonth,
}

impl Default for DatePosted {
    fn default() -> Self {
        DatePosted::AnyTime
    }
}

impl DatePosted {
    pub fn max_age_days(&self) -> Option<i64> {
        match self {
            DatePosted::AnyTime => None,
            DatePosted::Past24h => Some(1),
            DatePosted::PastWeek => Some(7),
            DatePosted::PastMonth => Some(30),
        }
    }
}
