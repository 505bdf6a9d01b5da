use rand::{thread_rng, Rng};

const SUFFIX_LENGTH: usize = 5;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// URL slug for a job posting: the lowercased title with spaces turned
/// into hyphens, plus a short random suffix so two postings with the
/// same title get distinct slugs.
pub fn generate_job_slug(title: &str) -> String {
    let mut rng = thread_rng();
    let suffix: String = (0..SUFFIX_LENGTH)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}", title.to_lowercase().replace(' ', "-"), suffix)
}
