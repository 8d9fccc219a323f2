use chrono::Utc;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Fresh account name for registration runs, e.g. `qa_tester_0915324871`.
pub fn unique_username(base: &str) -> String {
    let stamp = Utc::now().format("%H%M%S%3f");
    format!("{base}_{stamp}")
}
