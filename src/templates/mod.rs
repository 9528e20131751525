//! # Templates
//!
//! Server-rendered HTML built with maud. Every page goes through `layout::page`, which adds
//! the navigation (dependent on the login state), the flash message and the footer.

mod layout;
mod pages;

pub use pages::*;

use chrono::{DateTime, Utc};

/// Data every page needs, gathered once per request by the handlers
#[derive(Debug, Clone)]
pub struct TemplateData {
    pub current_year: i32,
    pub flash: Option<String>,
    pub is_authenticated: bool,
    pub csrf_token: String,
}

/// e.g. "17 Mar 2024 at 10:15", always in UTC
pub fn human_date(t: &DateTime<Utc>) -> String {
    t.format("%d %b %Y at %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn human_date_format() {
        let t = Utc.with_ymd_and_hms(2024, 3, 17, 10, 15, 0).unwrap();
        assert_eq!(human_date(&t), "17 Mar 2024 at 10:15");
    }
}
