use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One repository as the dashboard sees it, normalized from the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub updated_at: DateTime<Utc>,
    pub url: String,
    pub is_fork: bool,
}

impl Repository {
    /// Description for display, with a placeholder when there is none
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or("No description")
    }

    /// Last update as a calendar date in the local timezone
    pub fn updated_date(&self) -> String {
        self.updated_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d")
            .to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::repo;

    #[test]
    fn test_description_placeholder() {
        assert_eq!(repo(1, "a", None).description_or_default(), "No description");
        assert_eq!(repo(1, "a", Some("  ")).description_or_default(), "  ");
        assert_eq!(repo(1, "a", Some("tools")).description_or_default(), "tools");
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(repo(7, "lib", Some("d"))).unwrap();
        assert_eq!(json["name"], "lib");
        assert_eq!(json["stars"], 70);
        assert_eq!(json["is_fork"], false);
    }
}
