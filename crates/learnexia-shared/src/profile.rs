//! Read models shown on the profile page

#[derive(Debug, Default, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileSummary {
    pub courses_enrolled: u32,
    pub total_watch_time: u64,
    pub completed_lectures: u32,
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WalletBalance {
    pub balance: Option<f64>,
}

impl WalletBalance {
    /// The balance to display. Missing or non finite values are shown as 0
    pub fn amount(&self) -> f64 {
        self.balance.filter(|x| x.is_finite()).unwrap_or(0.0)
    }
}

#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct CourseId(String);

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct CourseSummary {
    #[serde(rename = "_id")]
    pub id: CourseId,
    #[serde(default)]
    pub title: String,
}

impl From<&str> for CourseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CourseId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for CourseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn summary_fields_default_to_zero() {
        let actual: ProfileSummary = serde_json::from_str(r#"{"coursesEnrolled":3}"#).unwrap();
        assert_eq!(
            actual,
            ProfileSummary {
                courses_enrolled: 3,
                total_watch_time: 0,
                completed_lectures: 0
            }
        );
    }

    #[rstest]
    #[case::present(r#"{"balance":1250.5}"#, 1250.5)]
    #[case::null(r#"{"balance":null}"#, 0.0)]
    #[case::missing("{}", 0.0)]
    fn wallet_amount(#[case] json: &str, #[case] expected: f64) {
        let actual: WalletBalance = serde_json::from_str(json).unwrap();
        assert_eq!(actual.amount(), expected);
    }

    #[test]
    fn course_list_ignores_extra_fields() {
        let json = r#"[{"_id":"c1","title":"Rust Basics","price":499}]"#;
        let actual: Vec<CourseSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(actual[0].id.as_ref(), "c1");
        assert_eq!(actual[0].title, "Rust Basics");
    }
}
