use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::errors::NotificationError;
use super::model::Category;

static PLACEHOLDER: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").ok());

pub const DEFAULT_SUBJECT_TEMPLATE: &str = "[{app_name}] New {category} received";

/// Subject line template with `{app_name}` and `{category}` placeholders.
///
/// Unknown placeholders are left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectTemplate {
    template: String,
    app_name: String,
}

impl SubjectTemplate {
    pub fn new(
        template: impl Into<String>,
        app_name: impl Into<String>,
    ) -> Result<Self, NotificationError> {
        let template = template.into();
        let app_name = app_name.into();

        // Header values must stay on one line.
        if template.trim().is_empty()
            || template.contains(['\r', '\n'])
            || app_name.contains(['\r', '\n'])
        {
            return Err(NotificationError::InvalidSubjectTemplate);
        }

        Ok(Self { template, app_name })
    }

    pub fn render(&self, category: Category) -> String {
        match PLACEHOLDER.as_ref() {
            Some(re) => re
                .replace_all(&self.template, |caps: &Captures| match &caps[1] {
                    "app_name" => self.app_name.clone(),
                    "category" => category.to_string(),
                    _ => caps[0].to_string(),
                })
                .into_owned(),
            None => self.template.clone(),
        }
    }
}
