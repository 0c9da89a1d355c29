//! User feedback collected for the admin dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::validation::{self, FieldErrors};
use crate::domain::Resource;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    pub full_name: String,
    pub feedback: String,
    /// Star rating, 1 through 5 inclusive.
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

impl Resource for Feedback {
    fn resource_name() -> &'static str {
        "feedbacks"
    }

    fn resource_name_singular() -> &'static str {
        "feedback"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackInput {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl FeedbackInput {
    pub fn into_new_feedback(self) -> Result<Feedback, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.check("fullName", validation::required(self.full_name.as_deref()));
        errors.check("feedback", validation::required(self.feedback.as_deref()));
        match self.rating {
            None => errors.insert("rating", "is required"),
            Some(rating) if !(1.0..=5.0).contains(&rating) => {
                errors.insert("rating", "must be between 1 and 5");
            }
            Some(_) => {}
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Feedback {
            id: Uuid::new_v4(),
            full_name: self.full_name.unwrap_or_default(),
            feedback: self.feedback.unwrap_or_default(),
            rating: self.rating.unwrap_or_default(),
            created_at: Utc::now(),
        })
    }
}
