use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::suggestion::{
        ActivityRecommendations, ActivityRequest, GuestProfile, UpgradeRequest,
        UpgradeSuggestions,
    },
    service::{
        completion::{CompletionRequest, CompletionService},
        suggestion::SuggestionService,
    },
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use shared::error::{AppError, AppResult};

/// Builds prompts for guest-facing suggestions and parses the structured
/// completion. Best effort: one attempt, any failure is an external error.
#[derive(new)]
pub struct SuggestionAdapter {
    completion: Arc<dyn CompletionService>,
}

fn describe_guest(guest: &GuestProfile) -> String {
    let interests = if guest.interests.is_empty() {
        "not specified".to_string()
    } else {
        guest.interests.join(", ")
    };
    format!(
        "Guest name: {}\nInterests: {}\nTravel purpose: {}\nParty size: {}",
        guest.name,
        interests,
        guest.travel_purpose.as_deref().unwrap_or("not specified"),
        guest.party_size,
    )
}

fn activity_prompt(request: &ActivityRequest) -> String {
    format!(
        "You are the concierge of a hotel. Recommend activities for the guest below, \
         in and around the hotel (pools, restaurant and bar, meeting rooms, local outings).\n\n\
         {}\nPreferences: {}\n\n\
         Answer with a short, friendly paragraph in the `recommendations` field.",
        describe_guest(&request.guest),
        if request.preferences.trim().is_empty() {
            "none given"
        } else {
            request.preferences.trim()
        },
    )
}

fn upgrade_prompt(request: &UpgradeRequest) -> String {
    let budget = request
        .budget_per_night
        .map(|b| format!("{b:.2} per night"))
        .unwrap_or_else(|| "not specified".into());
    format!(
        "You are the reservations manager of a hotel with Standard, Deluxe and Suite rooms. \
         Suggest room upgrades for the booking below.\n\n\
         {}\nCurrent room category: {}\nNights: {}\nGuests: {}\nOccasion: {}\nBudget: {}\n\n\
         List each upgrade in `suggestions` and explain your choice in `reasoning`.",
        describe_guest(&request.guest),
        request.current_category,
        request.nights,
        request.guests,
        request.occasion.as_deref().unwrap_or("none"),
        budget,
    )
}

fn activity_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recommendations": { "type": "STRING" }
        },
        "required": ["recommendations"]
    })
}

fn upgrade_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "suggestions": { "type": "ARRAY", "items": { "type": "STRING" } },
            "reasoning": { "type": "STRING" }
        },
        "required": ["suggestions", "reasoning"]
    })
}

impl SuggestionAdapter {
    async fn ask<T: DeserializeOwned>(&self, prompt: String, response_schema: Value) -> AppResult<T> {
        let text = self
            .completion
            .complete(CompletionRequest {
                prompt,
                response_schema,
            })
            .await?;
        serde_json::from_str(text.trim()).map_err(|e| {
            tracing::warn!(error = %e, "completion did not match the response schema");
            AppError::ExternalServiceError(format!("unparseable suggestion: {e}"))
        })
    }
}

#[async_trait]
impl SuggestionService for SuggestionAdapter {
    async fn recommend_activities(
        &self,
        request: ActivityRequest,
    ) -> AppResult<ActivityRecommendations> {
        self.ask(activity_prompt(&request), activity_schema()).await
    }

    async fn suggest_room_upgrades(&self, request: UpgradeRequest) -> AppResult<UpgradeSuggestions> {
        self.ask(upgrade_prompt(&request), upgrade_schema()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::room::RoomCategory;
    use std::sync::Mutex;

    struct CannedCompletion {
        reply: AppResult<String>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl CannedCompletion {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionService for CannedCompletion {
        async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
            self.seen.lock().unwrap().push(request);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(AppError::ExternalServiceError("offline".into())),
            }
        }
    }

    fn guest() -> GuestProfile {
        GuestProfile {
            name: "Awa".into(),
            interests: vec!["swimming".into(), "jazz".into()],
            travel_purpose: Some("honeymoon".into()),
            party_size: 2,
        }
    }

    #[tokio::test]
    async fn activities_are_parsed_from_the_completion() {
        let completion = CannedCompletion::replying(r#"{"recommendations":"Sunset swim, then live jazz at the bar."}"#);
        let adapter = SuggestionAdapter::new(completion.clone());

        let res = adapter
            .recommend_activities(ActivityRequest {
                guest: guest(),
                preferences: "quiet evenings".into(),
            })
            .await
            .unwrap();
        assert_eq!(res.recommendations, "Sunset swim, then live jazz at the bar.");

        let seen = completion.seen.lock().unwrap();
        assert!(seen[0].prompt.contains("Interests: swimming, jazz"));
        assert!(seen[0].prompt.contains("Preferences: quiet evenings"));
        assert_eq!(seen[0].response_schema["required"], json!(["recommendations"]));
    }

    #[tokio::test]
    async fn upgrade_prompt_embeds_the_booking() {
        let completion = CannedCompletion::replying(
            r#"{"suggestions":["Suite with sea view"],"reasoning":"Anniversary stay"}"#,
        );
        let adapter = SuggestionAdapter::new(completion.clone());

        let res = adapter
            .suggest_room_upgrades(UpgradeRequest {
                guest: guest(),
                current_category: RoomCategory::Deluxe,
                nights: 3,
                guests: 2,
                occasion: Some("anniversary".into()),
                budget_per_night: Some(200.0),
            })
            .await
            .unwrap();
        assert_eq!(res.suggestions, vec!["Suite with sea view".to_string()]);

        let prompt = completion.seen.lock().unwrap()[0].prompt.clone();
        assert!(prompt.contains("Current room category: Deluxe"));
        assert!(prompt.contains("Nights: 3"));
        assert!(prompt.contains("Budget: 200.00 per night"));
    }

    #[tokio::test]
    async fn malformed_completion_is_an_external_error() {
        let adapter = SuggestionAdapter::new(CannedCompletion::replying("Sure! Here are some ideas"));
        let res = adapter
            .recommend_activities(ActivityRequest {
                guest: guest(),
                preferences: String::new(),
            })
            .await;
        assert!(matches!(res, Err(AppError::ExternalServiceError(_))));
    }

    #[tokio::test]
    async fn completion_failures_propagate() {
        let completion = Arc::new(CannedCompletion {
            reply: Err(AppError::ExternalServiceError("offline".into())),
            seen: Mutex::new(Vec::new()),
        });
        let adapter = SuggestionAdapter::new(completion);
        let res = adapter
            .recommend_activities(ActivityRequest {
                guest: guest(),
                preferences: String::new(),
            })
            .await;
        assert!(matches!(res, Err(AppError::ExternalServiceError(_))));
    }
}
