use chrono::NaiveDate;
use garde::Validate;
use kernel::model::{
    reservation::stay_nights,
    room::RoomCategory,
    suggestion::{ActivityRequest, GuestProfile, UpgradeRequest},
};
use serde::Deserialize;

use super::is_after;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GuestProfileRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    #[serde(default)]
    pub interests: Vec<String>,
    #[garde(skip)]
    pub travel_purpose: Option<String>,
    #[garde(range(min = 1))]
    pub party_size: u32,
}

impl From<GuestProfileRequest> for GuestProfile {
    fn from(value: GuestProfileRequest) -> Self {
        let GuestProfileRequest {
            name,
            interests,
            travel_purpose,
            party_size,
        } = value;
        GuestProfile {
            name,
            interests,
            travel_purpose,
            party_size,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecommendationRequest {
    #[garde(dive)]
    pub guest: GuestProfileRequest,
    #[garde(skip)]
    #[serde(default)]
    pub preferences: String,
}

impl From<ActivityRecommendationRequest> for ActivityRequest {
    fn from(value: ActivityRecommendationRequest) -> Self {
        let ActivityRecommendationRequest { guest, preferences } = value;
        ActivityRequest {
            guest: guest.into(),
            preferences,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpgradeRequest {
    #[garde(dive)]
    pub guest: GuestProfileRequest,
    #[garde(skip)]
    pub current_category: RoomCategory,
    #[garde(skip)]
    pub check_in: NaiveDate,
    #[garde(custom(is_after(&self.check_in)))]
    pub check_out: NaiveDate,
    #[garde(range(min = 1))]
    pub guests: u32,
    #[garde(skip)]
    pub occasion: Option<String>,
    #[garde(range(min = 0.0))]
    pub budget_per_night: Option<f64>,
}

impl From<RoomUpgradeRequest> for UpgradeRequest {
    fn from(value: RoomUpgradeRequest) -> Self {
        let RoomUpgradeRequest {
            guest,
            current_category,
            check_in,
            check_out,
            guests,
            occasion,
            budget_per_night,
        } = value;
        UpgradeRequest {
            guest: guest.into(),
            current_category,
            nights: stay_nights(check_in, check_out),
            guests,
            occasion,
            budget_per_night,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upgrade_request_counts_nights() {
        let req: RoomUpgradeRequest = serde_json::from_value(json!({
            "guest": { "name": "Awa", "partySize": 2 },
            "currentCategory": "Standard",
            "checkIn": "2025-06-01",
            "checkOut": "2025-06-04",
            "guests": 2
        }))
        .unwrap();
        assert!(req.validate(&()).is_ok());
        let upgrade = UpgradeRequest::from(req);
        assert_eq!(upgrade.nights, 3);
        assert!(upgrade.guest.interests.is_empty());
    }

    #[test]
    fn nested_guest_profile_is_validated() {
        let req: ActivityRecommendationRequest = serde_json::from_value(json!({
            "guest": { "name": "", "partySize": 0 },
            "preferences": "spa"
        }))
        .unwrap();
        assert!(req.validate(&()).is_err());
    }
}
