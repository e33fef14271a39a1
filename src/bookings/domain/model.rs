use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::sharing::BookingStatus;
use crate::items::Item;
use crate::users::User;
use crate::utils::date::serializer;

// BookingEntity abstracts a reservation of one item by one user for a
// half-open time interval. The item and booker summaries are attached at
// creation time and never change afterwards; only the status field is
// mutable through the approve/reject flow.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct BookingEntity {
    pub booking_id: String,
    pub version: i64,
    pub item_id: String,
    pub item_name: String,
    pub item_available: bool,
    pub owner_id: String,
    pub booker_id: String,
    pub booker_name: String,
    pub booker_email: String,
    pub booking_status: BookingStatus,
    #[serde(with = "serializer")]
    pub start_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub end_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookingEntity {
    pub fn from_item_booker(item: &dyn Item, booker: &dyn User,
                            start_at: NaiveDateTime, end_at: NaiveDateTime) -> Self {
        Self {
            booking_id: Uuid::new_v4().to_string(),
            version: 0,
            item_id: item.id(),
            item_name: item.name(),
            item_available: item.is_available(),
            owner_id: item.owner_id(),
            booker_id: booker.id(),
            booker_name: booker.name(),
            booker_email: booker.email(),
            booking_status: BookingStatus::Waiting,
            start_at,
            end_at,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    #[cfg(test)]
    pub fn sample(item_id: &str, booker_id: &str,
                  start_at: NaiveDateTime, end_at: NaiveDateTime) -> Self {
        Self {
            booking_id: Uuid::new_v4().to_string(),
            version: 0,
            item_id: item_id.to_string(),
            item_name: "item".to_string(),
            item_available: true,
            owner_id: Uuid::new_v4().to_string(),
            booker_id: booker_id.to_string(),
            booker_name: "booker".to_string(),
            booker_email: "booker@example.org".to_string(),
            booking_status: BookingStatus::Waiting,
            start_at,
            end_at,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use crate::bookings::domain::model::BookingEntity;
    use crate::core::sharing::BookingStatus;
    use crate::items::dto::ItemDto;
    use crate::users::dto::UserDto;

    #[tokio::test]
    async fn test_should_build_booking_from_item_and_booker() {
        let owner = UserDto::new("owner", "owner@example.org");
        let item = ItemDto::new(owner.user_id.as_str(), "drill", "cordless drill", true);
        let booker = UserDto::new("booker", "booker@example.org");
        let start_at = Utc::now().naive_utc() + Duration::days(1);
        let end_at = start_at + Duration::days(1);

        let booking = BookingEntity::from_item_booker(&item, &booker, start_at, end_at);
        assert_eq!(item.item_id, booking.item_id);
        assert_eq!(owner.user_id, booking.owner_id);
        assert_eq!(booker.user_id, booking.booker_id);
        assert_eq!(BookingStatus::Waiting, booking.booking_status);
        assert_eq!(start_at, booking.start_at);
        assert_eq!(end_at, booking.end_at);
    }
}
