use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::bookings::domain::model::BookingEntity;
use crate::core::domain::Identifiable;
use crate::core::sharing::{BookingStatus, SharingError, SharingResult};
use crate::utils::date::serializer;

// ItemSummaryDto is the slice of the booked item carried on a booking
// representation.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct ItemSummaryDto {
    pub item_id: String,
    pub name: String,
    pub available: bool,
    pub owner_id: String,
}

// BookerSummaryDto is the slice of the requesting user carried on a booking
// representation.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct BookerSummaryDto {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

// BookingDto is the wire representation of a booking with its item and
// booker summaries resolved.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct BookingDto {
    pub booking_id: String,
    pub version: i64,
    pub status: BookingStatus,
    #[serde(with = "serializer")]
    pub start_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub end_at: NaiveDateTime,
    pub item: ItemSummaryDto,
    pub booker: BookerSummaryDto,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl Identifiable for BookingDto {
    fn id(&self) -> String {
        self.booking_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl From<&BookingEntity> for BookingDto {
    fn from(other: &BookingEntity) -> BookingDto {
        BookingDto {
            booking_id: other.booking_id.to_string(),
            version: other.version,
            status: other.booking_status,
            start_at: other.start_at,
            end_at: other.end_at,
            item: ItemSummaryDto {
                item_id: other.item_id.to_string(),
                name: other.item_name.to_string(),
                available: other.item_available,
                owner_id: other.owner_id.to_string(),
            },
            booker: BookerSummaryDto {
                user_id: other.booker_id.to_string(),
                name: other.booker_name.to_string(),
                email: other.booker_email.to_string(),
            },
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

// BookingCreateDto is the inbound payload of a booking request; the
// timestamps stay optional until the domain rules have checked them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct BookingCreateDto {
    pub item_id: String,
    pub start_at: Option<NaiveDateTime>,
    pub end_at: Option<NaiveDateTime>,
}

impl BookingCreateDto {
    pub fn new(item_id: &str, start_at: Option<NaiveDateTime>, end_at: Option<NaiveDateTime>) -> Self {
        Self {
            item_id: item_id.to_string(),
            start_at,
            end_at,
        }
    }
}

// PageRequest carries the optional offset pagination parameters of the list
// operations; validation lives here and nowhere else.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct PageRequest {
    pub from: Option<i64>,
    pub size: Option<i64>,
}

impl PageRequest {
    pub fn new(from: Option<i64>, size: Option<i64>) -> Self {
        Self {
            from,
            size,
        }
    }

    pub fn validate(&self) -> SharingResult<()> {
        if let Some(from) = self.from {
            if from < 0 {
                return Err(SharingError::validation(
                    format!("page offset should not be negative: {}", from).as_str(), Some("400".to_string())));
            }
        }
        if let Some(size) = self.size {
            if size <= 0 {
                return Err(SharingError::validation(
                    format!("page size should be positive: {}", size).as_str(), Some("400".to_string())));
            }
        }
        Ok(())
    }

    // slices [from, from+size) out of the ordered records, clipped to the
    // available length
    pub fn slice<T>(&self, records: Vec<T>) -> Vec<T> {
        let from = self.from.unwrap_or(0).max(0) as usize;
        match self.size {
            Some(size) => records.into_iter().skip(from).take(size.max(0) as usize).collect(),
            None => records.into_iter().skip(from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use crate::bookings::domain::model::BookingEntity;
    use crate::bookings::dto::{BookingDto, PageRequest};
    use crate::core::sharing::{BookingStatus, SharingError};

    #[tokio::test]
    async fn test_should_map_entity_to_dto() {
        let start_at = Utc::now().naive_utc() + Duration::days(1);
        let booking = BookingEntity::sample("item1", "booker1", start_at, start_at + Duration::days(1));
        let dto = BookingDto::from(&booking);
        assert_eq!(booking.booking_id, dto.booking_id);
        assert_eq!(BookingStatus::Waiting, dto.status);
        assert_eq!("item1", dto.item.item_id.as_str());
        assert_eq!(booking.owner_id, dto.item.owner_id);
        assert_eq!("booker1", dto.booker.user_id.as_str());
    }

    #[tokio::test]
    async fn test_should_validate_page_request() {
        assert!(PageRequest::new(None, None).validate().is_ok());
        assert!(PageRequest::new(Some(0), Some(10)).validate().is_ok());
        assert!(matches!(PageRequest::new(Some(-1), Some(10)).validate(),
                         Err(SharingError::Validation { message: _, reason_code: _ })));
        assert!(matches!(PageRequest::new(Some(0), Some(0)).validate(),
                         Err(SharingError::Validation { message: _, reason_code: _ })));
    }

    #[tokio::test]
    async fn test_should_slice_page() {
        let records = vec![1, 2, 3];
        assert_eq!(vec![2], PageRequest::new(Some(1), Some(1)).slice(records.clone()));
        assert_eq!(vec![2, 3], PageRequest::new(Some(1), None).slice(records.clone()));
        assert_eq!(vec![1, 2, 3], PageRequest::new(None, Some(10)).slice(records.clone()));
        let empty: Vec<i32> = vec![];
        assert_eq!(empty, PageRequest::new(Some(5), Some(2)).slice(records));
    }
}
