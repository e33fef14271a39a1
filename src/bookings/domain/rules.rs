use chrono::NaiveDateTime;
use crate::bookings::domain::model::BookingEntity;
use crate::core::sharing::{BookingStatus, SharingError, SharingResult};
use crate::items::Item;

// Admission and transition rules for bookings. These checks are pure: the
// lifecycle service loads the collaborating records and calls them in order,
// first failure wins.

// Both ends of the interval must be supplied before anything else is judged.
pub(crate) fn require_period(start_at: Option<NaiveDateTime>,
                             end_at: Option<NaiveDateTime>) -> SharingResult<(NaiveDateTime, NaiveDateTime)> {
    let start_at = start_at.ok_or_else(|| SharingError::validation(
        "booking start should not be null", Some("400".to_string())))?;
    let end_at = end_at.ok_or_else(|| SharingError::validation(
        "booking end should not be null", Some("400".to_string())))?;
    Ok((start_at, end_at))
}

// An owner booking their own item is denied outright.
pub(crate) fn validate_not_owner(item: &dyn Item, requester_id: &str) -> SharingResult<()> {
    if item.owner_id() == requester_id {
        return Err(SharingError::access_denied(
            format!("owner {} cannot book own item {}", requester_id, item.id()).as_str(),
            Some("403".to_string())));
    }
    Ok(())
}

// end strictly after start, neither end in the past at creation time
pub(crate) fn validate_period(start_at: NaiveDateTime, end_at: NaiveDateTime,
                              now: NaiveDateTime) -> SharingResult<()> {
    if end_at < start_at || start_at == end_at || end_at < now || start_at < now {
        return Err(SharingError::validation(
            "booking start should be before end and not in the past", Some("400".to_string())));
    }
    Ok(())
}

pub(crate) fn validate_available(item: &dyn Item) -> SharingResult<()> {
    if !item.is_available() {
        return Err(SharingError::validation(
            format!("item {} is not available for booking", item.id()).as_str(), Some("400".to_string())));
    }
    Ok(())
}

// Interval intersection for half-open [start, end) ranges: the new end falls
// inside an existing range, the new start falls inside an existing range, or
// the new range strictly contains an existing one.
pub(crate) fn overlaps(existing: &BookingEntity,
                       start_at: NaiveDateTime, end_at: NaiveDateTime) -> bool {
    (existing.start_at < end_at && existing.end_at > end_at)
        || (existing.start_at < start_at && existing.end_at > start_at)
        || (existing.start_at > start_at && existing.end_at < end_at)
}

// Only bookings still holding the interval (waiting or approved) block a new
// one; rejected bookings free it.
pub(crate) fn validate_no_overlap(existing: &[BookingEntity]) -> SharingResult<()> {
    if existing.iter().any(|b| b.booking_status == BookingStatus::Waiting
        || b.booking_status == BookingStatus::Approved) {
        return Err(SharingError::validation(
            "item is already booked for the requested period", Some("400".to_string())));
    }
    Ok(())
}

// A booking is visible to its booker and the item owner only; everyone else
// sees the same answer as for a missing booking.
pub(crate) fn validate_access(booking: &BookingEntity, requester_id: &str) -> SharingResult<()> {
    if booking.booker_id != requester_id && booking.owner_id != requester_id {
        return Err(SharingError::not_found(
            format!("booking not found for {}", booking.booking_id).as_str()));
    }
    Ok(())
}

// Status changes are owner-only; non-owners get the missing-booking answer so
// existence is not leaked.
pub(crate) fn validate_owner(booking: &BookingEntity, requester_id: &str) -> SharingResult<()> {
    if booking.owner_id != requester_id {
        return Err(SharingError::not_found(
            format!("booking not found for {}", booking.booking_id).as_str()));
    }
    Ok(())
}

pub(crate) fn status_for(approved: bool) -> BookingStatus {
    if approved { BookingStatus::Approved } else { BookingStatus::Rejected }
}

// Re-setting the current status is an error, which also makes APPROVED and
// REJECTED terminal: WAITING is never a target of this transition.
pub(crate) fn validate_status_change(booking: &BookingEntity,
                                     target: BookingStatus) -> SharingResult<()> {
    if booking.booking_status == target {
        return Err(SharingError::validation(
            format!("booking {} status has already been set to {}",
                    booking.booking_id, target).as_str(), Some("400".to_string())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use crate::bookings::domain::model::BookingEntity;
    use crate::bookings::domain::rules;
    use crate::core::sharing::{BookingStatus, SharingError};
    use crate::items::dto::ItemDto;

    fn available_item(owner_id: &str) -> ItemDto {
        ItemDto::new(owner_id, "drill", "cordless drill", true)
    }

    #[tokio::test]
    async fn test_should_require_both_period_ends() {
        let now = Utc::now().naive_utc();
        assert!(matches!(rules::require_period(None, Some(now)),
                         Err(SharingError::Validation { message: _, reason_code: _ })));
        assert!(matches!(rules::require_period(Some(now), None),
                         Err(SharingError::Validation { message: _, reason_code: _ })));
        let (start_at, end_at) = rules::require_period(Some(now), Some(now + Duration::days(1)))
            .expect("should accept period");
        assert_eq!(now, start_at);
        assert_eq!(now + Duration::days(1), end_at);
    }

    #[tokio::test]
    async fn test_should_deny_owner_booking_own_item() {
        let item = available_item("owner1");
        assert!(matches!(rules::validate_not_owner(&item, "owner1"),
                         Err(SharingError::AccessDenied { message: _, reason_code: _ })));
        assert!(rules::validate_not_owner(&item, "booker1").is_ok());
    }

    #[tokio::test]
    async fn test_should_reject_inverted_empty_or_past_periods() {
        let now = Utc::now().naive_utc();
        let tomorrow = now + Duration::days(1);
        // end before start
        assert!(rules::validate_period(tomorrow + Duration::days(1), tomorrow, now).is_err());
        // start == end
        assert!(rules::validate_period(tomorrow, tomorrow, now).is_err());
        // end in the past
        assert!(rules::validate_period(now - Duration::days(2), now - Duration::days(1), now).is_err());
        // start in the past
        assert!(rules::validate_period(now - Duration::hours(1), tomorrow, now).is_err());
        // well-formed future period
        assert!(rules::validate_period(tomorrow, tomorrow + Duration::days(1), now).is_ok());
    }

    #[tokio::test]
    async fn test_should_reject_unavailable_item() {
        let mut item = available_item("owner1");
        item.available = false;
        assert!(matches!(rules::validate_available(&item),
                         Err(SharingError::Validation { message: _, reason_code: _ })));
    }

    #[tokio::test]
    async fn test_should_detect_interval_overlap() {
        let base = Utc::now().naive_utc() + Duration::days(10);
        let existing = BookingEntity::sample("item1", "booker1", base, base + Duration::days(2));

        // new end inside existing
        assert!(rules::overlaps(&existing, base - Duration::days(1), base + Duration::days(1)));
        // new start inside existing
        assert!(rules::overlaps(&existing, base + Duration::days(1), base + Duration::days(3)));
        // new contains existing
        assert!(rules::overlaps(&existing, base - Duration::days(1), base + Duration::days(3)));
        // disjoint after
        assert!(!rules::overlaps(&existing, base + Duration::days(3), base + Duration::days(4)));
        // disjoint before
        assert!(!rules::overlaps(&existing, base - Duration::days(2), base - Duration::days(1)));
    }

    #[tokio::test]
    async fn test_should_block_waiting_and_approved_overlaps_only() {
        let base = Utc::now().naive_utc() + Duration::days(10);
        let mut blocking = BookingEntity::sample("item1", "booker1", base, base + Duration::days(2));
        assert!(rules::validate_no_overlap(&[blocking.clone()]).is_err());

        blocking.booking_status = BookingStatus::Approved;
        assert!(rules::validate_no_overlap(&[blocking.clone()]).is_err());

        blocking.booking_status = BookingStatus::Rejected;
        assert!(rules::validate_no_overlap(&[blocking]).is_ok());
        assert!(rules::validate_no_overlap(&[]).is_ok());
    }

    #[tokio::test]
    async fn test_should_limit_read_access_to_booker_and_owner() {
        let base = Utc::now().naive_utc() + Duration::days(1);
        let booking = BookingEntity::sample("item1", "booker1", base, base + Duration::days(1));
        assert!(rules::validate_access(&booking, "booker1").is_ok());
        assert!(rules::validate_access(&booking, booking.owner_id.as_str()).is_ok());
        assert!(matches!(rules::validate_access(&booking, "stranger"),
                         Err(SharingError::NotFound { message: _ })));
    }

    #[tokio::test]
    async fn test_should_limit_status_change_to_owner() {
        let base = Utc::now().naive_utc() + Duration::days(1);
        let booking = BookingEntity::sample("item1", "booker1", base, base + Duration::days(1));
        assert!(rules::validate_owner(&booking, booking.owner_id.as_str()).is_ok());
        // the booker is not the owner either
        assert!(matches!(rules::validate_owner(&booking, "booker1"),
                         Err(SharingError::NotFound { message: _ })));
    }

    #[tokio::test]
    async fn test_should_reject_redundant_status_transition() {
        let base = Utc::now().naive_utc() + Duration::days(1);
        let mut booking = BookingEntity::sample("item1", "booker1", base, base + Duration::days(1));
        assert_eq!(BookingStatus::Approved, rules::status_for(true));
        assert_eq!(BookingStatus::Rejected, rules::status_for(false));

        assert!(rules::validate_status_change(&booking, BookingStatus::Approved).is_ok());
        booking.booking_status = BookingStatus::Approved;
        assert!(matches!(rules::validate_status_change(&booking, BookingStatus::Approved),
                         Err(SharingError::Validation { message: _, reason_code: _ })));
        assert!(rules::validate_status_change(&booking, BookingStatus::Rejected).is_ok());
    }
}
