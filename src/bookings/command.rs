pub mod change_booking_status_cmd;
pub mod create_booking_cmd;
pub mod get_booking_cmd;
pub mod query_bookings_cmd;
pub mod query_owner_bookings_cmd;
