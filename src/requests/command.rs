pub mod add_request_cmd;
pub mod get_request_cmd;
pub mod query_requests_cmd;
