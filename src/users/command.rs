pub mod add_user_cmd;
pub mod get_user_cmd;
pub mod query_users_cmd;
pub mod remove_user_cmd;
pub mod update_user_cmd;
