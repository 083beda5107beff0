pub mod app_state;
pub mod mock_state;
