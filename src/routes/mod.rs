pub mod info_routes;
pub mod mock_routes;
